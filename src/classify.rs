//! Precipitation bands
//!
//! Thresholds are half-open, in mm/day: a boundary value belongs to the
//! higher band.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Qualitative precipitation tier, ordered by threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationBand {
    /// `< 1.0`
    VeryLow,
    /// `[1.0, 3.0)`
    Low,
    /// `[3.0, 6.0)`
    Moderate,
    /// `>= 6.0`
    High,
}

impl PrecipitationBand {
    /// Band for an average daily precipitation.
    ///
    /// Negative or non-finite input is a malformed upstream value; it falls
    /// into the lowest band.
    #[must_use]
    pub fn from_average(avg_precipitation: f64) -> Self {
        if !avg_precipitation.is_finite() || avg_precipitation < 0.0 {
            warn!(
                avg_precipitation,
                "Precipitation average out of range, using lowest band"
            );
            return Self::VeryLow;
        }

        if avg_precipitation < 1.0 {
            Self::VeryLow
        } else if avg_precipitation < 3.0 {
            Self::Low
        } else if avg_precipitation < 6.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::VeryLow => "Dry weather expected.",
            Self::Low => "Occasional light showers are possible.",
            Self::Moderate => "Carry an umbrella.",
            Self::High => "Expect some rainy days.",
        }
    }

    /// "Label (x.ymm/day). Advice"
    #[must_use]
    pub fn describe(&self, avg_precipitation: f64) -> String {
        format!(
            "{} ({:.1}mm/day). {}",
            self.label(),
            avg_precipitation,
            self.advice()
        )
    }
}

/// Describe an average daily precipitation in words. Never fails.
#[must_use]
pub fn classify(avg_precipitation: f64) -> String {
    PrecipitationBand::from_average(avg_precipitation).describe(avg_precipitation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, PrecipitationBand::VeryLow)]
    #[case(0.999, PrecipitationBand::VeryLow)]
    #[case(1.0, PrecipitationBand::Low)]
    #[case(2.999, PrecipitationBand::Low)]
    #[case(3.0, PrecipitationBand::Moderate)]
    #[case(5.999, PrecipitationBand::Moderate)]
    #[case(6.0, PrecipitationBand::High)]
    #[case(250.0, PrecipitationBand::High)]
    #[case(f64::MAX, PrecipitationBand::High)]
    fn test_band_boundaries(#[case] avg: f64, #[case] expected: PrecipitationBand) {
        assert_eq!(PrecipitationBand::from_average(avg), expected);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(-42.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_malformed_input_is_lowest_band(#[case] avg: f64) {
        assert_eq!(PrecipitationBand::from_average(avg), PrecipitationBand::VeryLow);
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify(0.5), "Very low (0.5mm/day). Dry weather expected.");
        assert_eq!(classify(4.26), "Moderate (4.3mm/day). Carry an umbrella.");
        assert!(classify(6.0).starts_with("High (6.0mm/day)"));
    }

    #[test]
    fn test_bands_are_ordered() {
        assert!(PrecipitationBand::VeryLow < PrecipitationBand::Low);
        assert!(PrecipitationBand::Low < PrecipitationBand::Moderate);
        assert!(PrecipitationBand::Moderate < PrecipitationBand::High);
    }
}
