//! The pipeline's result, as data and as a text block for itineraries

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::classify::PrecipitationBand;
use crate::models::{Location, PeriodAverages};
use crate::period::NormalizedDayRange;

/// Historical climate summary for one place and trip window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSummary {
    /// Place as the caller wrote it
    pub place: String,
    /// Best geocoding match for `place`
    pub location: Location,
    /// Month/day window, e.g. "07-01 to 07-05"
    pub period: String,
    pub averages: PeriodAverages,
    pub band: PrecipitationBand,
    /// Worded precipitation band, e.g. "Very low (0.5mm/day). Dry weather expected."
    pub precipitation_summary: String,
    /// Days that went into the averages
    pub sample_days: usize,
    /// Days the archive had no values for; non-zero means degraded data
    pub missing_days: usize,
    /// Search link for the live forecast
    pub forecast_link: String,
}

impl ClimateSummary {
    #[must_use]
    pub fn new(
        place: &str,
        location: Location,
        range: &NormalizedDayRange,
        averages: PeriodAverages,
        sample_days: usize,
        missing_days: usize,
    ) -> Self {
        let place = place.trim().to_string();
        let band = PrecipitationBand::from_average(averages.avg_precipitation);
        Self {
            forecast_link: forecast_link(&place),
            period: range.label(),
            precipitation_summary: band.describe(averages.avg_precipitation),
            place,
            location,
            averages,
            band,
            sample_days,
            missing_days,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.missing_days > 0
    }
}

impl Display for ClimateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Historical average climate for {} (period {}):",
            self.place, self.period
        )?;
        writeln!(
            f,
            "* 🌡️ Average temperature: {}",
            self.averages.format_temperature()
        )?;
        writeln!(f, "* ☔ Chance of rain: {}", self.precipitation_summary)?;
        writeln!(f, "(Based on climate data from previous years.)")?;
        if self.is_degraded() {
            writeln!(
                f,
                "(Note: {} day(s) had no archive data and were excluded.)",
                self.missing_days
            )?;
        }
        writeln!(f)?;
        write!(f, "🔗 Live forecast: {}", self.forecast_link)
    }
}

fn forecast_link(place: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(&format!("weather in {place}"))
    )
}
