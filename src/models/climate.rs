//! Daily climate samples and their period averages

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of archive data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySample {
    pub date: NaiveDate,
    /// Daily mean temperature at 2 m in Celsius
    pub mean_temperature: f64,
    /// Daily precipitation sum in mm
    pub precipitation: f64,
}

impl DailySample {
    #[must_use]
    pub fn new(date: NaiveDate, mean_temperature: f64, precipitation: f64) -> Self {
        Self {
            date,
            mean_temperature,
            precipitation,
        }
    }
}

/// Samples for a normalized day range, in trip order
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DailySampleSeries {
    pub samples: Vec<DailySample>,
    /// Days the archive listed but reported with null values
    pub missing_days: usize,
}

impl DailySampleSeries {
    #[must_use]
    pub fn new(samples: Vec<DailySample>) -> Self {
        Self {
            samples,
            missing_days: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Days the archive listed, with or without values
    #[must_use]
    pub fn reported_days(&self) -> usize {
        self.samples.len() + self.missing_days
    }

    /// Append another segment's samples after this one
    pub fn extend(&mut self, other: DailySampleSeries) {
        self.samples.extend(other.samples);
        self.missing_days += other.missing_days;
    }
}

impl FromIterator<DailySample> for DailySampleSeries {
    fn from_iter<I: IntoIterator<Item = DailySample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Mean temperature and precipitation over a period
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PeriodAverages {
    /// Celsius
    pub avg_temperature: f64,
    /// mm per day
    pub avg_precipitation: f64,
}

impl PeriodAverages {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.avg_temperature)
    }
}
