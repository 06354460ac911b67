//! Trip date ranges and their re-anchoring onto the archive reference year
//!
//! The archive is queried by month and day only. Both ends of a trip are moved
//! onto [`REFERENCE_YEAR`], a leap year, so a range touching Feb 29 always
//! produces a valid calendar date.
//!
//! A trip that crosses New Year (Dec 28 -> Jan 3) cannot be a single span in
//! one year. It is split into the tail of the reference year (Dec 28 -> Dec 31)
//! followed by its head (Jan 1 -> Jan 3), both inside the same leap year, and
//! the archive is queried once per span.

use crate::error::ClimateError;
use crate::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Leap year every trip is re-anchored on
pub const REFERENCE_YEAR: i32 = 2024;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A trip's first and last day, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting an end before the start and ranges that
    /// cannot be expressed as a month/day window
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ClimateError::validation(format!(
                "end date {end} is before start date {start}"
            )));
        }

        let years_apart = end.year() - start.year();
        let wraps = month_day(end) < month_day(start);
        if years_apart > 1 || (years_apart == 1 && !wraps) {
            return Err(ClimateError::validation(format!(
                "range {start} to {end} covers more than a year"
            )));
        }

        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date("start", start)?, parse_date("end", end)?)
    }

    /// Whether the month/day window crosses New Year
    #[must_use]
    pub fn wraps_year(&self) -> bool {
        month_day(self.end) < month_day(self.start)
    }

    /// Re-anchor onto [`REFERENCE_YEAR`], splitting at New Year when needed
    pub fn normalize(&self) -> Result<NormalizedDayRange> {
        let start = anchor(self.start)?;
        let end = anchor(self.end)?;

        let segments = if self.wraps_year() {
            vec![
                DaySpan::new(start, last_day_of_reference_year()?),
                DaySpan::new(first_day_of_reference_year()?, end),
            ]
        } else {
            vec![DaySpan::new(start, end)]
        };

        Ok(NormalizedDayRange { segments })
    }
}

/// An inclusive run of days inside the reference year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaySpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DaySpan {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}

/// Archive query key: one span, or two when the trip crosses New Year
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedDayRange {
    segments: Vec<DaySpan>,
}

impl NormalizedDayRange {
    #[must_use]
    pub fn segments(&self) -> &[DaySpan] {
        &self.segments
    }

    #[must_use]
    pub fn is_split(&self) -> bool {
        self.segments.len() > 1
    }

    /// Days covered, inclusive on both ends
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.segments.iter().map(DaySpan::day_count).sum()
    }

    /// "MM-DD to MM-DD"
    #[must_use]
    pub fn label(&self) -> String {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => format!(
                "{} to {}",
                first.start.format("%m-%d"),
                last.end.format("%m-%d")
            ),
            _ => String::new(),
        }
    }
}

fn parse_date(which: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ClimateError::validation(format!("{which} date '{value}' is not a valid YYYY-MM-DD date"))
    })
}

fn month_day(date: NaiveDate) -> (u32, u32) {
    (date.month(), date.day())
}

fn anchor(date: NaiveDate) -> Result<NaiveDate> {
    reference_date(date.month(), date.day())
}

fn first_day_of_reference_year() -> Result<NaiveDate> {
    reference_date(1, 1)
}

fn last_day_of_reference_year() -> Result<NaiveDate> {
    reference_date(12, 31)
}

fn reference_date(month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).ok_or_else(|| {
        ClimateError::validation(format!(
            "{month:02}-{day:02} does not exist in {REFERENCE_YEAR}"
        ))
    })
}
