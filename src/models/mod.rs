//! Data models for the climate summary pipeline
//!
//! - Location: geocoded place and its coordinates
//! - Climate: daily archive samples and period averages

pub mod climate;
pub mod location;

pub use climate::{DailySample, DailySampleSeries, PeriodAverages};
pub use location::{Coordinates, Location};
