//! `trip-climate` - historical climate summaries for travel planning
//!
//! Resolves a place name, pulls daily history for the trip's month/day window
//! from a climate archive, averages it and words the rain outlook, ready to be
//! dropped into an itinerary.

pub mod aggregate;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod period;
pub mod report;
pub mod summary;
pub mod tool;
pub mod weather;

// Re-export core types for public API
pub use aggregate::aggregate;
pub use cache::{CacheKey, SummaryCache};
pub use classify::{PrecipitationBand, classify};
pub use config::ClimateConfig;
pub use error::{ClimateError, UpstreamFailure};
pub use models::{Coordinates, DailySample, DailySampleSeries, Location, PeriodAverages};
pub use period::{DateRange, DaySpan, NormalizedDayRange, REFERENCE_YEAR};
pub use report::ClimateSummary;
pub use summary::ClimateService;
pub use tool::{HistoricalWeatherTool, ToolOutput};
pub use weather::{ClimateArchive, Geocoder, OpenMeteoArchive, OpenMeteoGeocoder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateError>;
