//! External collaborators of the pipeline: place lookup and the climate archive.
//!
//! Both are traits so the pipeline can run against fakes; [`open_meteo`] holds
//! the HTTP implementations.

use async_trait::async_trait;

use crate::Result;
use crate::models::{Coordinates, DailySampleSeries, Location};
use crate::period::NormalizedDayRange;

pub mod open_meteo;

pub use open_meteo::{OpenMeteoArchive, OpenMeteoGeocoder};

/// Resolves a free-text place name to its best match
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Top search hit for `place`.
    ///
    /// Fails with `NotFound` on zero hits and `Upstream` when the service is
    /// unreachable or answers with something unparseable.
    async fn locate(&self, place: &str) -> Result<Location>;
}

/// Daily historical climate samples for a place
#[async_trait]
pub trait ClimateArchive: Send + Sync {
    /// Samples for every day of `range`, in range order.
    async fn daily_samples(
        &self,
        coordinates: Coordinates,
        range: &NormalizedDayRange,
    ) -> Result<DailySampleSeries>;
}
