//! Historical climate summary pipeline
//!
//! geocode -> fetch archive -> aggregate -> classify, strictly in that order.
//! The first failing stage ends the invocation and its error is returned as
//! is; nothing is substituted for missing data.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::cache::{CacheKey, SummaryCache};
use crate::config::ClimateConfig;
use crate::error::ClimateError;
use crate::http::build_client;
use crate::period::DateRange;
use crate::report::ClimateSummary;
use crate::weather::{ClimateArchive, Geocoder, OpenMeteoArchive, OpenMeteoGeocoder};
use crate::Result;

/// Entry point for historical climate summaries.
///
/// Cheap to clone; clones share collaborators and cache, and concurrent
/// calls share nothing else.
#[derive(Clone)]
pub struct ClimateService {
    geocoder: Arc<dyn Geocoder>,
    archive: Arc<dyn ClimateArchive>,
    cache: SummaryCache,
}

impl ClimateService {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        archive: Arc<dyn ClimateArchive>,
        cache: SummaryCache,
    ) -> Self {
        Self {
            geocoder,
            archive,
            cache,
        }
    }

    /// Service backed by Open-Meteo, sharing one HTTP client
    pub fn from_config(config: &ClimateConfig) -> anyhow::Result<Self> {
        let client = build_client(&config.http)?;
        Ok(Self::new(
            Arc::new(OpenMeteoGeocoder::new(client.clone(), &config.geocoding)),
            Arc::new(OpenMeteoArchive::new(client, &config.archive)),
            SummaryCache::new(config.cache.capacity),
        ))
    }

    /// Summarize the historical climate of `place` between two `YYYY-MM-DD` dates
    #[instrument(skip(self))]
    pub async fn summarize(
        &self,
        place: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ClimateSummary> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ClimateError::validation("place cannot be empty"));
        }

        let range = DateRange::parse(start_date, end_date)?.normalize()?;
        if range.is_split() {
            debug!(period = %range.label(), "Trip crosses New Year, querying two spans");
        }

        let key = CacheKey::new(place, &range);
        if let Some(summary) = self.cache.get(&key) {
            info!("Serving cached summary for {} ({})", place, summary.period);
            return Ok(summary);
        }

        let start_time = Instant::now();
        let location = self.geocoder.locate(place).await?;
        let series = self
            .archive
            .daily_samples(location.coordinates, &range)
            .await?;
        let averages = aggregate(&series)?;

        if series.missing_days > 0 {
            warn!(
                "{} of {} days had no archive data for {}",
                series.missing_days,
                range.day_count(),
                place
            );
        }

        let summary = ClimateSummary::new(
            place,
            location,
            &range,
            averages,
            series.len(),
            series.missing_days,
        );
        info!(
            "Summarized {} ({}): {} / {:?} in {:.3}s",
            place,
            summary.period,
            summary.averages.format_temperature(),
            summary.band,
            start_time.elapsed().as_secs_f64()
        );

        self.cache.put(key, summary.clone());
        Ok(summary)
    }

    /// Same as [`summarize`](Self::summarize), rendered as a text block
    pub async fn summarize_text(
        &self,
        place: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<String> {
        Ok(self.summarize(place, start_date, end_date).await?.to_string())
    }

    /// Run [`summarize`](Self::summarize) until done or until `cancel` fires.
    ///
    /// On cancellation the in-flight request is dropped, which aborts it, and
    /// no partial result is kept.
    pub async fn summarize_with_cancel(
        &self,
        place: &str,
        start_date: &str,
        end_date: &str,
        cancel: &CancellationToken,
    ) -> Result<ClimateSummary> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!("Climate summary for '{}' cancelled", place);
                Err(ClimateError::Cancelled)
            }
            result = self.summarize(place, start_date, end_date) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let service = ClimateService::from_config(&ClimateConfig::default());
        assert!(service.is_ok());
    }

    #[tokio::test]
    async fn test_bad_input_fails_before_any_call() {
        let service = ClimateService::from_config(&ClimateConfig::default()).unwrap();

        let err = service.summarize("", "2025-07-01", "2025-07-05").await.unwrap_err();
        assert!(matches!(err, ClimateError::Validation { .. }));

        let err = service
            .summarize("Paris", "2025-07-01", "yesterday")
            .await
            .unwrap_err();
        assert!(matches!(err, ClimateError::Validation { .. }));
    }
}
