//! Open-Meteo geocoding and ERA5 archive clients
//!
//! Both APIs are free and need no API key.

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{ClimateArchive, Geocoder};
use crate::config::{ArchiveConfig, GeocodingConfig};
use crate::error::{ClimateError, UpstreamFailure};
use crate::models::{Coordinates, DailySample, DailySampleSeries, Location};
use crate::period::{DaySpan, NormalizedDayRange};
use crate::Result;

const GEOCODING: &str = "geocoding";
const ARCHIVE: &str = "archive";

/// Place lookup via `geocoding-api.open-meteo.com`
pub struct OpenMeteoGeocoder {
    client: ClientWithMiddleware,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &GeocodingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn locate(&self, place: &str) -> Result<Location> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ClimateError::validation("place cannot be empty"));
        }

        let url = format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(place),
            urlencoding::encode(&self.language)
        );

        let start_time = Instant::now();
        let response: schema::GeocodingResponse = get_json(&self.client, GEOCODING, &url).await?;

        let Some(hit) = response.results.unwrap_or_default().into_iter().next() else {
            warn!("No results found for place '{}'", place);
            return Err(ClimateError::not_found(place));
        };

        let location = Location::from(hit);
        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            place,
            location.display_name(),
            location.coordinates.format(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(location)
    }
}

/// Daily history via the ERA5 endpoint of `archive-api.open-meteo.com`
pub struct OpenMeteoArchive {
    client: ClientWithMiddleware,
    base_url: String,
}

impl OpenMeteoArchive {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &ArchiveConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_span(&self, coordinates: Coordinates, span: DaySpan) -> Result<DailySampleSeries> {
        let url = format!(
            "{}/era5?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_mean,precipitation_sum&timezone=auto",
            self.base_url, coordinates.latitude, coordinates.longitude, span.start, span.end
        );

        let response: schema::ArchiveResponse = get_json(&self.client, ARCHIVE, &url).await?;
        let daily = response
            .daily
            .ok_or_else(|| ClimateError::data_unavailable("archive response has no daily data"))?;

        daily.into_series(span)
    }
}

#[async_trait]
impl ClimateArchive for OpenMeteoArchive {
    #[instrument(skip(self, range), fields(period = %range.label(), days = range.day_count()))]
    async fn daily_samples(
        &self,
        coordinates: Coordinates,
        range: &NormalizedDayRange,
    ) -> Result<DailySampleSeries> {
        let start_time = Instant::now();
        let mut parts = Vec::with_capacity(range.segments().len());
        for span in range.segments() {
            parts.push((*span, self.fetch_span(coordinates, *span).await?));
        }

        // Empty only as a whole; otherwise every span must list its days.
        if parts.iter().any(|(_, part)| part.reported_days() > 0) {
            if let Some((span, _)) = parts.iter().find(|(_, part)| part.reported_days() == 0) {
                return Err(ClimateError::data_unavailable(format!(
                    "archive returned no days from {} to {}",
                    span.start, span.end
                )));
            }
        }

        let mut series = DailySampleSeries::default();
        for (_, part) in parts {
            series.extend(part);
        }

        info!(
            "Retrieved {} daily samples ({} missing) in {:.3}s",
            series.len(),
            series.missing_days,
            start_time.elapsed().as_secs_f64()
        );
        Ok(series)
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    service: &str,
    url: &str,
) -> Result<T> {
    debug!("Open-Meteo request URL: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| upstream(service, UpstreamFailure::Unreachable, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(upstream(
            service,
            UpstreamFailure::Status(status.as_u16()),
            format!(
                "request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            ),
        ));
    }

    response.json::<T>().await.map_err(|e| {
        // the body is read under the same deadline as the headers
        let failure = if e.is_timeout() {
            UpstreamFailure::Unreachable
        } else {
            UpstreamFailure::InvalidResponse
        };
        upstream(service, failure, format!("malformed response: {e}"))
    })
}

fn upstream(service: &str, failure: UpstreamFailure, message: String) -> ClimateError {
    warn!("{} request failed: {}", service, message);
    ClimateError::upstream(service, failure, message)
}

/// Open-Meteo response structures
mod schema {
    use super::{
        ClimateError, Coordinates, DailySample, DailySampleSeries, DaySpan, Location, NaiveDate,
        Result, warn,
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                name: result.name,
                country: result.country,
                admin1: result.admin1,
                coordinates: Coordinates::new(result.latitude, result.longitude),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ArchiveResponse {
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Option<Vec<String>>,
        pub temperature_2m_mean: Option<Vec<Option<f64>>>,
        pub precipitation_sum: Option<Vec<Option<f64>>>,
    }

    impl DailyData {
        pub fn into_series(self, span: DaySpan) -> Result<DailySampleSeries> {
            let missing = |field: &str| {
                ClimateError::data_unavailable(format!("archive response has no daily {field}"))
            };
            let time = self.time.ok_or_else(|| missing("time"))?;
            let temperatures = self
                .temperature_2m_mean
                .ok_or_else(|| missing("temperature_2m_mean"))?;
            let precipitation = self
                .precipitation_sum
                .ok_or_else(|| missing("precipitation_sum"))?;

            if temperatures.len() != time.len() || precipitation.len() != time.len() {
                return Err(ClimateError::data_unavailable(format!(
                    "daily fields have different lengths (time {}, temperature {}, precipitation {})",
                    time.len(),
                    temperatures.len(),
                    precipitation.len()
                )));
            }

            // An empty series is passed on; the aggregator reports it.
            if !time.is_empty() && time.len() != span.day_count() {
                return Err(ClimateError::data_unavailable(format!(
                    "expected {} days from {} to {}, archive returned {}",
                    span.day_count(),
                    span.start,
                    span.end,
                    time.len()
                )));
            }

            let mut series = DailySampleSeries::default();
            for ((day, temperature), precipitation) in
                time.iter().zip(temperatures).zip(precipitation)
            {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                    ClimateError::data_unavailable(format!("invalid date '{day}' in archive response"))
                })?;
                if !(span.start..=span.end).contains(&date) {
                    return Err(ClimateError::data_unavailable(format!(
                        "archive returned {} outside {} to {}",
                        date, span.start, span.end
                    )));
                }

                match (temperature, precipitation) {
                    (Some(temperature), Some(precipitation)) => {
                        series
                            .samples
                            .push(DailySample::new(date, temperature, precipitation));
                    }
                    _ => {
                        warn!("Archive has no values for {}, skipping day", date);
                        series.missing_days += 1;
                    }
                }
            }

            Ok(series)
        }
    }
}
