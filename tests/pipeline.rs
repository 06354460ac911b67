//! End-to-end pipeline tests with in-process fakes for the external services

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use trip_climate::{
    ClimateArchive, ClimateError, ClimateService, Coordinates, DailySample, DailySampleSeries,
    Geocoder, Location, NormalizedDayRange, PrecipitationBand, SummaryCache,
};

#[derive(Default)]
struct FakeGeocoder {
    places: HashMap<String, Coordinates>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    fn with(mut self, place: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(place.to_string(), Coordinates::new(latitude, longitude));
        self
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn locate(&self, place: &str) -> trip_climate::Result<Location> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.places
            .get(place)
            .map(|coordinates| Location::new(place, *coordinates))
            .ok_or_else(|| ClimateError::not_found(place))
    }
}

/// Archive that answers every day of the requested range with fixed values
struct FakeArchive {
    temperature: f64,
    precipitation: f64,
    empty: bool,
    requests: Mutex<Vec<NormalizedDayRange>>,
}

impl FakeArchive {
    fn new(temperature: f64, precipitation: f64) -> Self {
        Self {
            temperature,
            precipitation,
            empty: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self {
            empty: true,
            ..Self::new(0.0, 0.0)
        }
    }

    fn requests(&self) -> Vec<NormalizedDayRange> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClimateArchive for FakeArchive {
    async fn daily_samples(
        &self,
        _coordinates: Coordinates,
        range: &NormalizedDayRange,
    ) -> trip_climate::Result<DailySampleSeries> {
        self.requests.lock().unwrap().push(range.clone());
        if self.empty {
            return Ok(DailySampleSeries::default());
        }
        Ok(range
            .segments()
            .iter()
            .flat_map(|span| span.start.iter_days().take(span.day_count()))
            .map(|date| DailySample::new(date, self.temperature, self.precipitation))
            .collect())
    }
}

/// Archive whose request never completes
struct HangingArchive;

#[async_trait]
impl ClimateArchive for HangingArchive {
    async fn daily_samples(
        &self,
        _coordinates: Coordinates,
        _range: &NormalizedDayRange,
    ) -> trip_climate::Result<DailySampleSeries> {
        std::future::pending().await
    }
}

fn paris() -> Arc<FakeGeocoder> {
    Arc::new(FakeGeocoder::default().with("Paris", 48.8566, 2.3522))
}

fn service(
    geocoder: Arc<FakeGeocoder>,
    archive: Arc<dyn ClimateArchive>,
    cache: SummaryCache,
) -> ClimateService {
    ClimateService::new(geocoder, archive, cache)
}

#[tokio::test]
async fn paris_in_july_is_warm_and_dry() {
    let archive = Arc::new(FakeArchive::new(22.0, 0.5));
    let service = service(paris(), archive.clone(), SummaryCache::disabled());

    let summary = service
        .summarize("Paris", "2025-07-01", "2025-07-05")
        .await
        .unwrap();

    assert_eq!(summary.location.coordinates, Coordinates::new(48.8566, 2.3522));
    assert_eq!(summary.sample_days, 5);
    assert_eq!(summary.band, PrecipitationBand::VeryLow);
    assert_eq!(archive.requests()[0].day_count(), 5);

    let text = summary.to_string();
    assert!(text.contains("22.0°C"));
    assert!(text.contains("Very low"));
    assert!(text.contains("07-01 to 07-05"));
}

#[tokio::test]
async fn unknown_place_is_not_found_without_archive_call() {
    let archive = Arc::new(FakeArchive::new(22.0, 0.5));
    let service = service(paris(), archive.clone(), SummaryCache::disabled());

    let err = service
        .summarize("Qwxyzplace", "2025-07-01", "2025-07-05")
        .await
        .unwrap_err();

    assert!(matches!(err, ClimateError::NotFound { .. }));
    assert_eq!(err.stage(), "geocoding");
    assert!(archive.requests().is_empty());
}

#[tokio::test]
async fn empty_archive_series_is_insufficient_data() {
    let service = service(paris(), Arc::new(FakeArchive::empty()), SummaryCache::disabled());

    let err = service
        .summarize("Paris", "2025-07-01", "2025-07-05")
        .await
        .unwrap_err();

    assert!(matches!(err, ClimateError::InsufficientData { .. }));
}

#[tokio::test]
async fn year_boundary_trip_is_split_into_two_spans() {
    let archive = Arc::new(FakeArchive::new(3.0, 4.0));
    let service = service(paris(), archive.clone(), SummaryCache::disabled());

    let summary = service
        .summarize("Paris", "2025-12-28", "2026-01-03")
        .await
        .unwrap();

    let requested = archive.requests();
    assert_eq!(requested.len(), 1);
    let range = &requested[0];
    assert!(range.is_split());
    let spans: Vec<(String, String)> = range
        .segments()
        .iter()
        .map(|span| (span.start.to_string(), span.end.to_string()))
        .collect();
    assert_eq!(
        spans,
        [
            ("2024-12-28".to_string(), "2024-12-31".to_string()),
            ("2024-01-01".to_string(), "2024-01-03".to_string()),
        ]
    );

    assert_eq!(summary.sample_days, 7);
    assert_eq!(summary.period, "12-28 to 01-03");
    assert_eq!(summary.band, PrecipitationBand::Moderate);
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let geocoder = paris();
    let archive = Arc::new(FakeArchive::new(22.0, 0.5));
    let service = service(geocoder.clone(), archive.clone(), SummaryCache::new(8));

    let first = service
        .summarize("Paris", "2025-07-01", "2025-07-05")
        .await
        .unwrap();
    // same month/day window in another year
    let second = service
        .summarize(" Paris", "2027-07-01", "2027-07-05")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(archive.requests().len(), 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let geocoder = paris();
    let service = service(
        geocoder.clone(),
        Arc::new(FakeArchive::empty()),
        SummaryCache::new(8),
    );

    for _ in 0..2 {
        let err = service
            .summarize("Paris", "2025-07-01", "2025-07-05")
            .await
            .unwrap_err();
        assert!(matches!(err, ClimateError::InsufficientData { .. }));
    }
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cancelled_request_returns_cancelled() {
    let service = service(paris(), Arc::new(HangingArchive), SummaryCache::disabled());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = service
        .summarize_with_cancel("Paris", "2025-07-01", "2025-07-05", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ClimateError::Cancelled));
}

#[tokio::test]
async fn already_cancelled_token_skips_all_calls() {
    let geocoder = paris();
    let service = service(
        geocoder.clone(),
        Arc::new(FakeArchive::new(22.0, 0.5)),
        SummaryCache::disabled(),
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = service
        .summarize_with_cancel("Paris", "2025-07-01", "2025-07-05", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ClimateError::Cancelled));
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrent_invocations_are_independent() {
    let geocoder = Arc::new(
        FakeGeocoder::default()
            .with("Paris", 48.8566, 2.3522)
            .with("Lisbon", 38.7167, -9.1333),
    );
    let archive = Arc::new(FakeArchive::new(18.0, 2.0));
    let service = service(geocoder, archive, SummaryCache::new(8));

    let (paris, lisbon) = tokio::join!(
        service.summarize("Paris", "2025-03-01", "2025-03-10"),
        service.summarize("Lisbon", "2025-03-01", "2025-03-03"),
    );

    let paris = paris.unwrap();
    let lisbon = lisbon.unwrap();
    assert_eq!(paris.sample_days, 10);
    assert_eq!(lisbon.sample_days, 3);
    assert_eq!(lisbon.location.name, "Lisbon");
    assert_eq!(paris.band, PrecipitationBand::Low);
}

#[tokio::test]
async fn text_boundary_reports_errors_as_values() {
    let service = service(
        paris(),
        Arc::new(FakeArchive::new(22.0, 0.5)),
        SummaryCache::disabled(),
    );

    let err = service
        .summarize_text("Paris", "2025-07-05", "2025-07-01")
        .await
        .unwrap_err();
    assert!(matches!(err, ClimateError::Validation { .. }));
    assert!(err.user_message().contains("before start date"));
}
