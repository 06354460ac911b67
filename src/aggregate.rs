//! Reduce a daily sample series to period averages

use crate::Result;
use crate::error::ClimateError;
use crate::models::{DailySampleSeries, PeriodAverages};

/// Arithmetic mean of temperature and precipitation across all samples.
///
/// Values are summed in sorted order so any permutation of the same series
/// gives a bit-identical result.
pub fn aggregate(series: &DailySampleSeries) -> Result<PeriodAverages> {
    if series.is_empty() {
        return Err(ClimateError::insufficient_data(
            "daily sample series is empty",
        ));
    }

    let count = series.len() as f64;
    let avg_temperature = ordered_sum(series.samples.iter().map(|s| s.mean_temperature)) / count;
    let avg_precipitation = ordered_sum(series.samples.iter().map(|s| s.precipitation)) / count;

    Ok(PeriodAverages {
        avg_temperature,
        avg_precipitation,
    })
}

fn ordered_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySample;
    use chrono::NaiveDate;

    fn sample(day: u32, temperature: f64, precipitation: f64) -> DailySample {
        DailySample::new(
            NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            temperature,
            precipitation,
        )
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let err = aggregate(&DailySampleSeries::default()).unwrap_err();
        assert!(matches!(err, ClimateError::InsufficientData { .. }));
    }

    #[test]
    fn test_single_sample() {
        let series = DailySampleSeries::new(vec![sample(1, 10.0, 2.0)]);
        let averages = aggregate(&series).unwrap();
        assert_eq!(averages.avg_temperature, 10.0);
        assert_eq!(averages.avg_precipitation, 2.0);
    }

    #[test]
    fn test_mean_of_several_days() {
        let series = DailySampleSeries::new(vec![
            sample(1, 20.0, 0.0),
            sample(2, 22.0, 1.0),
            sample(3, 24.0, 0.5),
        ]);
        let averages = aggregate(&series).unwrap();
        assert!((averages.avg_temperature - 22.0).abs() < 1e-9);
        assert!((averages.avg_precipitation - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_order_independent() {
        let samples = vec![
            sample(1, 0.1, 12.7),
            sample(2, 1e16, 0.3),
            sample(3, -1e16, 0.2),
            sample(4, 3.3, 7.9),
            sample(5, 0.7, 0.1),
        ];
        let forward = aggregate(&DailySampleSeries::new(samples.clone())).unwrap();

        let mut reversed = samples.clone();
        reversed.reverse();
        let backward = aggregate(&DailySampleSeries::new(reversed)).unwrap();

        let mut rotated = samples;
        rotated.rotate_left(2);
        let shifted = aggregate(&DailySampleSeries::new(rotated)).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward, shifted);
    }
}
