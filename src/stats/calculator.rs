//! Statistics Calculator Module
//! Descriptive statistics for each metric column of the performance log.

use crate::data::{DataProcessor, ProcessorError};
use polars::prelude::*;
use rayon::prelude::*;

/// Statistics for a single metric column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p05: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
            p05: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(name: &str, values: &[f64]) -> ColumnStats {
        let n = values.len();
        if n == 0 {
            return ColumnStats {
                name: name.to_string(),
                ..Default::default()
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        // Sample variance (n-1); undefined for a single value
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            f64::NAN
        };

        ColumnStats {
            name: name.to_string(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[n - 1],
            p95: Self::percentile(&sorted, 95.0),
            p05: Self::percentile(&sorted, 5.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Compute statistics for every listed column in parallel, in request order.
    pub fn compute_all_stats_parallel(
        df: &DataFrame,
        columns: &[String],
    ) -> Result<Vec<ColumnStats>, ProcessorError> {
        let series = DataProcessor::metric_series(df, columns)?;

        // Use rayon for parallel computation
        Ok(series
            .par_iter()
            .map(|s| Self::compute_descriptive_stats(&s.name, &s.values()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptive_stats_basic() {
        let stats = StatsCalculator::compute_descriptive_stats("t", &[4.0, 1.0, 3.0, 2.0]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.variance - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_undefined_spread() {
        let stats = StatsCalculator::compute_descriptive_stats("x", &[5.0]);

        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.p95, 5.0);
        assert!(stats.std.is_nan());
        assert!(stats.variance.is_nan());
    }

    #[test]
    fn empty_values_give_nan() {
        let stats = StatsCalculator::compute_descriptive_stats("empty", &[]);
        assert_eq!(stats.name, "empty");
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn percentile_interpolates_like_numpy() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        // numpy.percentile([1,2,3,4,5], 95) == 4.8
        assert!((StatsCalculator::percentile(&sorted, 95.0) - 4.8).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 5.0) - 1.2).abs() < 1e-12);
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 3.0);
    }

    #[test]
    fn parallel_stats_keep_request_order() {
        let df = df!(
            "a" => [1.0, 2.0, 3.0],
            "b" => [10i64, 20, 30],
            "c" => [5.0, 5.0, 5.0],
        )
        .unwrap();
        let columns = vec!["c".to_string(), "a".to_string(), "b".to_string()];

        let stats = StatsCalculator::compute_all_stats_parallel(&df, &columns).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(stats[2].mean, 20.0);
        assert_eq!(stats[0].std, 0.0);
    }
}
