//! Data Processor Module
//! Row sampling, z-score standardization and series extraction for plotting.

use crate::data::loader::is_numeric;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::statistics::Statistics;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Column is not numeric: {0}")]
    NotNumeric(String),
}

/// One numeric column as (row index, value) points.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl MetricSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }
}

/// Handles data transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Pick the columns to plot.
    ///
    /// An empty request selects every numeric column.
    pub fn select_columns(
        df: &DataFrame,
        requested: &[String],
    ) -> Result<Vec<String>, ProcessorError> {
        if requested.is_empty() {
            return Ok(df
                .get_columns()
                .iter()
                .filter(|col| is_numeric(col.dtype()))
                .map(|col| col.name().to_string())
                .collect());
        }

        requested
            .iter()
            .map(|name| Self::check_numeric(df, name).map(|_| name.clone()))
            .collect()
    }

    fn check_numeric(df: &DataFrame, name: &str) -> Result<(), ProcessorError> {
        let col = df
            .column(name)
            .map_err(|_| ProcessorError::UnknownColumn(name.to_string()))?;
        if !is_numeric(col.dtype()) {
            return Err(ProcessorError::NotNumeric(name.to_string()));
        }
        Ok(())
    }

    /// Uniform random subset of `n` rows, keeping the original row order.
    ///
    /// The same seed always selects the same rows.
    pub fn sample_rows(
        df: &DataFrame,
        n: usize,
        seed: Option<u64>,
    ) -> Result<DataFrame, ProcessorError> {
        let height = df.height();
        if n >= height {
            return Ok(df.clone());
        }

        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut mask = vec![false; height];
        for idx in rand::seq::index::sample(&mut rng, height, n) {
            mask[idx] = true;
        }

        debug!(height, n, seed, "sampling rows");
        let mask = BooleanChunked::from_slice("mask".into(), &mask);
        Ok(df.filter(&mask)?)
    }

    /// Standard score of each value: (x - mean) / population std.
    ///
    /// Empty or constant input yields NaN for every element.
    pub fn zscore(values: &[f64]) -> Vec<f64> {
        let mean = values.iter().mean();
        let std = values.iter().population_std_dev();

        if values.is_empty() || std == 0.0 || std.is_nan() {
            return vec![f64::NAN; values.len()];
        }

        values.iter().map(|v| (v - mean) / std).collect()
    }

    /// Replace each listed column with its z-scores; nulls and NaN become null.
    pub fn standardize(df: &DataFrame, columns: &[String]) -> Result<DataFrame, ProcessorError> {
        for name in columns {
            Self::check_numeric(df, name)?;
        }

        let mut out: Vec<Column> = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            if !columns.iter().any(|c| c.as_str() == col.name().as_str()) {
                out.push(col.clone());
                continue;
            }

            let cast = col.cast(&DataType::Float64)?;
            let raw: Vec<Option<f64>> = cast
                .f64()?
                .into_iter()
                .map(|v| v.filter(|v| !v.is_nan()))
                .collect();
            let present: Vec<f64> = raw.iter().flatten().copied().collect();
            let scored = Self::zscore(&present);

            let mut scored = scored.into_iter();
            let values: Vec<Option<f64>> = raw
                .iter()
                .map(|v| v.and_then(|_| scored.next()))
                .collect();

            debug!(column = %col.name(), "standardized column");
            out.push(Column::new(col.name().clone(), values));
        }

        Ok(DataFrame::new(out)?)
    }

    /// Extract plot series for the given columns, in request order.
    ///
    /// X is the row index; null and NaN values are skipped.
    pub fn metric_series(
        df: &DataFrame,
        columns: &[String],
    ) -> Result<Vec<MetricSeries>, ProcessorError> {
        columns
            .iter()
            .map(|name| {
                Self::check_numeric(df, name)?;
                let cast = df.column(name)?.cast(&DataType::Float64)?;
                let points = cast
                    .f64()?
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, v)| match v {
                        Some(v) if !v.is_nan() => Some((i as f64, v)),
                        _ => None,
                    })
                    .collect();

                Ok(MetricSeries {
                    name: name.clone(),
                    points,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "name" => ["a", "b", "c", "d", "e", "f"],
            "elapsed_ms" => [10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
            "calls" => [1i64, 1, 1, 1, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn zscore_matches_population_formula() {
        let z = DataProcessor::zscore(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // mean 5, population std 2
        assert!((z[0] + 1.5).abs() < 1e-12);
        assert!((z[7] - 2.0).abs() < 1e-12);

        let mean: f64 = z.iter().sum::<f64>() / z.len() as f64;
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn zscore_of_constant_is_nan() {
        let z = DataProcessor::zscore(&[3.0, 3.0, 3.0]);
        assert!(z.iter().all(|v| v.is_nan()));
        assert!(DataProcessor::zscore(&[]).is_empty());
    }

    #[test]
    fn standardize_keeps_other_columns() {
        let df = sample_frame();
        let out = DataProcessor::standardize(&df, &["elapsed_ms".to_string()]).unwrap();

        assert_eq!(out.shape(), df.shape());
        let names: Vec<Option<&str>> = out
            .column("name")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(names[0], Some("a"));
        assert_eq!(names.len(), 6);

        let scored: Vec<f64> = out
            .column("elapsed_ms")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(scored[0] < 0.0 && scored[5] > 0.0);
    }

    #[test]
    fn standardize_rejects_text_column() {
        let df = sample_frame();
        let err = DataProcessor::standardize(&df, &["name".to_string()]).unwrap_err();
        assert!(matches!(err, ProcessorError::NotNumeric(_)));
    }

    #[test]
    fn sample_rows_is_reproducible_and_ordered() {
        let df = sample_frame();
        let a = DataProcessor::sample_rows(&df, 3, Some(7)).unwrap();
        let b = DataProcessor::sample_rows(&df, 3, Some(7)).unwrap();

        assert_eq!(a.height(), 3);
        assert!(a.equals(&b));

        let kept: Vec<f64> = a
            .column("elapsed_ms")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sample_larger_than_table_returns_everything() {
        let df = sample_frame();
        let out = DataProcessor::sample_rows(&df, 100, None).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn select_columns_defaults_to_numeric() {
        let df = sample_frame();
        assert_eq!(
            DataProcessor::select_columns(&df, &[]).unwrap(),
            vec!["elapsed_ms", "calls"]
        );
        assert!(matches!(
            DataProcessor::select_columns(&df, &["nope".to_string()]),
            Err(ProcessorError::UnknownColumn(_))
        ));
    }

    #[test]
    fn metric_series_uses_row_index() {
        let df = df!("latency" => [Some(1.5), None, Some(2.5)]).unwrap();
        let series = DataProcessor::metric_series(&df, &["latency".to_string()]).unwrap();

        assert_eq!(series[0].name, "latency");
        assert_eq!(series[0].points, vec![(0.0, 1.5), (2.0, 2.5)]);
    }
}
