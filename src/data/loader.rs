//! Perf Log Loader Module
//! Handles CSV file loading and column extraction using Polars.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Location of the performance log relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "test/performance/perf_log.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("CSV file is empty: {0}")]
    Empty(PathBuf),
    #[error("No data loaded")]
    NoData,
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Rows and columns of a loaded table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows x {} columns", self.rows, self.columns)
    }
}

/// Whether a dtype is plotted as a metric.
pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Loads the performance log into a Polars DataFrame.
pub struct PerfLogLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for PerfLogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfLogLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file, replacing any previously loaded table.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame, LoaderError> {
        let path = file_path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        // Dtypes are inferred over the whole file so late wider values still parse.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|err| match err {
                PolarsError::NoData(_) => LoaderError::Empty(path.to_path_buf()),
                other => LoaderError::Csv(other),
            })?;

        if df.width() == 0 {
            return Err(LoaderError::Empty(path.to_path_buf()));
        }

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded performance log"
        );

        self.file_path = Some(path.to_path_buf());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Shape of the loaded table; 0x0 when nothing is loaded.
    pub fn shape(&self) -> TableShape {
        self.df
            .as_ref()
            .map(|df| TableShape {
                rows: df.height(),
                columns: df.width(),
            })
            .unwrap_or_default()
    }

    /// Get list of column names from loaded DataFrame.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Column names paired with their inferred dtype.
    pub fn column_types(&self) -> Vec<(String, String)> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.dtype().to_string()))
            .collect()
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Values of one column as f64, skipping nulls and NaN.
    pub fn column_values(&self, column: &str) -> Result<Vec<f64>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        let col = df
            .column(column)
            .map_err(|_| LoaderError::UnknownColumn(column.to_string()))?;

        let values = col.cast(&DataType::Float64)?;
        let values: Vec<f64> = values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();

        debug!(column, count = values.len(), "extracted column values");
        Ok(values)
    }

    pub fn row_count(&self) -> usize {
        self.shape().rows
    }

    pub fn column_count(&self) -> usize {
        self.shape().columns
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn shape_matches_file_contents() {
        let file = write_csv("name,elapsed_ms,calls\nparse,12.5,3\nrender,40.0,1\nsave,3.25,7\n");
        let mut loader = PerfLogLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.shape(), TableShape { rows: 3, columns: 3 });
        assert_eq!(loader.columns(), vec!["name", "elapsed_ms", "calls"]);
        assert_eq!(loader.file_path(), Some(file.path()));
    }

    #[test]
    fn numeric_columns_skip_strings() {
        let file = write_csv("name,elapsed_ms,calls\nparse,12.5,3\nrender,40.0,1\n");
        let mut loader = PerfLogLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.numeric_columns(), vec!["elapsed_ms", "calls"]);
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let file = write_csv("a,b,c\n");
        let mut loader = PerfLogLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.shape(), TableShape { rows: 0, columns: 3 });
    }

    #[test]
    fn late_float_row_widens_integer_column() {
        let mut contents = String::from("run,latency\n");
        for i in 0..10_001 {
            contents.push_str(&format!("{i},{i}\n"));
        }
        contents.push_str("10001,1.5\n");
        let file = write_csv(&contents);

        let mut loader = PerfLogLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.column("latency").unwrap().dtype(), &DataType::Float64);
        assert_eq!(loader.shape(), TableShape { rows: 10_002, columns: 2 });
        assert_eq!(loader.column_values("latency").unwrap().last(), Some(&1.5));
    }

    #[test]
    fn zero_byte_file_is_empty() {
        let file = write_csv("");
        let mut loader = PerfLogLoader::new();
        let err = loader.load_csv(file.path()).unwrap_err();

        assert!(matches!(err, LoaderError::Empty(_)));
        assert_eq!(loader.shape(), TableShape::default());
    }

    #[test]
    fn missing_file_is_reported() {
        let mut loader = PerfLogLoader::new();
        let err = loader.load_csv("does/not/exist.csv").unwrap_err();

        assert!(matches!(err, LoaderError::NotFound(_)));
        assert_eq!(loader.shape(), TableShape::default());
    }

    #[test]
    fn column_values_drop_nulls() {
        let file = write_csv("elapsed_ms\n1.0\n\n3.0\n");
        let mut loader = PerfLogLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.column_values("elapsed_ms").unwrap(), vec![1.0, 3.0]);
        assert!(matches!(
            loader.column_values("missing"),
            Err(LoaderError::UnknownColumn(_))
        ));
    }

    #[test]
    fn values_before_load_fail() {
        let loader = PerfLogLoader::new();
        assert!(matches!(loader.column_values("x"), Err(LoaderError::NoData)));
    }
}
