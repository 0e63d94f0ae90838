//! Data module - CSV loading and processing

mod loader;
mod processor;

pub use loader::{LoaderError, PerfLogLoader, TableShape, DEFAULT_LOG_PATH};
pub use processor::{DataProcessor, MetricSeries, ProcessorError};
