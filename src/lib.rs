//! perfgraph - Performance Log Loader & Chart Generator
//!
//! Loads a performance-log CSV into a Polars table and prepares it for plotting.

pub mod charts;
pub mod config;
pub mod data;
#[cfg(feature = "gui")]
pub mod gui;
pub mod stats;

pub use config::Settings;
pub use data::{PerfLogLoader, TableShape};
