//! Stats module - Descriptive statistics per metric

mod calculator;

pub use calculator::{ColumnStats, StatsCalculator};
