//! Stats module - field summaries and correlation

mod calculator;

pub use calculator::{CorrelationStats, FieldSummary, StatsCalculator, SIGNIFICANCE_THRESHOLD};
