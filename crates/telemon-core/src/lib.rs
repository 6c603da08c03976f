//! telemon-core - Sensor model and derivations
//!
//! Holds the data shapes exchanged with the telemetry backend and the pure
//! functions computed over them: risk classification, summary statistics and
//! chart windows. Nothing in this crate performs I/O.

pub mod derivation;
pub mod error;
pub mod models;

pub use derivation::{
    classify_risk, classify_value, latest_reading, readings_for, summarize, window_for_chart,
    RiskMetrics, RiskThresholds, StatsSummary, StatusView, DEFAULT_CHART_WINDOW,
};
pub use error::ParseStatusError;
pub use models::*;
