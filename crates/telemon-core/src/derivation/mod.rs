//! Pure derivations over sensor and reading data
//!
//! Every function here is a total transform: empty input yields an explicit
//! "no data" result (`None` or an empty slice), never an error.

mod risk;
mod series;
mod stats;
mod view;

pub use risk::{classify_risk, classify_value, RiskMetrics, RiskThresholds};
pub use series::{latest_reading, readings_for, window_for_chart, DEFAULT_CHART_WINDOW};
pub use stats::{summarize, StatsSummary};
pub use view::StatusView;
