//! Threshold-based risk classification
//!
//! All risk and local status derivations go through [`RiskThresholds`] so the
//! cut-off points live in one place.

use serde::{Deserialize, Serialize};

use crate::models::{RiskLevel, SensorStatus};

/// Input signals for a risk classification
///
/// `primary` is the main signal (e.g. humidity %, or the reading value);
/// `secondary` is an optional companion signal (e.g. tilt in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub primary: f64,
    pub secondary: Option<f64>,
}

impl RiskMetrics {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn primary_only(primary: f64) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}

/// Cut-off points for the three risk levels
///
/// High wins when either signal is strictly above its high bound; Moderate when
/// either signal reaches its moderate bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub primary_high: f64,
    pub primary_moderate: f64,
    pub secondary_high: f64,
    pub secondary_moderate: f64,
}

impl RiskThresholds {
    /// Humidity 80/60 %, tilt 30/15 degrees
    pub const DEFAULT: RiskThresholds = RiskThresholds {
        primary_high: 80.0,
        primary_moderate: 60.0,
        secondary_high: 30.0,
        secondary_moderate: 15.0,
    };

    /// Classify a pair of signals. Rules are evaluated high to low, first match wins.
    ///
    /// A NaN signal compares false against every bound and so never raises the level.
    pub fn classify(&self, metrics: &RiskMetrics) -> RiskLevel {
        let primary = metrics.primary;
        let secondary = metrics.secondary;

        if primary > self.primary_high || secondary.is_some_and(|s| s > self.secondary_high) {
            RiskLevel::High
        } else if primary >= self.primary_moderate
            || secondary.is_some_and(|s| s >= self.secondary_moderate)
        {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classify with the default thresholds
pub fn classify_risk(metrics: &RiskMetrics) -> RiskLevel {
    RiskThresholds::DEFAULT.classify(metrics)
}

/// Local status for a single reading value (> 80 alert, >= 60 warning, else ok)
pub fn classify_value(value: f64) -> SensorStatus {
    classify_risk(&RiskMetrics::primary_only(value)).into()
}
