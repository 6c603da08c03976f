//! Summary statistics over reading values

use serde::{Deserialize, Serialize};

use crate::models::Reading;

/// count/min/max/mean over a non-empty sequence of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl StatsSummary {
    /// Summarize raw values; `None` when there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;

        let mut summary = StatsSummary {
            count: 1,
            min: first,
            max: first,
            mean: 0.0,
        };
        let mut sum = first;
        for value in values {
            summary.count += 1;
            summary.min = summary.min.min(value);
            summary.max = summary.max.max(value);
            sum += value;
        }

        // Rounding in the sum can push the quotient a hair past the extremes.
        // NaN bounds cannot be clamped to, so the raw quotient is kept.
        let mean = sum / summary.count as f64;
        summary.mean = if summary.min <= summary.max {
            mean.clamp(summary.min, summary.max)
        } else {
            mean
        };
        Some(summary)
    }

    /// Copy rounded to one decimal for display
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            min: round1(self.min),
            max: round1(self.max),
            mean: round1(self.mean),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summarize reading values; `None` for an empty slice
pub fn summarize(readings: &[Reading]) -> Option<StatsSummary> {
    StatsSummary::from_values(readings.iter().map(|r| r.value))
}
