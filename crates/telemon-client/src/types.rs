//! Request and response types for the telemetry client

use serde::{Deserialize, Serialize};

/// Outcome of a connectivity probe, meant to be shown to a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
    /// Number of sensors the backend listed (only on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ConnectionReport {
    pub fn ok(count: usize) -> Self {
        Self {
            success: true,
            message: format!("Connection established, {} sensor(s) available", count),
            count: Some(count),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            count: None,
        }
    }
}
