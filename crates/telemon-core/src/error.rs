//! Error types for model parsing

use thiserror::Error;

/// Returned when a status label is not one the backend vocabulary knows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sensor status: {0:?}")]
pub struct ParseStatusError(pub String);
