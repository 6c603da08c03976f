//! Error types for telemetry client operations

use thiserror::Error;

/// Result type alias for telemetry client operations
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised by the endpoint config store
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The URL does not use an http/https scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing the config file failed
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config document could not be encoded
    #[error("Failed to encode config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors that can occur during telemetry client operations
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// No base URL is configured
    #[error("No backend endpoint configured")]
    UnconfiguredEndpoint,

    /// The configured base URL is not usable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport or connectivity failure, including non-2xx responses
    #[error("Network error: {0}")]
    Network(String),

    /// The payload does not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Endpoint config store failure
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TelemetryError {
    /// Create a network error from anything printable
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
