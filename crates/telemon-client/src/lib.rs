//! telemon client library
//!
//! Resolves the configured backend endpoint, talks to it over a [`Transport`],
//! and returns validated sensor and reading data.
//!
//! # Example
//!
//! ```rust,no_run
//! use telemon_client::{EndpointStore, TelemetryClient};
//! use telemon_core::{summarize, window_for_chart, DEFAULT_CHART_WINDOW};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EndpointStore::open_default()?;
//!     store.set("http://192.168.0.10:8080")?;
//!
//!     let client = TelemetryClient::new(store)?;
//!     for sensor in client.list_sensors().await? {
//!         println!("{} {} {}", sensor.id, sensor.name, sensor.status);
//!     }
//!
//!     let readings = client.list_readings(Some("1")).await?;
//!     let chart = window_for_chart(&readings, DEFAULT_CHART_WINDOW);
//!     if let Some(stats) = summarize(&readings) {
//!         println!("{} readings, mean {:.1} ({} charted)", stats.count, stats.mean, chart.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module serves an axum router on an ephemeral port:
//!
//! ```rust,ignore
//! use telemon_client::testing::TestServer;
//!
//! let server = TestServer::start(fake_backend()).await?;
//! let sensors = server.client.list_sensors().await?;
//! ```

mod client;
mod config;
mod error;
pub mod testing;
mod transport;
mod types;

pub use client::TelemetryClient;
pub use config::{
    validate_url, Endpoint, EndpointConfig, EndpointSource, EndpointStore, DEFAULT_BASE_URL,
};
pub use error::{ConfigError, Result, TelemetryError};
pub use transport::{HttpTransport, Transport};
pub use types::ConnectionReport;

// Re-export core types for convenience
pub use telemon_core::{Reading, Sensor, SensorStatus};
