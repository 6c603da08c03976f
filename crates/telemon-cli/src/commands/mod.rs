//! Command implementations for telemon

pub mod analyze;
pub mod config;
pub mod connection;
pub mod readings;
pub mod sensors;

pub use analyze::{chart, risk, stats, status};
pub use connection::test_connection;
pub use readings::{readings, submit};
pub use sensors::sensors;
