//! Data models shared between the client and the derivations

pub mod reading;
pub mod sensor;
pub mod status;

pub use reading::{NewReading, Reading};
pub use sensor::Sensor;
pub use status::{RiskLevel, SensorStatus};
