//! Server-declared vs locally derived status for one sensor

use serde::{Deserialize, Serialize};

use super::risk::classify_value;
use super::series::{latest_reading, readings_for};
use crate::models::{Reading, Sensor, SensorStatus};

/// Both status paths for a sensor, kept side by side
///
/// `declared` is what the backend says; `local` is classified from the most
/// recent reading of this sensor, when there is one. The two are not assumed
/// to agree and neither overrides the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub sensor_id: String,
    pub declared: SensorStatus,
    pub local: Option<SensorStatus>,
    pub last_reading: Option<Reading>,
}

impl StatusView {
    /// Build the view from a sensor and any readings (other sensors' readings are ignored)
    pub fn derive(sensor: &Sensor, readings: &[Reading]) -> Self {
        let own: Vec<Reading> = readings_for(readings, &sensor.id).cloned().collect();
        let last_reading = latest_reading(&own).cloned();

        Self {
            sensor_id: sensor.id.clone(),
            declared: sensor.status,
            local: last_reading.as_ref().map(|r| classify_value(r.value)),
            last_reading,
        }
    }

    /// `None` when there is nothing local to compare against
    pub fn agrees(&self) -> Option<bool> {
        self.local.map(|local| local == self.declared)
    }
}
