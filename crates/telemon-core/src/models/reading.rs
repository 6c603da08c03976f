//! Reading model

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::sensor::identifier;

/// One timestamped observation attributed to a sensor
///
/// Readings are immutable once the backend has assigned their `id`.
/// The timestamp is kept exactly as received; use [`Reading::timestamp_utc`]
/// to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: u64,
    #[serde(deserialize_with = "identifier", alias = "sensor_id")]
    pub sensor_id: String,
    pub value: f64,
    pub timestamp: String,
}

impl Reading {
    /// Parse the timestamp as RFC 3339, or as a zone-less ISO-8601 stamp taken as UTC
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Body of a reading submission
///
/// The server is authoritative for the final `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub sensor_id: String,
    pub value: f64,
    pub timestamp: String,
}

impl NewReading {
    /// Stamp a new reading with the current time
    pub fn now(sensor_id: impl Into<String>, value: f64) -> Self {
        Self::at(sensor_id, value, Utc::now())
    }

    /// Stamp a new reading with an explicit time (millisecond precision, `Z` suffix)
    pub fn at(sensor_id: impl Into<String>, value: f64, at: DateTime<Utc>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(timestamp: &str) -> Reading {
        Reading {
            id: 1,
            sensor_id: "1".to_string(),
            value: 10.0,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_parse_backend_reading() {
        let reading: Reading = serde_json::from_value(json!({
            "id": 42,
            "sensorId": 3,
            "value": 45.2,
            "timestamp": "2025-03-01T10:15:00.000Z"
        }))
        .unwrap();

        assert_eq!(reading.id, 42);
        assert_eq!(reading.sensor_id, "3");
        assert_eq!(reading.value, 45.2);
    }

    #[test]
    fn test_missing_sensor_id_rejected() {
        let result = serde_json::from_value::<Reading>(json!({
            "id": 42,
            "value": 45.2,
            "timestamp": "2025-03-01T10:15:00.000Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_rfc3339_with_offset() {
        let ts = reading("2025-03-01T10:15:00-03:00").timestamp_utc().unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T13:15:00+00:00");
    }

    #[test]
    fn test_timestamp_naive_is_utc() {
        let ts = reading("2025-03-01T10:15:00.250").timestamp_utc().unwrap();
        assert_eq!(
            ts.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2025-03-01T10:15:00.250Z"
        );
        assert!(reading("2025-03-01T10:15:00").timestamp_utc().is_some());
    }

    #[test]
    fn test_timestamp_garbage() {
        assert!(reading("yesterday").timestamp_utc().is_none());
    }

    #[test]
    fn test_new_reading_body() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap();
        let body = serde_json::to_value(NewReading::at("4", 12.5, at)).unwrap();
        assert_eq!(
            body,
            json!({
                "sensorId": "4",
                "value": 12.5,
                "timestamp": "2025-03-01T10:15:00.000Z"
            })
        );
    }
}
