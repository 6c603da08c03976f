//! Sensor model

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::status::SensorStatus;

/// A measurement point as listed by the backend
///
/// `status` is echoed verbatim from the server; it is never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    pub status: SensorStatus,
    #[serde(alias = "valor", alias = "current_value")]
    pub current_value: f64,
}

/// Accepts an identifier sent either as a JSON string or as a number.
pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(s) if s.trim().is_empty() => Err(de::Error::custom("empty identifier")),
        RawId::Text(s) => Ok(s),
        RawId::Number(n) => Ok(n.to_string()),
    }
}
