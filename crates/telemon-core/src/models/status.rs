//! Three-level status and risk classifications

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStatusError;

/// Status of a sensor as declared by the backend
///
/// The backend speaks `ok` / `aviso` / `alerta`; the English spellings are
/// accepted on input as well. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "aviso", alias = "warning")]
    Warning,
    #[serde(rename = "alerta", alias = "alert")]
    Alert,
}

impl SensorStatus {
    /// Label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Ok => "ok",
            SensorStatus::Warning => "aviso",
            SensorStatus::Alert => "alerta",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(SensorStatus::Ok),
            "aviso" | "warning" => Ok(SensorStatus::Warning),
            "alerta" | "alert" => Ok(SensorStatus::Alert),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Locally derived risk, computed from numeric thresholds only
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RiskLevel> for SensorStatus {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => SensorStatus::Ok,
            RiskLevel::Moderate => SensorStatus::Warning,
            RiskLevel::High => SensorStatus::Alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&SensorStatus::Warning).unwrap(),
            "\"aviso\""
        );
        let alert: SensorStatus = serde_json::from_str("\"alerta\"").unwrap();
        assert_eq!(alert, SensorStatus::Alert);
        let alias: SensorStatus = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(alias, SensorStatus::Warning);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<SensorStatus>("\"broken\"").is_err());
        assert_eq!(
            "broken".parse::<SensorStatus>(),
            Err(ParseStatusError("broken".to_string()))
        );
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!(" ALERTA ".parse::<SensorStatus>(), Ok(SensorStatus::Alert));
        assert_eq!("Ok".parse::<SensorStatus>(), Ok(SensorStatus::Ok));
    }

    #[test]
    fn test_ordering() {
        assert!(SensorStatus::Ok < SensorStatus::Warning);
        assert!(SensorStatus::Warning < SensorStatus::Alert);
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
    }

    #[test]
    fn test_risk_maps_to_status() {
        assert_eq!(SensorStatus::from(RiskLevel::Low), SensorStatus::Ok);
        assert_eq!(SensorStatus::from(RiskLevel::Moderate), SensorStatus::Warning);
        assert_eq!(SensorStatus::from(RiskLevel::High), SensorStatus::Alert);
    }
}
