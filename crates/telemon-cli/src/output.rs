//! Output formatting for telemon (table, json, csv)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use telemon_core::{Reading, Sensor, SensorStatus, StatsSummary, StatusView};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print rows in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    println!("{}", Table::new(data));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Csv => {
                print_csv(data);
            }
        }
    }

    /// Print a single row in the configured format
    pub fn print_one<T: Tabled + Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Table => {
                println!("{}", Table::new([data]));
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Csv => {
                print_csv(&[data]);
            }
        }
    }

    /// Print key-value pairs
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Csv => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
                println!("{}", keys.join(","));
                let values: Vec<String> = pairs.iter().map(|(_, v)| escape_csv(v)).collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Print data as CSV, columns taken from the first row
fn print_csv<T: Serialize>(data: &[T]) {
    let Some(first) = data.first() else {
        return;
    };

    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(first) {
        let headers: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
        println!("{}", headers.join(","));

        for item in data {
            if let Ok(serde_json::Value::Object(row)) = serde_json::to_value(item) {
                let values: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        row.get(*h)
                            .map(|v| match v {
                                serde_json::Value::String(s) => escape_csv(s),
                                other => escape_csv(&other.to_string()),
                            })
                            .unwrap_or_default()
                    })
                    .collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One decimal, the precision every screen shows
pub fn format_value(value: f64) -> String {
    format!("{:.1}", value)
}

/// Status label with its marker
pub fn status_label(status: SensorStatus) -> String {
    match status {
        SensorStatus::Ok => "OK".to_string(),
        SensorStatus::Warning => "AVISO".to_string(),
        SensorStatus::Alert => "ALERTA".to_string(),
    }
}

// =============================================================================
// Display rows
// =============================================================================

/// Sensor display for the sensors command
#[derive(Debug, Tabled, Serialize)]
pub struct SensorRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl From<Sensor> for SensorRow {
    fn from(sensor: Sensor) -> Self {
        Self {
            id: sensor.id,
            name: sensor.name,
            status: status_label(sensor.status),
            value: format_value(sensor.current_value),
        }
    }
}

/// Reading display for readings and chart commands
#[derive(Debug, Tabled, Serialize)]
pub struct ReadingRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Sensor")]
    pub sensor: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<&Reading> for ReadingRow {
    fn from(reading: &Reading) -> Self {
        Self {
            id: reading.id,
            sensor: reading.sensor_id.clone(),
            value: format_value(reading.value),
            timestamp: reading.timestamp.clone(),
        }
    }
}

/// Summary display for the stats command
#[derive(Debug, Tabled, Serialize)]
pub struct StatsRow {
    #[tabled(rename = "Sensor")]
    pub sensor: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Min")]
    pub min: String,
    #[tabled(rename = "Max")]
    pub max: String,
    #[tabled(rename = "Mean")]
    pub mean: String,
}

impl StatsRow {
    pub fn new(sensor: &str, summary: &StatsSummary) -> Self {
        let summary = summary.rounded();
        Self {
            sensor: sensor.to_string(),
            count: summary.count,
            min: format_value(summary.min),
            max: format_value(summary.max),
            mean: format_value(summary.mean),
        }
    }
}

/// Declared vs local status for the status command
#[derive(Debug, Tabled, Serialize)]
pub struct StatusRow {
    #[tabled(rename = "Sensor")]
    pub sensor: String,
    #[tabled(rename = "Declared")]
    pub declared: String,
    #[tabled(rename = "Local")]
    pub local: String,
    #[tabled(rename = "Last value")]
    pub last_value: String,
    #[tabled(rename = "Agrees")]
    pub agrees: String,
}

impl From<&StatusView> for StatusRow {
    fn from(view: &StatusView) -> Self {
        Self {
            sensor: view.sensor_id.clone(),
            declared: status_label(view.declared),
            local: view.local.map(status_label).unwrap_or_else(|| "-".to_string()),
            last_value: view
                .last_reading
                .as_ref()
                .map(|r| format_value(r.value))
                .unwrap_or_else(|| "-".to_string()),
            agrees: match view.agrees() {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_value_rounds_to_one_decimal() {
        assert_eq!(format_value(85.26), "85.3");
        assert_eq!(format_value(1.0 / 3.0), "0.3");
        assert_eq!(format_value(60.0), "60.0");
    }

    #[test]
    fn test_sensor_row() {
        let row = SensorRow::from(Sensor {
            id: "1".to_string(),
            name: "Temp".to_string(),
            status: SensorStatus::Alert,
            current_value: 85.21,
        });
        assert_eq!(row.status, "ALERTA");
        assert_eq!(row.value, "85.2");
    }

    #[test]
    fn test_stats_row_uses_rounded_summary() {
        let summary = StatsSummary {
            count: 3,
            min: 1.0,
            max: 2.0,
            mean: 5.0 / 3.0,
        };
        let row = StatsRow::new("7", &summary);
        assert_eq!(row.count, 3);
        assert_eq!(row.min, "1.0");
        assert_eq!(row.mean, "1.7");
    }
}
