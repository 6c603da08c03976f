//! Derived views: stats, chart window, risk and status comparison

use anyhow::{bail, Result};
use telemon_client::TelemetryClient;
use telemon_core::{
    classify_risk, summarize, window_for_chart, RiskMetrics, RiskThresholds, StatusView,
};

use crate::output::{format_value, OutputContext, ReadingRow, StatsRow, StatusRow};

/// Summary statistics over one sensor's readings
pub async fn stats(client: &TelemetryClient, sensor: &str, ctx: &OutputContext) -> Result<()> {
    let readings = client.list_readings(Some(sensor)).await?;

    match summarize(&readings) {
        Some(summary) => ctx.print_one(&StatsRow::new(sensor, &summary)),
        None => ctx.info(&format!("No readings for sensor {}", sensor)),
    }
    Ok(())
}

/// The most recent `window` readings of one sensor, oldest first
pub async fn chart(
    client: &TelemetryClient,
    sensor: &str,
    window: usize,
    ctx: &OutputContext,
) -> Result<()> {
    let readings = client.list_readings(Some(sensor)).await?;
    let points = window_for_chart(&readings, window);

    if points.is_empty() {
        ctx.info(&format!("Nothing to chart for sensor {}", sensor));
        return Ok(());
    }

    let rows: Vec<ReadingRow> = points.iter().map(ReadingRow::from).collect();
    ctx.print(&rows);
    Ok(())
}

/// Classify a humidity/tilt pair (or a single value) against the risk thresholds
pub fn risk(primary: f64, secondary: Option<f64>, ctx: &OutputContext) -> Result<()> {
    if !primary.is_finite() || secondary.is_some_and(|s| !s.is_finite()) {
        bail!("Risk signals must be finite numbers");
    }

    let metrics = RiskMetrics { primary, secondary };
    let level = classify_risk(&metrics);
    let thresholds = RiskThresholds::DEFAULT;

    let mut pairs = vec![("Primary", format_value(primary))];
    if let Some(secondary) = secondary {
        pairs.push(("Secondary", format_value(secondary)));
    }
    pairs.push(("Risk", level.to_string()));
    pairs.push((
        "Thresholds",
        format!(
            "high > {}/{}, moderate >= {}/{}",
            thresholds.primary_high,
            thresholds.secondary_high,
            thresholds.primary_moderate,
            thresholds.secondary_moderate
        ),
    ));
    ctx.print_kv(&pairs);
    Ok(())
}

/// Declared status next to the status derived from the latest reading
pub async fn status(client: &TelemetryClient, sensor: &str, ctx: &OutputContext) -> Result<()> {
    let sensors = client.list_sensors().await?;
    let Some(found) = sensors.iter().find(|s| s.id == sensor) else {
        bail!("Sensor {} not found", sensor);
    };
    let readings = client.list_readings(Some(sensor)).await?;

    let view = StatusView::derive(found, &readings);
    ctx.print_one(&StatusRow::from(&view));
    Ok(())
}
