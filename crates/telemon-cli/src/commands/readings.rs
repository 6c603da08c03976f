//! Readings and submit commands

use anyhow::Result;
use telemon_client::TelemetryClient;

use crate::output::{format_value, OutputContext, ReadingRow};

/// List readings, all or for one sensor
pub async fn readings(
    client: &TelemetryClient,
    sensor: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    let readings = client.list_readings(sensor).await?;

    let rows: Vec<ReadingRow> = readings.iter().map(ReadingRow::from).collect();
    ctx.print(&rows);
    Ok(())
}

/// Register a new reading and show what the server stored
pub async fn submit(
    client: &TelemetryClient,
    sensor: &str,
    value: f64,
    ctx: &OutputContext,
) -> Result<()> {
    let reading = client.submit_reading(sensor, value).await?;

    ctx.success(&format!(
        "Reading {} registered for sensor {} ({})",
        reading.id,
        reading.sensor_id,
        format_value(reading.value)
    ));
    ctx.print_one(&ReadingRow::from(&reading));
    Ok(())
}
