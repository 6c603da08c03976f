//! Sensors command - list sensors with their declared status

use anyhow::Result;
use telemon_client::TelemetryClient;

use crate::output::{OutputContext, SensorRow};

pub async fn sensors(client: &TelemetryClient, ctx: &OutputContext) -> Result<()> {
    let sensors = client.list_sensors().await?;

    if sensors.is_empty() {
        ctx.info("No sensors found. Check that the backend is running and the endpoint is configured.");
        return Ok(());
    }

    let rows: Vec<SensorRow> = sensors.into_iter().map(SensorRow::from).collect();
    ctx.print(&rows);
    Ok(())
}
