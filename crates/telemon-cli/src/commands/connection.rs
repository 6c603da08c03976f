//! Test command - connectivity probe

use telemon_client::TelemetryClient;

use crate::output::OutputContext;

/// Probe the backend; returns whether it answered with a sensor list
pub async fn test_connection(client: &TelemetryClient, ctx: &OutputContext) -> bool {
    let report = client.test_connection().await;

    match ctx.format {
        crate::output::OutputFormat::Table => {
            if report.success {
                ctx.success(&report.message);
            } else {
                ctx.error(&format!("Connection failed: {}", report.message));
            }
        }
        _ => {
            let mut pairs = vec![
                ("success", report.success.to_string()),
                ("message", report.message.clone()),
            ];
            if let Some(count) = report.count {
                pairs.push(("count", count.to_string()));
            }
            ctx.print_kv(&pairs);
        }
    }

    report.success
}
