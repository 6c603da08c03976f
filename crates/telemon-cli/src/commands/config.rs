//! Config command - show or change the persisted backend endpoint

use anyhow::{Context, Result};
use telemon_client::EndpointStore;

use crate::output::OutputContext;

pub fn show(store: &EndpointStore, ctx: &OutputContext) -> Result<()> {
    let config = store.get();
    let state = if config.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    ctx.print_kv(&[
        ("base_url", config.base_url),
        ("state", state.to_string()),
        ("file", store.path().display().to_string()),
    ]);
    Ok(())
}

pub fn set(store: &EndpointStore, url: &str, ctx: &OutputContext) -> Result<()> {
    store
        .set(url)
        .with_context(|| format!("Could not save endpoint {}", url))?;
    ctx.success(&format!("Endpoint saved: {}", url));
    Ok(())
}

pub fn path(store: &EndpointStore) {
    println!("{}", store.path().display());
}
