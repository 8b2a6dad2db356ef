//! Prediction API - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, telemetry, Settings};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    init_logging(&settings.logging)?;

    info!("=== Prediction API v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = telemetry::install_recorder().context("failed to install metrics recorder")?;
    telemetry::register_request_counters();

    if let Err(e) = run_server(&settings, metrics).await {
        error!("Server failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
