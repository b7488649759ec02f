//! Quidkeeper entry point
//!
//! Parameterless: one invocation performs exactly one housekeeping pass
//! and exits, making it suitable for cron. Configuration comes from the
//! environment; see [`quidkeeper::config`].

use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quidkeeper::{Config, Housekeeper, Reconciler, TodoistGateway};

fn setup_logging() {
    // RUST_LOG wins; default to info so each decision and queued
    // command is visible in the cron log
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    info!("quidkeeper starting...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(project_id = %config.project_id, monthly_budget = config.monthly_budget, "loaded config");

    let gateway = TodoistGateway::new(&config.api_token).context("Failed to build Todoist gateway")?;
    let reconciler = Reconciler::new(&config.project_id, config.monthly_budget);
    let housekeeper = Housekeeper::new(gateway, reconciler, &config.project_id);

    housekeeper.run_once().await.context("Housekeeping pass failed")?;

    Ok(())
}
