//! Voltrix Worker
//!
//! Periodically evaluates the configured symbols and logs the signals.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use voltrix::core::runtime::{RuntimeConfig, SignalRuntime};
use voltrix::core::scheduler::JobScheduler;
use voltrix::logging;
use voltrix::metrics::Metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = voltrix::config::get_environment();
    info!("Starting Voltrix Worker");
    info!(environment = %env, "Environment");

    let config = RuntimeConfig::from_env()?;
    if config.evaluation_interval_seconds == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }
    if config.symbols.is_empty() {
        warn!("No symbols configured - set SYMBOLS to a comma-separated list");
    }

    let metrics = Arc::new(Metrics::new()?);
    let runtime = SignalRuntime::from_config(config.clone(), Some(metrics.clone()))?;

    info!("Starting job scheduler...");
    let scheduler = JobScheduler::new(
        runtime.engine(),
        config.symbols.clone(),
        config.evaluation_interval_seconds,
    )?;
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    match metrics.export() {
        Ok(text) => info!(metrics = %text, "Final metrics snapshot"),
        Err(e) => warn!(error = %e, "Failed to export metrics"),
    }
    info!("Worker stopped");

    Ok(())
}
