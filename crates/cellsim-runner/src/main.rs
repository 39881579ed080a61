//! Headless driver: runs one simulation on a timer and reports aggregates.

mod driver;
mod telemetry;

use anyhow::{Context, Result};
use cellsim_core::RunnerConfig;
use tokio::signal;
use tracing::{info, warn};

fn load_config() -> Result<RunnerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            let config = RunnerConfig::from_json(&json)
                .with_context(|| format!("parsing config file {}", path))?;
            Ok(config)
        }
        None => Ok(RunnerConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let json_logs = std::env::var("CELLSIM_LOG_JSON").is_ok_and(|v| v == "1");
    telemetry::init_telemetry(json_logs)?;

    let config = load_config()?;
    info!(
        "Starting cellsim runner: {} simulation, seed {}",
        config.simulation.kind(),
        config.seed
    );

    let driver = driver::Driver::new(config)?;
    let summary = driver.run(shutdown_signal()).await?;

    if summary.interrupted {
        warn!("Stopped early after {} steps", summary.steps);
    }
    println!("{}", serde_json::to_string(&summary.snapshot)?);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
