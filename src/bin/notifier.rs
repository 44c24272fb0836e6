//! RSI Monitor Notifier
//!
//! Polls price data for one ticker, classifies the RSI / MA200 signal and
//! posts it to Telegram on a fixed cadence until terminated.

use dotenvy::dotenv;
use rsi_monitor::config::{get_environment, Config};
use rsi_monitor::core::{Pipeline, Scheduler};
use rsi_monitor::logging;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    info!(environment = %get_environment(), "Starting RSI Monitor");
    info!(
        ticker = %config.ticker,
        interval_seconds = config.poll_interval.as_secs(),
        cron = ?config.schedule_cron,
        "Monitoring {}",
        config.ticker
    );

    let pipeline = Arc::new(Pipeline::from_config(config)?);
    let scheduler = Scheduler::from_pipeline(pipeline)?;

    let cycles = scheduler.run_forever().await;
    info!(cycles, "RSI Monitor stopped");

    Ok(())
}
