//! Herald CLI
//!
//! Command-line interface for the review status notification service.

use std::path::PathBuf;

use clap::Parser;
use herald::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Review status polling and Telegram notification service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Poll interval in seconds (overrides config file)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = clap::value_parser!(Level))]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, poll_interval={:?}, log_level={:?}",
        args.config,
        args.poll_interval,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if let Some(poll_interval) = args.poll_interval {
        config.api.poll_interval_seconds = poll_interval;
    }

    config.validate()?;

    tracing::info!("Starting herald service");
    tracing::debug!(
        "Endpoint: {}, poll interval: {}s, backfill: {}",
        config.api.endpoint,
        config.api.poll_interval_seconds,
        config.api.backfill
    );

    herald::run(config).await?;

    Ok(())
}
