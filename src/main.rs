use clap::Parser;
use geodns::config::GeoDnsConfig;
use geodns::zone::{ZoneReloader, ZoneStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Authoritative geo-aware DNS zone server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory with <zone>.json files (overrides GEODNS_ZONE_DIR)
    #[arg(long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Seconds between zone directory scans (overrides GEODNS_RELOAD_INTERVAL)
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = GeoDnsConfig::from_env()?;
    if let Some(dir) = args.config_dir {
        config.zone_dir = dir;
    }
    if let Some(secs) = args.interval {
        config.reload_interval = Duration::from_secs(secs);
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting geodns, zones from {}", config.zone_dir.display());

    // The reserved zone is seeded here, before the watcher can touch the store
    let store = Arc::new(ZoneStore::new()?);
    let reloader =
        ZoneReloader::new(&config.zone_dir, Arc::clone(&store)).with_interval(config.reload_interval);

    // Load what is on disk before anything is served
    match reloader.reload_once() {
        Ok(summary) => info!(
            "Initial load: {} zones loaded, {} failed",
            summary.loaded.len(),
            summary.failed.len()
        ),
        Err(e) => error!("{}", e),
    }

    let handle = reloader.spawn();

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    handle.abort();

    Ok(())
}
