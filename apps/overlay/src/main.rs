//! CETI overlay entry point.

mod app;
mod cli;
mod config;
mod export;
mod sink;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting CETI overlay");

    let config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    let config = cli.apply(config);
    tracing::info!(mode = ?config.mode, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config))?;

    tracing::info!("overlay shut down cleanly");
    Ok(())
}
