//! `polars` - the polar service binary.

use anyhow::{Context, Result};
use clap::Parser;
use polar_runtime::{init_logging, run, shutdown_signal, RuntimeConfig};
use std::path::PathBuf;
use tracing::info;

/// Serve boat polars over HTTP from a directory of YAML files.
#[derive(Parser, Debug)]
#[command(name = "polars", version, about)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'c', long, env = "POLARS_CONFIG", default_value = "config.yaml")]
    config_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = RuntimeConfig::load(&cli.config_file)
        .with_context(|| format!("Failed to load configuration from {}", cli.config_file.display()))?;
    init_logging(&loaded.config.log).context("Failed to initialize logging")?;

    info!("Polar service v{}", env!("CARGO_PKG_VERSION"));
    loaded.log_summary();

    run(loaded.config, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}
