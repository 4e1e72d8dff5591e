//! # Polar Service Runtime
//!
//! Composition root of the `polars` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then environment)
//! 2. Initialize logging
//! 3. Open the YAML directory store (creating directories)
//! 4. Serve the HTTP API until Ctrl-C / SIGTERM

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod logging;

use anyhow::{Context, Result};
use polar_api::ApiService;
use polar_store::{PolarService, YamlDirectoryRepository};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

pub use config::{ConfigError, LoadedConfig, LogConfig, RuntimeConfig};
pub use logging::{init_logging, LoggingError};

/// Open the store described by `config` and build the HTTP service.
pub fn build_service(config: &RuntimeConfig) -> Result<ApiService> {
    let repo = YamlDirectoryRepository::new(&config.polars_dir, &config.archived_dir)
        .context("Failed to open polar directories")?;
    let polars = Arc::new(PolarService::new(repo));

    ApiService::new(config.api(), polars).context("Invalid HTTP configuration")
}

/// Run the service until `shutdown` resolves.
pub async fn run<F>(config: RuntimeConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = build_service(&config)?;
    info!("Polar service ready");
    service
        .serve(shutdown)
        .await
        .context("HTTP server failed")?;
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
