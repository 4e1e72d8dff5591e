//! API service - builds the router and runs the HTTP server.

use crate::config::ApiConfig;
use crate::error::ServerError;
use crate::middleware::{create_cors_layer, ApiMetrics, RequestTracingLayer};
use crate::routes::{polar_routes, AppState, API_BASE};
use axum::{extract::State, routing::get, Json, Router};
use polar_store::PolarApi;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP front of the polar service
pub struct ApiService {
    config: ApiConfig,
    polars: Arc<dyn PolarApi>,
    metrics: Arc<ApiMetrics>,
}

impl ApiService {
    /// Create a new API service
    pub fn new(config: ApiConfig, polars: Arc<dyn PolarApi>) -> Result<Self, ServerError> {
        config.validate()?;

        Ok(Self {
            config,
            polars,
            metrics: Arc::new(ApiMetrics::new()),
        })
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<ApiMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the full router: polar API, health and metrics
    pub fn router(&self) -> Router {
        let state = AppState {
            polars: Arc::clone(&self.polars),
            metrics: Arc::clone(&self.metrics),
        };

        let mut router = Router::new()
            .nest(API_BASE, polar_routes())
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_report));

        if let Some(cors) = create_cors_layer(&self.config.cors) {
            router = router.layer(cors);
        }

        router
            .layer(RequestTracingLayer::new(Arc::clone(&self.metrics)))
            .with_state(state)
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        if let Ok(addr) = listener.local_addr() {
            info!(addr = %addr, base = API_BASE, "Starting HTTP server");
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics_report(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.metrics.to_json())
}
