//! Polar API - HTTP/JSON front of the polar service.
//!
//! # Routes
//!
//! ```text
//! /polars/api/v1
//! ├── GET    /polars                  list (?archived, ?sort_by=id|_id, ?order=asc|desc)
//! ├── GET    /polars?polar_id=N       find by numeric id
//! ├── POST   /polars                  create (id defaults to last label segment)
//! ├── GET    /polars/{id}             get (active, then archive)
//! ├── PUT    /polars/{id}             update / rename
//! ├── DELETE /polars/{id}             delete
//! ├── POST   /polars/{id}/archive     active → archive
//! └── POST   /polars/{id}/restore     archive → active
//! /health                             liveness
//! /metrics                            request counters
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use polar_api::{ApiConfig, ApiService};
//!
//! let service = ApiService::new(ApiConfig::default(), polars)?;
//! service.serve(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;

pub use config::{ApiConfig, ApiConfigError, CorsConfig, HttpConfig};
pub use error::{ApiError, ApiResult, ServerError};
pub use middleware::ApiMetrics;
pub use routes::{AppState, Order, API_BASE};
pub use service::ApiService;
