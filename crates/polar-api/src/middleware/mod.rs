//! Middleware stack for the polar API.
//!
//! Layer order: Request → Tracing (span, request id, metrics) → CORS → Handler

pub mod cors;
pub mod metrics;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::ApiMetrics;
pub use tracing::{RequestTracingLayer, REQUEST_ID_HEADER};
