//! API error types and their HTTP status mapping.
//!
//! | error | status |
//! |-------|--------|
//! | `NotFound` | 404 |
//! | `AlreadyExists` | 409 |
//! | `IdIsMandatory`, `InvalidId` | 400 |
//! | anything else | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use polar_store::PolarError;
use tracing::error;

/// Error returned by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Domain failure from the polar service.
    #[error(transparent)]
    Polar(#[from] PolarError),

    /// Failure outside the domain (task join, etc.).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Polar(PolarError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Polar(PolarError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Polar(PolarError::IdIsMandatory | PolarError::InvalidId { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Polar(PolarError::Io { .. } | PolarError::Yaml { .. })
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Server-level errors (not per request)
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ApiConfigError),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server loop exited with an error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PolarError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (PolarError::AlreadyExists("a".into()), StatusCode::CONFLICT),
            (PolarError::IdIsMandatory, StatusCode::BAD_REQUEST),
            (
                PolarError::InvalidId {
                    id: "../a".into(),
                    reason: "path separator",
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PolarError::Io {
                    path: "/x".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_carries_status() {
        let response = ApiError::from(PolarError::NotFound("imoca".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
