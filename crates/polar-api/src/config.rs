//! HTTP server configuration with validation.

use axum::http::{HeaderName, Method};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Main API configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    /// HTTP listener
    pub http: HttpConfig,
    /// CORS policy
    pub cors: CorsConfig,
}

impl ApiConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ApiConfigError> {
        if self.http.port == 0 {
            return Err(ApiConfigError::InvalidPort);
        }

        if self.cors.enabled {
            if self.cors.allowed_origins.is_empty() {
                return Err(ApiConfigError::InvalidCors(
                    "allowedOrigins cannot be empty".into(),
                ));
            }
            for method in &self.cors.allowed_methods {
                method
                    .parse::<Method>()
                    .map_err(|_| ApiConfigError::InvalidCors(format!("bad method {method:?}")))?;
            }
            for header in &self.cors.allowed_headers {
                if header != "*" {
                    header.parse::<HeaderName>().map_err(|_| {
                        ApiConfigError::InvalidCors(format!("bad header {header:?}"))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsConfig {
    /// Attach a CORS layer at all
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    /// Allowed request headers ("*" for all)
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 86400,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiConfigError {
    #[error("http port cannot be 0")]
    InvalidPort,

    #[error("invalid CORS configuration: {0}")]
    InvalidCors(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = ApiConfig::default();
        config.http.port = 0;
        assert_eq!(config.validate(), Err(ApiConfigError::InvalidPort));
    }

    #[test]
    fn test_bad_cors_method_rejected() {
        let mut config = ApiConfig::default();
        config.cors.allowed_methods.push("NOT A METHOD".into());
        assert!(matches!(
            config.validate(),
            Err(ApiConfigError::InvalidCors(_))
        ));
    }

    #[test]
    fn test_disabled_cors_skips_checks() {
        let mut config = ApiConfig::default();
        config.cors.enabled = false;
        config.cors.allowed_origins.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"http":{"port":9000}}"#).unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert!(config.cors.enabled);
    }
}
