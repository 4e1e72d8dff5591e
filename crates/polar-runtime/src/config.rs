//! Runtime configuration: YAML file, then environment overrides.
//!
//! ```yaml
//! polarsDir: data/polars
//! archivedDir: data/archived
//! http: { host: 0.0.0.0, port: 8000 }
//! cors: { enabled: true, allowedOrigins: ["*"] }
//! log: { level: debug, json: false }
//! ```

use polar_api::{ApiConfig, ApiConfigError, CorsConfig, HttpConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the active polar directory.
pub const ENV_POLARS_DIR: &str = "POLARS_DIR";
/// Environment variable naming the archive directory.
pub const ENV_ARCHIVED_DIR: &str = "POLARS_ARCHIVED_DIR";
/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "POLARS_HOST";
/// Environment variable overriding the bind port.
pub const ENV_PORT: &str = "POLARS_PORT";
/// Environment variable switching logs to JSON.
pub const ENV_JSON_LOGS: &str = "POLARS_JSON_LOGS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    EmptyDirectory(&'static str),

    #[error("polarsDir and archivedDir must differ (both {0})")]
    SameDirectories(PathBuf),

    #[error("Invalid log level {0:?}")]
    InvalidLogLevel(String),

    #[error(transparent)]
    Api(#[from] ApiConfigError),
}

/// Complete configuration of the `polars` process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Directory holding active polars
    pub polars_dir: PathBuf,
    /// Directory holding archived polars
    pub archived_dir: PathBuf,
    /// HTTP listener
    pub http: HttpConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// Logging
    pub log: LogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            polars_dir: PathBuf::from("data/polars"),
            archived_dir: PathBuf::from("data/archived"),
            http: HttpConfig::default(),
            cors: CorsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            json: false,
        }
    }
}

impl RuntimeConfig {
    /// Load the file at `path` and apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged once logging is up (see [`LoadedConfig::missing_file`]).
    pub fn load(path: &Path) -> Result<LoadedConfig, ConfigError> {
        Self::load_with(path, |var| std::env::var(var).ok())
    }

    /// [`RuntimeConfig::load`] with overrides taken from `lookup`.
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<LoadedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, missing_file) = match std::fs::read_to_string(path) {
            Ok(text) => (Self::from_yaml(path, &text)?, false),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), true),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(LoadedConfig {
            config,
            path: path.to_path_buf(),
            missing_file,
        })
    }

    /// Parse YAML text; an empty document yields the defaults.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_POLARS_DIR) {
            self.polars_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_ARCHIVED_DIR) {
            self.archived_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = parse_env(ENV_HOST, host)?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = parse_env(ENV_PORT, port)?;
        }
        if let Some(json) = lookup(ENV_JSON_LOGS) {
            self.log.json = match json.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_JSON_LOGS,
                        value: json,
                    })
                }
            };
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polars_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory("polarsDir"));
        }
        if self.archived_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory("archivedDir"));
        }
        if self.polars_dir == self.archived_dir {
            return Err(ConfigError::SameDirectories(self.polars_dir.clone()));
        }
        if self.log.level.parse::<EnvFilter>().is_err() {
            return Err(ConfigError::InvalidLogLevel(self.log.level.clone()));
        }
        self.api().validate()?;
        Ok(())
    }

    /// HTTP part of the configuration, as the API crate wants it.
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            http: self.http.clone(),
            cors: self.cors.clone(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RuntimeConfig,
    pub path: PathBuf,
    /// The file did not exist and defaults were used.
    pub missing_file: bool,
}

impl LoadedConfig {
    /// Log the effective configuration. Call after logging is initialized.
    pub fn log_summary(&self) {
        if self.missing_file {
            warn!(path = %self.path.display(), "Config file not found, using defaults");
        } else {
            info!(path = %self.path.display(), "Loaded config file");
        }
        info!(
            polars_dir = %self.config.polars_dir.display(),
            archived_dir = %self.config.archived_dir.display(),
            addr = %self.config.api().http_addr(),
            "Effective configuration"
        );
    }
}
