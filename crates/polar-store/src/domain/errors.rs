//! # Domain Errors
//!
//! Every failure a polar operation can report. The HTTP layer maps these
//! variants onto status codes, so keep them specific.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the polar service and its repositories.
#[derive(Debug, Error)]
pub enum PolarError {
    /// An active polar with this id already exists.
    #[error("Polar {0} already exists.")]
    AlreadyExists(String),

    /// No polar with this id exists where it was looked up.
    #[error("Polar {0} does not exist.")]
    NotFound(String),

    /// The polar carries no id and none could be derived.
    #[error("Id is mandatory")]
    IdIsMandatory,

    /// The id cannot be used as a file stem.
    #[error("invalid polar id {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A polar document could not be encoded or decoded.
    #[error("malformed polar document {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl PolarError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PolarError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        PolarError::Yaml {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PolarError::AlreadyExists(_)
                | PolarError::NotFound(_)
                | PolarError::IdIsMandatory
                | PolarError::InvalidId { .. }
        )
    }
}

/// Result alias for polar operations.
pub type PolarResult<T> = Result<T, PolarError>;
