//! Image assembly errors.
//!
//! Every way an assembly can go wrong is a distinct variant; nothing is
//! allowed to fall through to a "successful" build with a broken image.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while selecting, assembling or verifying an image
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported platform {0:?} (supported: linux/amd64, linux/arm64)")]
    UnsupportedPlatform(String),

    #[error("Invalid binary name {0:?}")]
    InvalidBinaryName(String),

    #[error("Artifact missing: {0}")]
    ArtifactMissing(PathBuf),

    #[error("Artifact is not a regular file: {0}")]
    ArtifactNotFile(PathBuf),

    #[error("Output directory is not empty: {0}")]
    OutputNotEmpty(PathBuf),

    #[error("Entrypoint missing: {0}")]
    EntrypointMissing(PathBuf),

    #[error("Entrypoint is not a regular file: {0}")]
    EntrypointNotFile(PathBuf),

    #[error("Entrypoint is not executable: {0}")]
    EntrypointNotExecutable(PathBuf),

    #[error("Unexpected entry in rootfs: {0}")]
    UnexpectedRootfsEntry(PathBuf),

    #[error("Entrypoint mismatch: {0}")]
    EntrypointMismatch(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ImageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;
