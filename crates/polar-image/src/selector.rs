//! Stage selector: pick the one prebuilt artifact for a platform.

use crate::error::{ImageError, ImageResult};
use crate::matrix::ArtifactMatrix;
use crate::platform::Platform;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// The artifact chosen for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedArtifact {
    pub platform: Platform,
    pub triple: String,
    /// Host path of the prebuilt binary
    pub source: PathBuf,
    /// File name the binary keeps inside the image
    pub binary: String,
}

/// Resolve the artifact for `platform` under `context`.
///
/// The artifact must already exist as a regular file.
pub fn select(
    platform: Platform,
    matrix: &ArtifactMatrix,
    context: &Path,
    binary: &str,
) -> ImageResult<SelectedArtifact> {
    validate_binary_name(binary)?;

    let triple = matrix.triple(platform);
    let source = matrix.artifact_path(context, platform, binary);
    debug!(%platform, triple, source = %source.display(), "Resolving artifact");

    let meta = match std::fs::metadata(&source) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImageError::ArtifactMissing(source))
        }
        Err(e) => return Err(ImageError::io(source, e)),
    };
    if !meta.is_file() {
        return Err(ImageError::ArtifactNotFile(source));
    }

    Ok(SelectedArtifact {
        platform,
        triple: triple.to_string(),
        source,
        binary: binary.to_string(),
    })
}

/// A binary name must be a single plain path component.
pub fn validate_binary_name(binary: &str) -> ImageResult<()> {
    let mut components = Path::new(binary).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == binary && !binary.contains('\0') => {
            Ok(())
        }
        _ => Err(ImageError::InvalidBinaryName(binary.to_string())),
    }
}
