//! Post-assembly checks on an output directory.

use crate::assembly::ROOTFS_DIR;
use crate::entry::ImageConfig;
use crate::error::{ImageError, ImageResult};
use crate::platform::Platform;
use crate::selector::validate_binary_name;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An output directory that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedImage {
    pub platform: Platform,
    pub config: ImageConfig,
    /// Host path of the entrypoint binary
    pub entrypoint: PathBuf,
}

/// Check that `output` holds a runnable single-binary image.
///
/// - the config runs exactly `/<binary>` with no arguments
/// - `rootfs/<binary>` exists, is a regular file and is executable
/// - the rootfs holds nothing else
pub fn verify(output: &Path) -> ImageResult<VerifiedImage> {
    let config = ImageConfig::read(output)?;
    let platform = config.platform()?;
    let binary = entrypoint_binary(&config)?;

    let rootfs = output.join(ROOTFS_DIR);
    let entrypoint = rootfs.join(binary);

    let meta = match fs::symlink_metadata(&entrypoint) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImageError::EntrypointMissing(entrypoint))
        }
        Err(e) => return Err(ImageError::io(entrypoint, e)),
    };
    if !meta.file_type().is_file() {
        return Err(ImageError::EntrypointNotFile(entrypoint));
    }
    if !is_executable(&meta) {
        return Err(ImageError::EntrypointNotExecutable(entrypoint));
    }

    for entry in fs::read_dir(&rootfs).map_err(|e| ImageError::io(&rootfs, e))? {
        let entry = entry.map_err(|e| ImageError::io(&rootfs, e))?;
        if entry.file_name() != binary {
            return Err(ImageError::UnexpectedRootfsEntry(entry.path()));
        }
    }

    debug!(%platform, entrypoint = %entrypoint.display(), "Image verified");
    Ok(VerifiedImage {
        platform,
        config,
        entrypoint,
    })
}

/// The binary name named by a `["/<binary>"]` entrypoint with empty `Cmd`.
fn entrypoint_binary(config: &ImageConfig) -> ImageResult<&str> {
    if !config.config.cmd.is_empty() {
        return Err(ImageError::EntrypointMismatch(format!(
            "Cmd must be empty, got {:?}",
            config.config.cmd
        )));
    }
    let path = match config.config.entrypoint.as_slice() {
        [path] => path,
        other => {
            return Err(ImageError::EntrypointMismatch(format!(
                "expected a single entrypoint path, got {other:?}"
            )))
        }
    };
    let binary = path.strip_prefix('/').ok_or_else(|| {
        ImageError::EntrypointMismatch(format!("entrypoint {path:?} is not an absolute root path"))
    })?;
    validate_binary_name(binary)
        .map_err(|_| ImageError::EntrypointMismatch(format!("entrypoint {path:?} is not a root file")))?;
    Ok(binary)
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    true
}
