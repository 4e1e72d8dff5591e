//! Runtime assembly: promote exactly one artifact into a fresh rootfs.

use crate::error::{ImageError, ImageResult};
use crate::selector::SelectedArtifact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory under the output holding the image filesystem.
pub const ROOTFS_DIR: &str = "rootfs";

/// Mode of the promoted binary.
pub const ENTRYPOINT_MODE: u32 = 0o755;

/// An output directory with a populated rootfs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledImage {
    pub output: PathBuf,
    pub rootfs: PathBuf,
    /// Host path of the promoted binary, `<rootfs>/<binary>`
    pub entrypoint: PathBuf,
    pub binary: String,
}

impl AssembledImage {
    /// Path of the binary as seen from inside the image, `/<binary>`.
    pub fn image_path(&self) -> String {
        format!("/{}", self.binary)
    }
}

/// Copy the selected artifact into `<output>/rootfs` and mark it executable.
///
/// `output` must be absent or empty.
pub fn assemble(selected: &SelectedArtifact, output: &Path) -> ImageResult<AssembledImage> {
    ensure_empty_dir(output)?;

    let rootfs = output.join(ROOTFS_DIR);
    fs::create_dir(&rootfs).map_err(|e| ImageError::io(&rootfs, e))?;

    let entrypoint = rootfs.join(&selected.binary);
    let bytes = fs::copy(&selected.source, &entrypoint).map_err(|e| ImageError::io(&entrypoint, e))?;
    set_executable(&entrypoint)?;

    info!(
        platform = %selected.platform,
        source = %selected.source.display(),
        entrypoint = %entrypoint.display(),
        bytes,
        "Promoted artifact"
    );

    Ok(AssembledImage {
        output: output.to_path_buf(),
        rootfs,
        entrypoint,
        binary: selected.binary.clone(),
    })
}

fn ensure_empty_dir(output: &Path) -> ImageResult<()> {
    match fs::read_dir(output) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(ImageError::OutputNotEmpty(output.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(output = %output.display(), "Creating output directory");
            fs::create_dir_all(output).map_err(|e| ImageError::io(output, e))
        }
        Err(e) => Err(ImageError::io(output, e)),
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> ImageResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(ENTRYPOINT_MODE))
        .map_err(|e| ImageError::io(path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> ImageResult<()> {
    Ok(())
}
