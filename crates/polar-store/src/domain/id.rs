//! # Polar Ids
//!
//! A polar id doubles as a file stem, so it must never escape the storage
//! directory. Listing derives ids from the file name up to its first `.`,
//! so ids themselves may not contain a dot.

use super::errors::PolarError;
use std::path::Path;

/// File extension of polar documents.
pub const POLAR_EXTENSION: &str = "yaml";

/// Check that `id` is usable as a polar file stem.
pub fn validate_id(id: &str) -> Result<(), PolarError> {
    let reject = |reason| {
        Err(PolarError::InvalidId {
            id: id.to_string(),
            reason,
        })
    };

    if id.is_empty() {
        return reject("empty");
    }
    if id.contains('.') {
        return reject("dot");
    }
    if id.contains(['/', '\\']) {
        return reject("path separator");
    }
    if id.contains('\0') {
        return reject("NUL byte");
    }
    Ok(())
}

/// Id of the polar stored at `path`: the file name up to its first `.`.
///
/// Returns `None` for paths without a `.yaml` extension.
pub fn file_id(path: &Path) -> Option<String> {
    if path.extension()? != POLAR_EXTENSION {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let prefix = name.split('.').next()?;
    if prefix.is_empty() {
        return None;
    }
    Some(prefix.to_string())
}

/// File name under which the polar `id` is stored.
pub fn file_name(id: &str) -> String {
    format!("{}.{}", id, POLAR_EXTENSION)
}
