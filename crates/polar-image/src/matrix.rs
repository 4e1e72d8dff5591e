//! Platform → target triple mapping.

use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Default triple for `linux/amd64`.
pub const DEFAULT_AMD64_TRIPLE: &str = "x86_64-unknown-linux-musl";
/// Default triple for `linux/arm64`.
pub const DEFAULT_ARM64_TRIPLE: &str = "aarch64-unknown-linux-musl";

/// Build profile directory the artifacts are taken from.
pub const PROFILE_DIR: &str = "release";

/// Where each platform's prebuilt binary lives.
///
/// One field per platform, so the mapping is total by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMatrix {
    amd64: String,
    arm64: String,
}

impl Default for ArtifactMatrix {
    fn default() -> Self {
        Self {
            amd64: DEFAULT_AMD64_TRIPLE.to_string(),
            arm64: DEFAULT_ARM64_TRIPLE.to_string(),
        }
    }
}

impl ArtifactMatrix {
    /// Target triple for `platform`.
    pub fn triple(&self, platform: Platform) -> &str {
        match platform {
            Platform::LinuxAmd64 => &self.amd64,
            Platform::LinuxArm64 => &self.arm64,
        }
    }

    /// Replace the triple used for `platform`.
    pub fn with_triple(mut self, platform: Platform, triple: impl Into<String>) -> Self {
        let slot = match platform {
            Platform::LinuxAmd64 => &mut self.amd64,
            Platform::LinuxArm64 => &mut self.arm64,
        };
        *slot = triple.into();
        self
    }

    /// `<context>/<triple>/release/<binary>`
    pub fn artifact_path(&self, context: &Path, platform: Platform, binary: &str) -> PathBuf {
        context
            .join(self.triple(platform))
            .join(PROFILE_DIR)
            .join(binary)
    }

    /// `(platform, triple)` for every supported platform.
    pub fn entries(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL.into_iter().map(move |p| (p, self.triple(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_triples() {
        let matrix = ArtifactMatrix::default();
        assert_eq!(matrix.triple(Platform::LinuxAmd64), DEFAULT_AMD64_TRIPLE);
        assert_eq!(matrix.triple(Platform::LinuxArm64), DEFAULT_ARM64_TRIPLE);
    }

    #[test]
    fn test_override_keeps_other_entry() {
        let matrix =
            ArtifactMatrix::default().with_triple(Platform::LinuxArm64, "aarch64-unknown-linux-gnu");
        assert_eq!(matrix.triple(Platform::LinuxArm64), "aarch64-unknown-linux-gnu");
        assert_eq!(matrix.triple(Platform::LinuxAmd64), DEFAULT_AMD64_TRIPLE);
    }

    #[test]
    fn test_artifact_path() {
        let matrix = ArtifactMatrix::default();
        let path = matrix.artifact_path(Path::new("target"), Platform::LinuxAmd64, "polars");
        assert_eq!(
            path,
            PathBuf::from("target/x86_64-unknown-linux-musl/release/polars")
        );
    }

    #[test]
    fn test_entries_cover_all_platforms() {
        let matrix = ArtifactMatrix::default();
        let platforms: Vec<_> = matrix.entries().map(|(p, _)| p).collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
    }
}
