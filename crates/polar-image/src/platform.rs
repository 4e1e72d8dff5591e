//! Target platforms.
//!
//! The set is closed: a platform identifier either parses into one of these
//! variants or the build stops with `UnsupportedPlatform`. Every dispatch
//! over `Platform` is an exhaustive `match`, so a new variant does not
//! compile until every table covers it.

use crate::error::ImageError;
use std::fmt;
use std::str::FromStr;

/// A supported image platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinuxAmd64,
    LinuxArm64,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 2] = [Platform::LinuxAmd64, Platform::LinuxArm64];

    /// Canonical identifier, e.g. `linux/amd64`.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LinuxAmd64 => "linux/amd64",
            Platform::LinuxArm64 => "linux/arm64",
        }
    }

    /// OCI `os` field.
    pub fn os(self) -> &'static str {
        match self {
            Platform::LinuxAmd64 | Platform::LinuxArm64 => "linux",
        }
    }

    /// OCI `architecture` field.
    pub fn architecture(self) -> &'static str {
        match self {
            Platform::LinuxAmd64 => "amd64",
            Platform::LinuxArm64 => "arm64",
        }
    }

    /// OCI `variant` field.
    pub fn variant(self) -> Option<&'static str> {
        match self {
            Platform::LinuxAmd64 => None,
            Platform::LinuxArm64 => Some("v8"),
        }
    }

    /// Inverse of [`Platform::os`] / [`Platform::architecture`].
    pub fn from_oci(os: &str, architecture: &str) -> Result<Self, ImageError> {
        Self::ALL
            .into_iter()
            .find(|p| p.os() == os && p.architecture() == architecture)
            .ok_or_else(|| ImageError::UnsupportedPlatform(format!("{os}/{architecture}")))
    }
}

impl FromStr for Platform {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "linux/amd64" => Ok(Platform::LinuxAmd64),
            "linux/arm64" | "linux/arm64/v8" => Ok(Platform::LinuxArm64),
            other => Err(ImageError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
