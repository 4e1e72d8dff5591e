//! # Polar Image
//!
//! Assembles a minimal single-binary container image for one platform out
//! of a multi-architecture build tree.
//!
//! ```text
//! target/<triple>/release/polars ──select──→ assemble ──→ declare ──→ verify
//!                                              │             │
//!                                   dist/rootfs/polars   dist/config.json
//! ```
//!
//! Platform dispatch is a closed enum: an unknown platform identifier is an
//! error, never an image without an entrypoint.
//!
//! ## Usage
//!
//! ```ignore
//! use polar_image::{ImageBuilder, Platform};
//!
//! let image = ImageBuilder::new()
//!     .context("target")
//!     .output("dist")
//!     .build(Platform::LinuxArm64)?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod assembly;
pub mod builder;
pub mod entry;
pub mod error;
pub mod matrix;
pub mod platform;
pub mod selector;
pub mod verify;

pub use assembly::{assemble, AssembledImage, ROOTFS_DIR};
pub use builder::{ImageBuilder, DEFAULT_BINARY, DEFAULT_CONTEXT, DEFAULT_OUTPUT};
pub use entry::{declare_entrypoint, ContainerConfig, ImageConfig, CONFIG_FILE};
pub use error::{ImageError, ImageResult};
pub use matrix::ArtifactMatrix;
pub use platform::Platform;
pub use selector::{select, SelectedArtifact};
pub use verify::{verify, VerifiedImage};
