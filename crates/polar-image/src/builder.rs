//! Full pipeline: select → assemble → declare → verify.

use crate::assembly::assemble;
use crate::entry::declare_entrypoint;
use crate::error::ImageResult;
use crate::matrix::ArtifactMatrix;
use crate::platform::Platform;
use crate::selector::select;
use crate::verify::{verify, VerifiedImage};
use std::path::PathBuf;
use tracing::info;

/// Default build context (cargo target directory).
pub const DEFAULT_CONTEXT: &str = "target";
/// Default output directory.
pub const DEFAULT_OUTPUT: &str = "dist";
/// Default binary name.
pub const DEFAULT_BINARY: &str = "polars";

/// One-shot image builder
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    matrix: ArtifactMatrix,
    context: PathBuf,
    output: PathBuf,
    binary: String,
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self {
            matrix: ArtifactMatrix::default(),
            context: PathBuf::from(DEFAULT_CONTEXT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            binary: DEFAULT_BINARY.to_string(),
        }
    }
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(mut self, matrix: ArtifactMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn context(mut self, context: impl Into<PathBuf>) -> Self {
        self.context = context.into();
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Assemble and verify the image for `platform`.
    pub fn build(&self, platform: Platform) -> ImageResult<VerifiedImage> {
        info!(
            %platform,
            context = %self.context.display(),
            output = %self.output.display(),
            binary = %self.binary,
            "Assembling image"
        );

        let selected = select(platform, &self.matrix, &self.context, &self.binary)?;
        let image = assemble(&selected, &self.output)?;
        declare_entrypoint(&image, platform)?;
        let verified = verify(&self.output)?;

        info!(%platform, entrypoint = %image.image_path(), "Image ready");
        Ok(verified)
    }

    /// Parse a platform identifier and build; unknown identifiers fail
    /// before anything is written.
    pub fn build_for(&self, platform_id: &str) -> ImageResult<VerifiedImage> {
        let platform: Platform = platform_id.parse()?;
        self.build(platform)
    }
}
