//! Entry declaration: the image config naming the promoted binary as the
//! sole process.
//!
//! The file is a subset of the OCI image configuration:
//!
//! ```json
//! {"architecture":"amd64","os":"linux","config":{"Entrypoint":["/polars"],"Cmd":[]}}
//! ```

use crate::assembly::AssembledImage;
use crate::error::{ImageError, ImageResult};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// File name of the image config under the output directory.
pub const CONFIG_FILE: &str = "config.json";

/// OCI image config subset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub architecture: String,
    pub os: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub config: ContainerConfig,
}

/// Process part of the image config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(rename = "Entrypoint")]
    pub entrypoint: Vec<String>,
    #[serde(rename = "Cmd", default)]
    pub cmd: Vec<String>,
}

impl ImageConfig {
    /// Config running `image_path` with no arguments on `platform`.
    pub fn new(platform: Platform, image_path: String) -> Self {
        Self {
            architecture: platform.architecture().to_string(),
            os: platform.os().to_string(),
            variant: platform.variant().map(str::to_string),
            config: ContainerConfig {
                entrypoint: vec![image_path],
                cmd: Vec::new(),
            },
        }
    }

    /// Read `<output>/config.json`.
    pub fn read(output: &Path) -> ImageResult<Self> {
        let path = output.join(CONFIG_FILE);
        let bytes = std::fs::read(&path).map_err(|e| ImageError::io(&path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Platform the config declares.
    pub fn platform(&self) -> ImageResult<Platform> {
        Platform::from_oci(&self.os, &self.architecture)
    }
}

/// Write the image config declaring the assembled binary as entrypoint.
pub fn declare_entrypoint(image: &AssembledImage, platform: Platform) -> ImageResult<ImageConfig> {
    let config = ImageConfig::new(platform, image.image_path());

    let path = image.output.join(CONFIG_FILE);
    let json = serde_json::to_vec_pretty(&config)?;
    std::fs::write(&path, json).map_err(|e| ImageError::io(&path, e))?;

    info!(
        %platform,
        entrypoint = %image.image_path(),
        config = %path.display(),
        "Declared entrypoint"
    );
    Ok(config)
}
