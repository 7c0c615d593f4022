//! Decode options
//!
//! `ProcessorOptions` mirrors LibRaw's output parameter block with host types:
//! optional values are `Option`s and enumerations are enums. The exact LibRaw
//! encodings are produced by the parameter adapter.

mod builder;
pub mod types;


use std::path::Path;

use tracing::debug;

use crate::raw_processing::common::error::{ProcessorError, Result};

pub use builder::ProcessorOptionsBuilder;
pub use types::{
    CameraMatrix, FbddNoiseReduction, HighlightMode, Interpolation, OutputBitDepth, OutputColor,
    ProcessorOptions, Region,
};

impl ProcessorOptions {
    pub fn builder() -> ProcessorOptionsBuilder {
        ProcessorOptionsBuilder::default()
    }

    /// Parses options from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ProcessorError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading processor options from {}", path.display());

        let source = std::fs::read_to_string(path)?;
        toml::from_str(&source)
            .map_err(|e| ProcessorError::Config(format!("{}: {}", path.display(), e)))
    }
}
