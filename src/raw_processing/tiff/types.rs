//! TIFF output configuration types

use serde::{Deserialize, Serialize};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TiffConfig {
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing).
    /// Adds processing time, leave `None` for maximum speed.
    pub predictor: Option<u16>,
}

impl TiffConfig {
    pub fn builder() -> TiffConfigBuilder {
        TiffConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct TiffConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl TiffConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> TiffConfig {
        let default = TiffConfig::default();
        TiffConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
