//! Embedded preview extraction


use std::path::Path;

use tracing::{debug, info};

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::native::{
    MemoryImage, RawBackend, RawSession, IMAGE_FORMAT_BITMAP, IMAGE_FORMAT_JPEG,
};
use crate::raw_processing::params::path_to_cstring;
use crate::raw_processing::pipeline::{PipelineTimings, Processor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailFormat {
    /// Complete JPEG file
    Jpeg,
    /// Packed RGB pixels
    Bitmap,
    Unknown(u32),
}

impl ThumbnailFormat {
    pub fn from_code(code: u32) -> Self {
        match code {
            IMAGE_FORMAT_JPEG => Self::Jpeg,
            IMAGE_FORMAT_BITMAP => Self::Bitmap,
            other => Self::Unknown(other),
        }
    }

    /// Conventional file extension, if the format has one.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("jpg"),
            Self::Bitmap => Some("ppm"),
            Self::Unknown(_) => None,
        }
    }
}

/// Preview image copied out of the RAW file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub format: ThumbnailFormat,
    pub width: u32,
    pub height: u32,
    pub colors: u16,
    pub bits: u16,
    pub data: Vec<u8>,
}

impl Thumbnail {
    /// Bytes ready to be written to a file: the JPEG as is, or the bitmap
    /// as binary PGM (one color) or PPM.
    pub fn to_file_bytes(&self) -> Vec<u8> {
        match self.format {
            ThumbnailFormat::Bitmap => {
                let magic = if self.colors == 1 { "P5" } else { "P6" };
                let max = if self.bits > 8 { 65535 } else { 255 };
                let mut out = format!("{}\n{} {}\n{}\n", magic, self.width, self.height, max).into_bytes();
                if self.bits > 8 {
                    // PNM samples wider than a byte are big-endian
                    for sample in self.data.chunks_exact(2) {
                        let value = u16::from_ne_bytes([sample[0], sample[1]]);
                        out.extend_from_slice(&value.to_be_bytes());
                    }
                } else {
                    out.extend_from_slice(&self.data);
                }
                out
            }
            _ => self.data.clone(),
        }
    }
}

impl<B: RawBackend> Processor<B> {
    /// Extracts the largest embedded preview of `path`.
    pub fn extract_thumbnail<P: AsRef<Path>>(&self, path: P) -> Result<Thumbnail> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        let mut timings = PipelineTimings::new();

        let mut guard = self.start_session()?;
        self.open(&mut guard, &c_path, &mut timings)?;

        let code = guard.session_mut().unpack_thumb();
        self.check(code, ProcessorError::Thumbnail)?;

        let (image, code) = guard.session_mut().make_mem_thumb();
        guard.hold_image(image);
        self.check(code, ProcessorError::Thumbnail)?;

        let image = guard
            .image()
            .ok_or_else(|| ProcessorError::Thumbnail("LibRaw returned no thumbnail".to_string()))?;
        let thumbnail = Thumbnail {
            format: ThumbnailFormat::from_code(image.format()),
            width: image.width(),
            height: image.height(),
            colors: image.colors(),
            bits: image.bits(),
            data: image.data().to_vec(),
        };

        debug!("Thumbnail format {:?}, {} bytes", thumbnail.format, thumbnail.data.len());
        info!(
            "Extracted {}x{} thumbnail from {}",
            thumbnail.width,
            thumbnail.height,
            path.display()
        );
        Ok(thumbnail)
    }
}
