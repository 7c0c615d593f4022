use std::io::{Cursor, Write};

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{colortype, Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::image::DecodedImage;
use crate::raw_processing::tiff::types::{TiffCompression, TiffConfig};
use crate::raw_processing::tiff::writer::TiffWriter;

/// Writes 8-bit RGBA TIFFs with the `tiff` crate encoder.
pub struct StandardTiffWriter;

fn compression(value: TiffCompression) -> Compression {
    match value {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, image: &DecodedImage, output: &mut dyn Write, config: &TiffConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let want = image.width as usize * image.height as usize * DecodedImage::CHANNELS;
        if image.data.len() != want {
            return Err(ProcessorError::SizeMismatch {
                got: image.data.len(),
                want,
            });
        }

        // the encoder needs Seek, so encode into memory first
        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| ProcessorError::EncodeError(e.to_string()))?
            .with_compression(compression(config.compression));

        if let Some(predictor) = config.predictor {
            encoder = encoder.with_predictor(match predictor {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            });
        }

        encoder
            .write_image::<colortype::RGBA8>(image.width, image.height, &image.data)
            .map_err(|e| ProcessorError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        output.flush()?;

        debug!("TIFF encoding complete ({} bytes)", buffer.len());
        Ok(())
    }
}
