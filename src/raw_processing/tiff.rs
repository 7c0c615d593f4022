//! TIFF writing module
//!
//! Writes decoded RGBA images with various compression options.

mod standard_tiff_writer;
pub mod types;
mod writer;


use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::image::DecodedImage;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, TiffConfig, TiffConfigBuilder};
pub use writer::TiffWriter;

/// Writes `image` to a new file at `path`.
pub fn save_tiff<P: AsRef<Path>>(image: &DecodedImage, path: P, config: &TiffConfig) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| ProcessorError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    let mut output = BufWriter::new(file);

    StandardTiffWriter.write_tiff(image, &mut output, config)?;
    info!("Wrote {}", path.display());
    Ok(())
}
