use std::io::Write;

use crate::raw_processing::common::error::Result;
use crate::raw_processing::image::DecodedImage;
use crate::raw_processing::tiff::types::TiffConfig;

pub trait TiffWriter {
    fn write_tiff(&self, image: &DecodedImage, output: &mut dyn Write, config: &TiffConfig) -> Result<()>;
}
