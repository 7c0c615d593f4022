//! Native memory image and metadata translation
//!
//! Copies everything the caller keeps out of LibRaw-owned memory, so the
//! session and its buffers can be released as soon as translation returns.


use std::os::raw::c_char;

use chrono::DateTime;
use tracing::debug;

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::image::DecodedImage;
use crate::raw_processing::metadata::{CameraInfo, ImageMetadata, ImageSizes};
use crate::raw_processing::native::{RawIParams, RawSession, RawSizes};

const RGB: usize = 3;
const OPAQUE: u8 = u8::MAX;

/// Reads a fixed-capacity C character array up to its first NUL.
pub fn c_array_to_string(chars: &[c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Bytes a packed RGB buffer of this geometry must hold.
pub fn expected_len(width: u32, height: u32, bits: u16) -> usize {
    let bytes_per_sample = if bits > 8 { 2 } else { 1 };
    width as usize * height as usize * RGB * bytes_per_sample
}

/// Converts a packed RGB buffer into 8-bit RGBA.
///
/// Samples deeper than 8 bits are two native-endian bytes, reduced with a
/// right shift by `bits - 8`. The length is checked before any conversion.
pub fn translate_pixels(data: &[u8], width: u32, height: u32, bits: u16) -> Result<DecodedImage> {
    if bits == 0 || bits > 16 {
        return Err(ProcessorError::UnsupportedBitDepth(bits));
    }

    let want = expected_len(width, height, bits);
    if data.len() != want {
        return Err(ProcessorError::SizeMismatch {
            got: data.len(),
            want,
        });
    }

    let pixels = width as usize * height as usize;
    let mut rgba = Vec::with_capacity(pixels * DecodedImage::CHANNELS);

    if bits <= 8 {
        for rgb in data.chunks_exact(RGB) {
            rgba.extend_from_slice(rgb);
            rgba.push(OPAQUE);
        }
    } else {
        let shift = u32::from(bits - 8);
        for rgb in data.chunks_exact(RGB * 2) {
            for sample in rgb.chunks_exact(2) {
                let value = u16::from_ne_bytes([sample[0], sample[1]]);
                rgba.push((value >> shift) as u8);
            }
            rgba.push(OPAQUE);
        }
    }

    debug!("Translated {}x{} {}-bit image", width, height, bits);
    Ok(DecodedImage {
        width,
        height,
        data: rgba,
    })
}

pub fn metadata_from_native(iparams: &RawIParams, sizes: &RawSizes, timestamp: i64) -> ImageMetadata {
    let camera = CameraInfo {
        make: c_array_to_string(&iparams.make),
        model: c_array_to_string(&iparams.model),
        maker_index: iparams.maker_index,
        software: c_array_to_string(&iparams.software),
        raw_count: iparams.raw_count,
        is_foveon: iparams.is_foveon != 0,
        dng_version: iparams.dng_version,
        colors: iparams.colors,
        color_description: c_array_to_string(&iparams.cdesc),
    };

    let sizes = ImageSizes {
        raw_height: sizes.raw_height,
        raw_width: sizes.raw_width,
        height: sizes.height,
        width: sizes.width,
        iheight: sizes.iheight,
        iwidth: sizes.iwidth,
    };

    ImageMetadata {
        capture_timestamp: timestamp,
        capture_date: DateTime::from_timestamp(timestamp, 0),
        camera,
        sizes,
    }
}

/// Copies the metadata of the file currently open in `session`.
pub fn snapshot_metadata<S: RawSession>(session: &S) -> ImageMetadata {
    metadata_from_native(&session.iparams(), &session.sizes(), session.timestamp())
}
