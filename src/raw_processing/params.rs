//! Options to LibRaw parameter block adapter
//!
//! `apply` writes a `ProcessorOptions` over the block a fresh session starts
//! with. Path options become C strings owned by the returned `ParamStrings`,
//! which frees them when released or dropped.

#[cfg(test)]
mod tests;

use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::path::Path;

use tracing::debug;

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::native::{OutputParams, StringAllocator};
use crate::raw_processing::options::{ProcessorOptions, Region};

/// C strings placed in a parameter block by `apply`.
///
/// Holds exactly the pointers this adapter allocated; the block's other string
/// fields are never freed here.
pub struct ParamStrings<'a, A: StringAllocator + ?Sized> {
    allocator: &'a A,
    allocated: Vec<*mut c_char>,
}

impl<'a, A: StringAllocator + ?Sized> ParamStrings<'a, A> {
    fn new(allocator: &'a A) -> Self {
        Self {
            allocator,
            allocated: Vec::new(),
        }
    }

    /// Allocates `path` unless it is absent or empty.
    fn alloc_path(&mut self, path: Option<&Path>) -> Result<Option<*mut c_char>> {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(None);
        };
        let value = path_to_cstring(path)?;
        let ptr = self.allocator.alloc(&value);
        self.allocated.push(ptr);
        Ok(Some(ptr))
    }

    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    /// Frees every string allocated by `apply`. Calling it again is a no-op.
    pub fn release(&mut self) {
        for ptr in self.allocated.drain(..) {
            if !ptr.is_null() {
                unsafe { self.allocator.free(ptr) };
            }
        }
    }
}

impl<A: StringAllocator + ?Sized> Drop for ParamStrings<'_, A> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Converts a path to the NUL-terminated form LibRaw expects.
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path
        .to_str()
        .ok_or_else(|| ProcessorError::InvalidPath(path.display().to_string()))?
        .as_bytes()
        .to_vec();

    CString::new(bytes).map_err(|_| ProcessorError::InvalidPath(path.display().to_string()))
}

fn flag(value: bool) -> c_int {
    if value { 1 } else { 0 }
}

fn region(value: Region, default: [u32; 4]) -> [u32; 4] {
    if value.is_unset() {
        default
    } else {
        value.to_array()
    }
}

/// Returns `base` with every option applied, plus the strings it now points to.
///
/// On error the strings allocated so far are released before returning.
pub fn apply<'a, A: StringAllocator + ?Sized>(
    base: &OutputParams,
    options: &ProcessorOptions,
    allocator: &'a A,
) -> Result<(OutputParams, ParamStrings<'a, A>)> {
    let mut params = *base;
    let mut strings = ParamStrings::new(allocator);

    params.greybox = region(options.greybox, base.greybox);
    params.cropbox = region(options.cropbox, base.cropbox);

    params.aber = options.aberration;
    params.gamm = options.gamma;
    params.user_mul = options.user_multipliers;
    params.bright = options.brightness;
    params.threshold = options.denoise_threshold;

    params.half_size = flag(options.half_size);
    params.four_color_rgb = flag(options.four_color_rgb);
    params.highlight = options.highlight.code();
    params.use_auto_wb = flag(options.use_auto_wb);
    params.use_camera_wb = flag(options.use_camera_wb);
    params.use_camera_matrix = options.camera_matrix.code();

    params.output_color = options.output_color.code();

    if let Some(ptr) = strings.alloc_path(options.output_profile.as_deref())? {
        params.output_profile = ptr;
    }
    if let Some(ptr) = strings.alloc_path(options.camera_profile.as_deref())? {
        params.camera_profile = ptr;
    }
    if let Some(ptr) = strings.alloc_path(options.bad_pixels.as_deref())? {
        params.bad_pixels = ptr;
    }
    if let Some(ptr) = strings.alloc_path(options.dark_frame.as_deref())? {
        params.dark_frame = ptr;
    }

    params.output_bps = options.output_bps.bits();
    params.output_tiff = flag(options.output_tiff);
    params.output_flags = options.output_flags;

    // -1 asks LibRaw to decide
    params.user_flip = options.user_flip.unwrap_or(-1);
    params.user_qual = options.interpolation.map_or(-1, |q| q.code());
    params.user_black = options.user_black.unwrap_or(-1);
    if let Some(cblack) = options.user_cblack {
        params.user_cblack = cblack;
    }
    params.user_sat = options.user_sat.unwrap_or(-1);

    params.med_passes = c_int::try_from(options.median_passes).unwrap_or(c_int::MAX);
    params.auto_bright_thr = options.auto_bright_threshold;
    params.adjust_maximum_thr = options.adjust_maximum_threshold;
    params.no_auto_bright = flag(options.no_auto_bright);
    params.use_fuji_rotate = flag(options.use_fuji_rotate);
    params.green_matching = flag(options.green_matching);
    params.dcb_iterations = options.dcb_iterations;
    params.dcb_enhance_fl = flag(options.dcb_enhance);
    params.fbdd_noiserd = options.fbdd_noise_reduction.code();
    params.exp_correc = flag(options.exposure_correction);
    params.exp_shift = options.exposure_shift;
    params.exp_preser = options.exposure_preserve;
    params.no_auto_scale = flag(options.no_auto_scale);
    params.no_interpolation = flag(options.no_interpolation);

    debug!("Applied processor options ({} path strings)", strings.len());
    Ok((params, strings))
}
