//! Host copies of the LibRaw structures this crate reads and writes.

use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;

/// Value of `user_cblack[i]` that LibRaw treats as "no override".
pub const CBLACK_UNSET: c_int = -1_000_001;

/// Field-for-field mirror of the part of `libraw_output_params_t` the adapter
/// touches. String fields hold pointers owned by whoever allocated them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputParams {
    pub greybox: [c_uint; 4],
    pub cropbox: [c_uint; 4],
    pub aber: [f64; 4],
    pub gamm: [f64; 6],
    pub user_mul: [f32; 4],
    pub bright: f32,
    pub threshold: f32,
    pub half_size: c_int,
    pub four_color_rgb: c_int,
    pub highlight: c_int,
    pub use_auto_wb: c_int,
    pub use_camera_wb: c_int,
    pub use_camera_matrix: c_int,
    pub output_color: c_int,
    pub output_profile: *mut c_char,
    pub camera_profile: *mut c_char,
    pub bad_pixels: *mut c_char,
    pub dark_frame: *mut c_char,
    pub output_bps: c_int,
    pub output_tiff: c_int,
    pub output_flags: c_int,
    pub user_flip: c_int,
    pub user_qual: c_int,
    pub user_black: c_int,
    pub user_cblack: [c_int; 4],
    pub user_sat: c_int,
    pub med_passes: c_int,
    pub auto_bright_thr: f32,
    pub adjust_maximum_thr: f32,
    pub no_auto_bright: c_int,
    pub use_fuji_rotate: c_int,
    pub green_matching: c_int,
    pub dcb_iterations: c_int,
    pub dcb_enhance_fl: c_int,
    pub fbdd_noiserd: c_int,
    pub exp_correc: c_int,
    pub exp_shift: f32,
    pub exp_preser: f32,
    pub no_auto_scale: c_int,
    pub no_interpolation: c_int,
}

impl Default for OutputParams {
    /// The block as `libraw_init` leaves it.
    fn default() -> Self {
        Self {
            greybox: [0, 0, c_uint::MAX, c_uint::MAX],
            cropbox: [0, 0, c_uint::MAX, c_uint::MAX],
            aber: [1.0; 4],
            gamm: [0.45, 4.5, 0.0, 0.0, 0.0, 0.0],
            user_mul: [0.0; 4],
            bright: 1.0,
            threshold: 0.0,
            half_size: 0,
            four_color_rgb: 0,
            highlight: 0,
            use_auto_wb: 0,
            use_camera_wb: 0,
            use_camera_matrix: 1,
            output_color: 1,
            output_profile: ptr::null_mut(),
            camera_profile: ptr::null_mut(),
            bad_pixels: ptr::null_mut(),
            dark_frame: ptr::null_mut(),
            output_bps: 8,
            output_tiff: 0,
            output_flags: 0,
            user_flip: -1,
            user_qual: -1,
            user_black: -1,
            user_cblack: [CBLACK_UNSET; 4],
            user_sat: -1,
            med_passes: 0,
            auto_bright_thr: 0.01,
            adjust_maximum_thr: 0.75,
            no_auto_bright: 0,
            use_fuji_rotate: 1,
            green_matching: 0,
            dcb_iterations: -1,
            dcb_enhance_fl: 0,
            fbdd_noiserd: 0,
            exp_correc: 0,
            exp_shift: 1.0,
            exp_preser: 0.0,
            no_auto_scale: 0,
            no_interpolation: 0,
        }
    }
}

/// Copy of `libraw_iparams_t` fields, character arrays still untrimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawIParams {
    pub make: [c_char; 64],
    pub model: [c_char; 64],
    pub software: [c_char; 64],
    pub maker_index: c_uint,
    pub raw_count: c_uint,
    pub dng_version: c_uint,
    pub is_foveon: c_uint,
    pub colors: c_int,
    pub cdesc: [c_char; 5],
}

impl Default for RawIParams {
    fn default() -> Self {
        Self {
            make: [0; 64],
            model: [0; 64],
            software: [0; 64],
            maker_index: 0,
            raw_count: 0,
            dng_version: 0,
            is_foveon: 0,
            colors: 0,
            cdesc: [0; 5],
        }
    }
}

/// Copy of the `libraw_image_sizes_t` geometry fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSizes {
    pub raw_height: u32,
    pub raw_width: u32,
    pub height: u32,
    pub width: u32,
    pub iheight: u32,
    pub iwidth: u32,
}

/// `LibRaw_image_formats` values reported by memory images.
pub const IMAGE_FORMAT_JPEG: u32 = 1;
pub const IMAGE_FORMAT_BITMAP: u32 = 2;
