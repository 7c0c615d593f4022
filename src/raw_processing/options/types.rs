//! Processor configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Rectangle in sensor pixel coordinates, stored as `[x1, y1, x2, y2]`.
///
/// LibRaw reads the last pair as either a corner or a width/height depending on
/// the field. The all-zero rectangle is the "unset" sentinel: it is never sent
/// to LibRaw, which then keeps its own whole-frame default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Region {
    pub const UNSET: Region = Region { x1: 0, y1: 0, x2: 0, y2: 0 };

    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    pub fn to_array(self) -> [u32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Output color space, in LibRaw's `output_color` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputColor {
    /// Camera color space, no conversion
    Raw = 0,
    #[default]
    Srgb = 1,
    AdobeRgb = 2,
    WideGamutRgb = 3,
    ProPhotoRgb = 4,
    Xyz = 5,
    Aces = 6,
    DciP3 = 7,
    Rec2020 = 8,
}

impl OutputColor {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Highlight recovery strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    #[default]
    Clip,
    Unclip,
    Blend,
    /// Reconstruction, usually level 3 (favour whites) to 9 (favour colors).
    /// The level reaches LibRaw unchanged.
    Rebuild(u8),
}

impl HighlightMode {
    pub fn code(self) -> i32 {
        match self {
            HighlightMode::Clip => 0,
            HighlightMode::Unclip => 1,
            HighlightMode::Blend => 2,
            HighlightMode::Rebuild(level) => i32::from(level),
        }
    }
}

/// When LibRaw applies the embedded camera color matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMatrix {
    Never,
    /// For DNG files, or when camera white balance is used
    #[default]
    Auto,
    Always,
}

impl CameraMatrix {
    pub fn code(self) -> i32 {
        match self {
            CameraMatrix::Never => 0,
            CameraMatrix::Auto => 1,
            CameraMatrix::Always => 3,
        }
    }
}

/// Demosaic algorithm (`user_qual`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Linear = 0,
    Vng = 1,
    Ppg = 2,
    Ahd = 3,
    Dcb = 4,
    Dht = 11,
    Aahd = 12,
}

impl Interpolation {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputBitDepth {
    #[default]
    Eight,
    Sixteen,
}

impl OutputBitDepth {
    pub fn bits(self) -> i32 {
        match self {
            OutputBitDepth::Eight => 8,
            OutputBitDepth::Sixteen => 16,
        }
    }
}

/// FBDD noise reduction applied before demosaicing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FbddNoiseReduction {
    #[default]
    Off,
    Light,
    Full,
}

impl FbddNoiseReduction {
    pub fn code(self) -> i32 {
        match self {
            FbddNoiseReduction::Off => 0,
            FbddNoiseReduction::Light => 1,
            FbddNoiseReduction::Full => 2,
        }
    }
}

/// Every tunable LibRaw decode parameter.
///
/// `Default` reproduces LibRaw's built-in defaults. Nothing is validated here:
/// out-of-range combinations are reported by LibRaw during decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Area used to compute white balance; `Region::UNSET` means the whole frame
    pub greybox: Region,
    /// Crop rectangle as `x, y, width, height`; `Region::UNSET` means no crop
    pub cropbox: Region,
    /// Chromatic aberration correction (red and blue scale factors)
    pub aberration: [f64; 4],
    /// Gamma curve: power, toe slope, then four values LibRaw computes itself
    pub gamma: [f64; 6],
    /// User white balance multipliers (r, g, b, g2); all zero disables them
    pub user_multipliers: [f32; 4],
    pub brightness: f32,
    /// Wavelet denoising threshold, 0 disables
    pub denoise_threshold: f32,

    pub half_size: bool,
    /// Interpolate the two green channels separately
    pub four_color_rgb: bool,
    pub highlight: HighlightMode,
    pub use_auto_wb: bool,
    pub use_camera_wb: bool,
    pub camera_matrix: CameraMatrix,

    pub output_color: OutputColor,
    /// Output ICC profile
    pub output_profile: Option<PathBuf>,
    /// Input ICC profile, or `embed` for the profile embedded in the file
    pub camera_profile: Option<PathBuf>,
    /// Bad pixel map in dcraw format
    pub bad_pixels: Option<PathBuf>,
    /// 16-bit PGM dark frame
    pub dark_frame: Option<PathBuf>,

    pub output_bps: OutputBitDepth,
    pub output_tiff: bool,
    /// Raw `output_flags` bitfield
    pub output_flags: i32,
    /// Rotation override (0, 3, 5, 6); `None` uses the EXIF orientation
    pub user_flip: Option<i32>,
    /// `None` lets LibRaw pick (AHD)
    pub interpolation: Option<Interpolation>,
    pub user_black: Option<i32>,
    /// Per-channel black level offsets; `None` keeps LibRaw's own value
    pub user_cblack: Option<[i32; 4]>,
    pub user_sat: Option<i32>,
    pub median_passes: u32,
    pub auto_bright_threshold: f32,
    pub adjust_maximum_threshold: f32,
    pub no_auto_bright: bool,
    pub use_fuji_rotate: bool,
    pub green_matching: bool,
    pub dcb_iterations: i32,
    pub dcb_enhance: bool,
    pub fbdd_noise_reduction: FbddNoiseReduction,
    pub exposure_correction: bool,
    /// Linear exposure shift, 0.25 (-2 EV) to 8.0 (+3 EV)
    pub exposure_shift: f32,
    /// Highlight preservation while shifting exposure, 0.0 to 1.0
    pub exposure_preserve: f32,
    pub no_auto_scale: bool,
    pub no_interpolation: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            greybox: Region::UNSET,
            cropbox: Region::UNSET,
            aberration: [1.0; 4],
            gamma: [0.45, 4.5, 0.0, 0.0, 0.0, 0.0],
            user_multipliers: [0.0; 4],
            brightness: 1.0,
            denoise_threshold: 0.0,

            half_size: false,
            four_color_rgb: false,
            highlight: HighlightMode::Clip,
            use_auto_wb: false,
            use_camera_wb: false,
            camera_matrix: CameraMatrix::Auto,

            output_color: OutputColor::Srgb,
            output_profile: None,
            camera_profile: None,
            bad_pixels: None,
            dark_frame: None,

            output_bps: OutputBitDepth::Eight,
            output_tiff: false,
            output_flags: 0,
            user_flip: None,
            interpolation: None,
            user_black: None,
            user_cblack: None,
            user_sat: None,
            median_passes: 0,
            auto_bright_threshold: 0.01,
            adjust_maximum_threshold: 0.75,
            no_auto_bright: false,
            use_fuji_rotate: true,
            green_matching: false,
            dcb_iterations: 0,
            dcb_enhance: false,
            fbdd_noise_reduction: FbddNoiseReduction::Off,
            exposure_correction: false,
            exposure_shift: 1.0,
            exposure_preserve: 0.0,
            no_auto_scale: false,
            no_interpolation: false,
        }
    }
}
