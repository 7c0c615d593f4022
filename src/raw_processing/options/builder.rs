use std::path::PathBuf;

use super::types::{
    CameraMatrix, FbddNoiseReduction, HighlightMode, Interpolation, OutputBitDepth, OutputColor,
    ProcessorOptions, Region,
};

/// Builder for ProcessorOptions
///
/// Starts from LibRaw's defaults; only the fields that are set are changed.
#[derive(Debug, Default)]
pub struct ProcessorOptionsBuilder {
    options: ProcessorOptions,
}

impl ProcessorOptionsBuilder {
    pub fn greybox(mut self, region: Region) -> Self {
        self.options.greybox = region;
        self
    }

    pub fn cropbox(mut self, region: Region) -> Self {
        self.options.cropbox = region;
        self
    }

    pub fn aberration(mut self, red: f64, blue: f64) -> Self {
        self.options.aberration[0] = red;
        self.options.aberration[2] = blue;
        self
    }

    pub fn gamma(mut self, power: f64, slope: f64) -> Self {
        self.options.gamma[0] = power;
        self.options.gamma[1] = slope;
        self
    }

    pub fn user_multipliers(mut self, multipliers: [f32; 4]) -> Self {
        self.options.user_multipliers = multipliers;
        self
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.options.brightness = brightness;
        self
    }

    pub fn denoise_threshold(mut self, threshold: f32) -> Self {
        self.options.denoise_threshold = threshold;
        self
    }

    pub fn half_size(mut self, enable: bool) -> Self {
        self.options.half_size = enable;
        self
    }

    pub fn four_color_rgb(mut self, enable: bool) -> Self {
        self.options.four_color_rgb = enable;
        self
    }

    pub fn highlight(mut self, mode: HighlightMode) -> Self {
        self.options.highlight = mode;
        self
    }

    pub fn use_auto_wb(mut self, enable: bool) -> Self {
        self.options.use_auto_wb = enable;
        self
    }

    pub fn use_camera_wb(mut self, enable: bool) -> Self {
        self.options.use_camera_wb = enable;
        self
    }

    pub fn camera_matrix(mut self, usage: CameraMatrix) -> Self {
        self.options.camera_matrix = usage;
        self
    }

    pub fn output_color(mut self, color: OutputColor) -> Self {
        self.options.output_color = color;
        self
    }

    pub fn output_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_profile = Some(path.into());
        self
    }

    pub fn camera_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.camera_profile = Some(path.into());
        self
    }

    pub fn bad_pixels(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.bad_pixels = Some(path.into());
        self
    }

    pub fn dark_frame(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.dark_frame = Some(path.into());
        self
    }

    pub fn output_bps(mut self, depth: OutputBitDepth) -> Self {
        self.options.output_bps = depth;
        self
    }

    pub fn output_tiff(mut self, enable: bool) -> Self {
        self.options.output_tiff = enable;
        self
    }

    pub fn user_flip(mut self, flip: Option<i32>) -> Self {
        self.options.user_flip = flip;
        self
    }

    pub fn interpolation(mut self, interpolation: Option<Interpolation>) -> Self {
        self.options.interpolation = interpolation;
        self
    }

    pub fn user_black(mut self, black: Option<i32>) -> Self {
        self.options.user_black = black;
        self
    }

    pub fn user_cblack(mut self, offsets: Option<[i32; 4]>) -> Self {
        self.options.user_cblack = offsets;
        self
    }

    pub fn user_sat(mut self, saturation: Option<i32>) -> Self {
        self.options.user_sat = saturation;
        self
    }

    pub fn median_passes(mut self, passes: u32) -> Self {
        self.options.median_passes = passes;
        self
    }

    pub fn auto_bright(mut self, enable: bool, threshold: f32) -> Self {
        self.options.no_auto_bright = !enable;
        self.options.auto_bright_threshold = threshold;
        self
    }

    pub fn adjust_maximum_threshold(mut self, threshold: f32) -> Self {
        self.options.adjust_maximum_threshold = threshold;
        self
    }

    pub fn use_fuji_rotate(mut self, enable: bool) -> Self {
        self.options.use_fuji_rotate = enable;
        self
    }

    pub fn green_matching(mut self, enable: bool) -> Self {
        self.options.green_matching = enable;
        self
    }

    pub fn dcb(mut self, iterations: i32, enhance: bool) -> Self {
        self.options.dcb_iterations = iterations;
        self.options.dcb_enhance = enhance;
        self
    }

    pub fn fbdd_noise_reduction(mut self, mode: FbddNoiseReduction) -> Self {
        self.options.fbdd_noise_reduction = mode;
        self
    }

    /// Enables exposure correction before demosaicing.
    pub fn exposure(mut self, shift: f32, preserve: f32) -> Self {
        self.options.exposure_correction = true;
        self.options.exposure_shift = shift;
        self.options.exposure_preserve = preserve;
        self
    }

    pub fn no_auto_scale(mut self, enable: bool) -> Self {
        self.options.no_auto_scale = enable;
        self
    }

    pub fn no_interpolation(mut self, enable: bool) -> Self {
        self.options.no_interpolation = enable;
        self
    }

    pub fn build(self) -> ProcessorOptions {
        self.options
    }
}
