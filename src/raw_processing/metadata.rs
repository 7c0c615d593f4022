//! Image metadata snapshot types
//!
//! Everything here is copied out of the native structures before the session
//! is closed; nothing borrows LibRaw memory.

use std::fmt;

use chrono::{DateTime, Local, Utc};

/// Camera identification and sensor layout (`libraw_iparams_t`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraInfo {
    pub make: String,
    pub model: String,
    pub maker_index: u32,
    /// Firmware or processing software
    pub software: String,
    /// Number of raw images in the file
    pub raw_count: u32,
    pub is_foveon: bool,
    /// DNG version as packed bytes, 0 for non-DNG files
    pub dng_version: u32,
    /// Number of color planes, 3 or 4
    pub colors: i32,
    /// One character per color plane, e.g. `RGBG`
    pub color_description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Make: {}", self.make)?;
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Software: {}", self.software)?;
        writeln!(f, "MakerIndex: {}", self.maker_index)?;
        writeln!(f, "RawCount: {}", self.raw_count)?;
        writeln!(f, "IsFoveon: {}", u8::from(self.is_foveon))?;
        writeln!(f, "DngVersion: {}", self.dng_version)?;
        writeln!(f, "Colors: {}", self.colors)?;
        writeln!(f, "Color descriptions: {}", self.color_description)
    }
}

/// Image geometry (`libraw_image_sizes_t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSizes {
    /// Full sensor size, including masked areas
    pub raw_height: u32,
    pub raw_width: u32,
    /// Visible area
    pub height: u32,
    pub width: u32,
    /// Size of the intermediate image (halved when `half_size` is set)
    pub iheight: u32,
    pub iwidth: u32,
}

impl fmt::Display for ImageSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RawHeight: {}", self.raw_height)?;
        writeln!(f, "RawWidth: {}", self.raw_width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "IHeight: {}", self.iheight)?;
        writeln!(f, "IWidth: {}", self.iwidth)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Seconds since the epoch. 0 usually means the camera did not record it.
    pub capture_timestamp: i64,
    /// `capture_timestamp` as UTC, `None` if out of range
    pub capture_date: Option<DateTime<Utc>>,
    pub camera: CameraInfo,
    pub sizes: ImageSizes,
}

impl ImageMetadata {
    pub fn has_capture_time(&self) -> bool {
        self.capture_timestamp != 0
    }

    pub fn capture_date_local(&self) -> Option<DateTime<Local>> {
        self.capture_date.map(|date| date.with_timezone(&Local))
    }
}
