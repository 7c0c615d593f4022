//! RAW decoding through LibRaw
//!
//! Options are mapped onto LibRaw's parameter block, the decode stages run in
//! a private native session, and the result is copied into host-owned RGBA
//! pixels and metadata before the session is released.

pub mod common;
pub mod image;
pub mod metadata;
pub mod native;
pub mod options;
pub mod params;
pub mod pipeline;
pub mod thumbnail;
pub mod tiff;
pub mod translate;

pub use common::{ProcessorError, Result};

pub use image::DecodedImage;

pub use metadata::{CameraInfo, ImageMetadata, ImageSizes};

pub use native::{LibRaw, MemoryImage, RawBackend, RawSession};

pub use options::{
    CameraMatrix, FbddNoiseReduction, HighlightMode, Interpolation, OutputBitDepth, OutputColor,
    ProcessorOptions, ProcessorOptionsBuilder, Region,
};

pub use pipeline::{PipelineTimings, Processor, StepTiming};

pub use thumbnail::{Thumbnail, ThumbnailFormat};

pub use self::tiff::{save_tiff, StandardTiffWriter, TiffCompression, TiffConfig, TiffWriter};
