use std::ffi::CStr;
use std::os::raw::c_int;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::raw_processing::common::error::{ProcessorError, Result};
use crate::raw_processing::image::DecodedImage;
use crate::raw_processing::metadata::ImageMetadata;
use crate::raw_processing::native::{LibRaw, MemoryImage, RawBackend, RawSession};
use crate::raw_processing::options::ProcessorOptions;
use crate::raw_processing::params::{apply, path_to_cstring};
use crate::raw_processing::pipeline::teardown::SessionGuard;
use crate::raw_processing::pipeline::timing::{timed, PipelineTimings};
use crate::raw_processing::translate::{snapshot_metadata, translate_pixels};

pub(crate) type Guard<'a, B> =
    SessionGuard<'a, <B as RawBackend>::Session, <B as RawBackend>::Allocator>;

/// Decodes RAW files with a fixed set of options.
///
/// Holds no per-call state: every call opens its own native session, so one
/// `Processor` can be shared by reference across threads.
pub struct Processor<B: RawBackend = LibRaw> {
    backend: B,
    options: ProcessorOptions,
}

impl Processor<LibRaw> {
    pub fn new(options: ProcessorOptions) -> Self {
        Self {
            backend: LibRaw::new(),
            options,
        }
    }
}

impl Default for Processor<LibRaw> {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

impl<B: RawBackend> Processor<B> {
    pub fn with_backend(backend: B, options: ProcessorOptions) -> Self {
        Self { backend, options }
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decodes `path` into an 8-bit RGBA image and its metadata.
    pub fn process_raw<P: AsRef<Path>>(&self, path: P) -> Result<(DecodedImage, ImageMetadata)> {
        let mut timings = PipelineTimings::new();
        self.decode(path.as_ref(), &mut timings)
    }

    pub fn process_raw_with_timings<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(DecodedImage, ImageMetadata, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let (image, metadata) = self.decode(path.as_ref(), &mut timings)?;
        timings.log_summary();
        Ok((image, metadata, timings))
    }

    /// Reads metadata without demosaicing.
    pub fn read_metadata<P: AsRef<Path>>(&self, path: P) -> Result<ImageMetadata> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        let mut timings = PipelineTimings::new();

        let mut guard = timed(&mut timings, "init", || self.start_session())?;
        self.open(&mut guard, &c_path, &mut timings)?;
        let code = timed(&mut timings, "unpack", || guard.session_mut().unpack());
        self.check(code, ProcessorError::Unpack)?;

        let metadata = snapshot_metadata(guard.session());
        debug!("Read metadata of {}", path.display());
        Ok(metadata)
    }

    fn decode(&self, path: &Path, timings: &mut PipelineTimings) -> Result<(DecodedImage, ImageMetadata)> {
        info!("Decoding {}", path.display());
        let c_path = path_to_cstring(path)?;

        let mut guard = timed(timings, "init", || self.start_session())?;
        self.open(&mut guard, &c_path, timings)?;

        let code = timed(timings, "unpack", || guard.session_mut().unpack());
        self.check(code, ProcessorError::Unpack)?;

        let code = timed(timings, "process", || guard.session_mut().process());
        self.check(code, ProcessorError::Process)?;

        timed(timings, "make_mem_image", || self.materialize(&mut guard))?;
        let (image, metadata) = timed(timings, "translate", || Self::translate(&guard))?;

        info!(
            "Decoded {}x{} image from {} {}",
            image.width, image.height, metadata.camera.make, metadata.camera.model
        );
        Ok((image, metadata))
    }

    /// Creates a session and applies the options to its parameter block.
    ///
    /// The returned guard owns the session and the parameter strings.
    pub(crate) fn start_session(&self) -> Result<Guard<'_, B>> {
        let session = self.backend.init().ok_or(ProcessorError::Initialization)?;
        let mut guard = SessionGuard::new(session);

        let (params, strings) = apply(&guard.session().params(), &self.options, self.backend.allocator())?;
        guard.session_mut().set_params(&params);
        guard.hold_strings(strings);
        Ok(guard)
    }

    pub(crate) fn open(
        &self,
        guard: &mut Guard<'_, B>,
        path: &CStr,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let code = timed(timings, "open", || guard.session_mut().open_file(path));
        self.check(code, ProcessorError::Open)
    }

    /// Maps a LibRaw status code to `Ok` or the error for the failing stage.
    pub(crate) fn check(&self, code: c_int, stage: fn(String) -> ProcessorError) -> Result<()> {
        if code == 0 {
            return Ok(());
        }
        let message = self.backend.error_message(code);
        let error = stage(message);
        warn!("LibRaw returned {}: {}", code, error);
        Err(error)
    }

    fn materialize(&self, guard: &mut Guard<'_, B>) -> Result<()> {
        let (image, code) = guard.session_mut().make_mem_image();
        // held before the status check so a buffer returned with an error is still cleared
        guard.hold_image(image);
        self.check(code, ProcessorError::Materialize)?;

        if guard.image().is_none() {
            return Err(ProcessorError::Materialize(
                "LibRaw returned no image".to_string(),
            ));
        }
        Ok(())
    }

    fn translate(guard: &Guard<'_, B>) -> Result<(DecodedImage, ImageMetadata)> {
        let image = guard
            .image()
            .ok_or_else(|| ProcessorError::Materialize("LibRaw returned no image".to_string()))?;
        debug!(
            "Memory image: {}x{}, {} colors, {} bits",
            image.width(),
            image.height(),
            image.colors(),
            image.bits()
        );

        let decoded = translate_pixels(image.data(), image.width(), image.height(), image.bits())?;
        let metadata = snapshot_metadata(guard.session());
        Ok((decoded, metadata))
    }
}
