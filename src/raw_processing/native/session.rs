use std::ffi::CStr;
use std::os::raw::c_int;

use super::strings::StringAllocator;
use super::types::{OutputParams, RawIParams, RawSizes};

/// Entry point of a native decoding library.
///
/// Shared between threads; every call to `init` hands out an independent
/// session, so implementations must not keep per-decode state here.
pub trait RawBackend: Send + Sync {
    type Session: RawSession;
    type Allocator: StringAllocator;

    /// Allocates a new session, `None` if the library cannot.
    fn init(&self) -> Option<Self::Session>;

    /// Human-readable text for a non-zero status code.
    fn error_message(&self, code: c_int) -> String;

    /// Allocator for the strings placed in the parameter block.
    fn allocator(&self) -> &Self::Allocator;
}

/// One native decoding session. Status codes are 0 on success.
pub trait RawSession {
    type Image: MemoryImage;

    fn params(&self) -> OutputParams;
    fn set_params(&mut self, params: &OutputParams);

    fn open_file(&mut self, path: &CStr) -> c_int;
    fn unpack(&mut self) -> c_int;
    fn process(&mut self) -> c_int;
    fn make_mem_image(&mut self) -> (Option<Self::Image>, c_int);

    fn unpack_thumb(&mut self) -> c_int;
    fn make_mem_thumb(&mut self) -> (Option<Self::Image>, c_int);

    fn recycle_and_close(self);

    fn iparams(&self) -> RawIParams;
    fn sizes(&self) -> RawSizes;
    /// Capture time in seconds since the epoch, 0 if the file has none.
    fn timestamp(&self) -> i64;
}

/// Flattened image produced by a session, valid until cleared.
pub trait MemoryImage {
    /// `LibRaw_image_formats` code
    fn format(&self) -> u32;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn colors(&self) -> u16;
    fn bits(&self) -> u16;
    fn data(&self) -> &[u8];

    /// Returns the buffer to the library that allocated it.
    fn clear(self);
}
