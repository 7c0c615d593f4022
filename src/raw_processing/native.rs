//! Native decoding library seam
//!
//! The pipeline only talks to LibRaw through the traits in `session`, so the
//! same driver runs against the real library and against test doubles.

#[cfg(has_libraw)]
mod libraw;
mod session;
mod strings;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use session::{MemoryImage, RawBackend, RawSession};
pub use strings::{CStringAllocator, StringAllocator};
pub use types::{OutputParams, RawIParams, RawSizes, IMAGE_FORMAT_BITMAP, IMAGE_FORMAT_JPEG};

#[cfg(has_libraw)]
pub use libraw::{LibRaw, LibRawImage, LibRawSession};

// Fallback when the crate was built without LibRaw
#[cfg(not(has_libraw))]
pub use fallback::{LibRaw, Unavailable};

#[cfg(not(has_libraw))]
mod fallback {
    use std::ffi::CStr;
    use std::os::raw::c_int;

    use tracing::warn;

    use super::session::{MemoryImage, RawBackend, RawSession};
    use super::strings::CStringAllocator;
    use super::types::{OutputParams, RawIParams, RawSizes};

    /// Stand-in backend: never hands out a session.
    #[derive(Debug, Default)]
    pub struct LibRaw {
        allocator: CStringAllocator,
    }

    impl LibRaw {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn version() -> String {
            String::from("unavailable")
        }
    }

    impl RawBackend for LibRaw {
        type Session = Unavailable;
        type Allocator = CStringAllocator;

        fn init(&self) -> Option<Unavailable> {
            warn!("LibRaw support was not compiled into this build");
            None
        }

        fn error_message(&self, code: c_int) -> String {
            format!("LibRaw error {code}")
        }

        fn allocator(&self) -> &CStringAllocator {
            &self.allocator
        }
    }

    /// Uninhabited: no session or image can exist without LibRaw.
    pub enum Unavailable {}

    impl RawSession for Unavailable {
        type Image = Unavailable;

        fn params(&self) -> OutputParams {
            match *self {}
        }
        fn set_params(&mut self, _params: &OutputParams) {
            match *self {}
        }
        fn open_file(&mut self, _path: &CStr) -> c_int {
            match *self {}
        }
        fn unpack(&mut self) -> c_int {
            match *self {}
        }
        fn process(&mut self) -> c_int {
            match *self {}
        }
        fn make_mem_image(&mut self) -> (Option<Unavailable>, c_int) {
            match *self {}
        }
        fn unpack_thumb(&mut self) -> c_int {
            match *self {}
        }
        fn make_mem_thumb(&mut self) -> (Option<Unavailable>, c_int) {
            match *self {}
        }
        fn recycle_and_close(self) {
            match self {}
        }
        fn iparams(&self) -> RawIParams {
            match *self {}
        }
        fn sizes(&self) -> RawSizes {
            match *self {}
        }
        fn timestamp(&self) -> i64 {
            match *self {}
        }
    }

    impl MemoryImage for Unavailable {
        fn format(&self) -> u32 {
            match *self {}
        }
        fn width(&self) -> u32 {
            match *self {}
        }
        fn height(&self) -> u32 {
            match *self {}
        }
        fn colors(&self) -> u16 {
            match *self {}
        }
        fn bits(&self) -> u16 {
            match *self {}
        }
        fn data(&self) -> &[u8] {
            match *self {}
        }
        fn clear(self) {
            match self {}
        }
    }
}
