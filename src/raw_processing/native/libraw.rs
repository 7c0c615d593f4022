//! LibRaw backend over the bindgen-generated bindings.
//!
//! Linked against `libraw_r`, whose sessions share no mutable global state, so
//! independent sessions may run on different threads at the same time.

use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr::{self, NonNull};

use tracing::debug;

use super::session::{MemoryImage, RawBackend, RawSession};
use super::strings::CStringAllocator;
use super::types::{OutputParams, RawIParams, RawSizes};

#[allow(non_upper_case_globals)]
#[allow(non_camel_case_types)]
#[allow(non_snake_case)]
#[allow(dead_code)]
mod sys {
    include!(concat!(env!("OUT_DIR"), "/libraw_bindings.rs"));
}

/// Copies every mirrored field from `$src` into `$dst`.
macro_rules! copy_params {
    ($dst:expr, $src:expr; $($field:ident),+) => {
        $( $dst.$field = $src.$field; )+
    };
    ($dst:expr, $src:expr) => {
        copy_params!(
            $dst, $src;
            greybox, cropbox, aber, gamm, user_mul, bright, threshold,
            half_size, four_color_rgb, highlight, use_auto_wb, use_camera_wb,
            use_camera_matrix, output_color, output_profile, camera_profile,
            bad_pixels, dark_frame, output_bps, output_tiff, output_flags,
            user_flip, user_qual, user_black, user_cblack, user_sat, med_passes,
            auto_bright_thr, adjust_maximum_thr, no_auto_bright, use_fuji_rotate,
            green_matching, dcb_iterations, dcb_enhance_fl, fbdd_noiserd,
            exp_correc, exp_shift, exp_preser, no_auto_scale, no_interpolation
        )
    };
}

/// The system LibRaw library.
#[derive(Debug, Default)]
pub struct LibRaw {
    allocator: CStringAllocator,
}

impl LibRaw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version() -> String {
        let version = unsafe { sys::libraw_version() };
        if version.is_null() {
            return String::from("unknown");
        }
        unsafe { CStr::from_ptr(version) }.to_string_lossy().into_owned()
    }
}

impl RawBackend for LibRaw {
    type Session = LibRawSession;
    type Allocator = CStringAllocator;

    fn init(&self) -> Option<LibRawSession> {
        let data = NonNull::new(unsafe { sys::libraw_init(0) })?;
        debug!("LibRaw {} session initialized", Self::version());
        Some(LibRawSession { data })
    }

    fn error_message(&self, code: c_int) -> String {
        let message = unsafe { sys::libraw_strerror(code) };
        if message.is_null() {
            return format!("LibRaw error {code}");
        }
        unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
    }

    fn allocator(&self) -> &CStringAllocator {
        &self.allocator
    }
}

/// Owns one `libraw_data_t`; closed by `recycle_and_close`.
pub struct LibRawSession {
    data: NonNull<sys::libraw_data_t>,
}

impl LibRawSession {
    fn raw(&self) -> &sys::libraw_data_t {
        unsafe { self.data.as_ref() }
    }

    fn wrap_image(
        image: *mut sys::libraw_processed_image_t,
        errc: c_int,
    ) -> (Option<LibRawImage>, c_int) {
        (NonNull::new(image).map(|ptr| LibRawImage { ptr }), errc)
    }
}

impl RawSession for LibRawSession {
    type Image = LibRawImage;

    fn params(&self) -> OutputParams {
        let mut params = OutputParams::default();
        copy_params!(params, self.raw().params);
        params
    }

    fn set_params(&mut self, params: &OutputParams) {
        let native = unsafe { &mut self.data.as_mut().params };
        copy_params!(native, params);
    }

    fn open_file(&mut self, path: &CStr) -> c_int {
        unsafe { sys::libraw_open_file(self.data.as_ptr(), path.as_ptr()) }
    }

    fn unpack(&mut self) -> c_int {
        unsafe { sys::libraw_unpack(self.data.as_ptr()) }
    }

    fn process(&mut self) -> c_int {
        unsafe { sys::libraw_dcraw_process(self.data.as_ptr()) }
    }

    fn make_mem_image(&mut self) -> (Option<LibRawImage>, c_int) {
        let mut errc: c_int = 0;
        let image = unsafe { sys::libraw_dcraw_make_mem_image(self.data.as_ptr(), &mut errc) };
        Self::wrap_image(image, errc)
    }

    fn unpack_thumb(&mut self) -> c_int {
        unsafe { sys::libraw_unpack_thumb(self.data.as_ptr()) }
    }

    fn make_mem_thumb(&mut self) -> (Option<LibRawImage>, c_int) {
        let mut errc: c_int = 0;
        let image = unsafe { sys::libraw_dcraw_make_mem_thumb(self.data.as_ptr(), &mut errc) };
        Self::wrap_image(image, errc)
    }

    fn recycle_and_close(self) {
        unsafe {
            sys::libraw_recycle(self.data.as_ptr());
            sys::libraw_close(self.data.as_ptr());
        }
    }

    fn iparams(&self) -> RawIParams {
        let idata = &self.raw().idata;
        RawIParams {
            make: idata.make,
            model: idata.model,
            software: idata.software,
            maker_index: idata.maker_index as _,
            raw_count: idata.raw_count as _,
            dng_version: idata.dng_version as _,
            is_foveon: idata.is_foveon as _,
            colors: idata.colors as _,
            cdesc: idata.cdesc,
        }
    }

    fn sizes(&self) -> RawSizes {
        let sizes = &self.raw().sizes;
        RawSizes {
            raw_height: u32::from(sizes.raw_height),
            raw_width: u32::from(sizes.raw_width),
            height: u32::from(sizes.height),
            width: u32::from(sizes.width),
            iheight: u32::from(sizes.iheight),
            iwidth: u32::from(sizes.iwidth),
        }
    }

    fn timestamp(&self) -> i64 {
        self.raw().other.timestamp as i64
    }
}

/// A `libraw_processed_image_t` allocated by LibRaw.
pub struct LibRawImage {
    ptr: NonNull<sys::libraw_processed_image_t>,
}

impl LibRawImage {
    fn raw(&self) -> &sys::libraw_processed_image_t {
        unsafe { self.ptr.as_ref() }
    }
}

impl MemoryImage for LibRawImage {
    fn format(&self) -> u32 {
        self.raw().type_ as u32
    }

    fn width(&self) -> u32 {
        u32::from(self.raw().width)
    }

    fn height(&self) -> u32 {
        u32::from(self.raw().height)
    }

    fn colors(&self) -> u16 {
        self.raw().colors as u16
    }

    fn bits(&self) -> u16 {
        self.raw().bits as u16
    }

    fn data(&self) -> &[u8] {
        let image = self.ptr.as_ptr();
        unsafe {
            // `data` is a C flexible array member of `data_size` bytes
            let start = ptr::addr_of!((*image).data) as *const u8;
            std::slice::from_raw_parts(start, (*image).data_size as usize)
        }
    }

    fn clear(self) {
        unsafe { sys::libraw_dcraw_clear_mem(self.ptr.as_ptr()) };
    }
}
