//! In-memory stand-ins for the native seam, with counters for every
//! acquisition and release.

use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::session::{MemoryImage, RawBackend, RawSession};
use super::strings::StringAllocator;
use super::types::{IMAGE_FORMAT_JPEG, OutputParams, RawIParams, RawSizes};

pub const ERR_UNSUPPORTED: c_int = -2;
pub const ERR_DATA: c_int = -10;
pub const ERR_IO: c_int = -11;

/// Counts allocations so tests can assert nothing is left outstanding.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    allocs: AtomicUsize,
    frees: AtomicUsize,
}

impl CountingAllocator {
    pub fn allocs(&self) -> usize {
        self.allocs.load(Ordering::SeqCst)
    }

    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    pub fn outstanding(&self) -> usize {
        self.allocs() - self.frees()
    }
}

impl StringAllocator for CountingAllocator {
    fn alloc(&self, value: &CStr) -> *mut c_char {
        self.allocs.fetch_add(1, Ordering::SeqCst);
        value.to_owned().into_raw()
    }

    unsafe fn free(&self, ptr: *mut c_char) {
        self.frees.fetch_add(1, Ordering::SeqCst);
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Native call a mock session can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockStage {
    Open,
    Unpack,
    Process,
    MakeImage,
    UnpackThumb,
    MakeThumb,
}

/// What a fixture file decodes to.
#[derive(Debug, Clone)]
pub struct MockFixture {
    pub width: u32,
    pub height: u32,
    pub bits: u16,
    pub data: Vec<u8>,
    pub iparams: RawIParams,
    pub sizes: RawSizes,
    pub timestamp: i64,
    pub thumbnail: Option<(u32, Vec<u8>)>,
}

impl MockFixture {
    /// 8-bit RGB fixture whose bytes are derived from `seed`.
    pub fn rgb8(width: u32, height: u32, seed: u8) -> Self {
        let len = (width * height * 3) as usize;
        let data = (0..len).map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed)).collect();
        Self {
            width,
            height,
            bits: 8,
            data,
            iparams: iparams("Canon", "EOS 5D", "RGBG", 3),
            sizes: RawSizes {
                raw_height: height + 8,
                raw_width: width + 8,
                height,
                width,
                iheight: height,
                iwidth: width,
            },
            timestamp: 1_700_000_000 + i64::from(seed),
            thumbnail: Some((IMAGE_FORMAT_JPEG, vec![0xFF, 0xD8, seed, 0xFF, 0xD9])),
        }
    }
}

pub fn c_chars<const N: usize>(value: &str) -> [c_char; N] {
    let mut out = [0 as c_char; N];
    for (dst, src) in out.iter_mut().zip(value.bytes()) {
        *dst = src as c_char;
    }
    out
}

pub fn iparams(make: &str, model: &str, cdesc: &str, colors: c_int) -> RawIParams {
    RawIParams {
        make: c_chars(make),
        model: c_chars(model),
        software: c_chars("Firmware 1.1.0"),
        maker_index: 6,
        raw_count: 1,
        dng_version: 0,
        is_foveon: 0,
        colors,
        cdesc: c_chars(cdesc),
    }
}

/// Parameters a session saw when the file was opened.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenParams {
    pub half_size: c_int,
    pub output_bps: c_int,
    pub user_qual: c_int,
    pub dark_frame: Option<String>,
    pub output_profile: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockShared {
    pub allocator: CountingAllocator,
    pub inits: AtomicUsize,
    pub closes: AtomicUsize,
    pub images_made: AtomicUsize,
    pub images_cleared: AtomicUsize,
    pub calls: Mutex<Vec<&'static str>>,
    pub seen_params: Mutex<Vec<SeenParams>>,
}

impl MockShared {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn images_made(&self) -> usize {
        self.images_made.load(Ordering::SeqCst)
    }

    pub fn images_cleared(&self) -> usize {
        self.images_cleared.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub shared: Arc<MockShared>,
    fixtures: HashMap<String, MockFixture>,
    fail_at: Option<(MockStage, c_int)>,
    init_fails: bool,
    image_on_error: bool,
    null_image: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixture(mut self, path: &str, fixture: MockFixture) -> Self {
        self.fixtures.insert(path.to_string(), fixture);
        self
    }

    pub fn failing_at(mut self, stage: MockStage, code: c_int) -> Self {
        self.fail_at = Some((stage, code));
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.init_fails = true;
        self
    }

    /// A failing make-image call still returns a buffer.
    pub fn image_on_error(mut self) -> Self {
        self.image_on_error = true;
        self
    }

    /// make-image reports success but returns no buffer.
    pub fn null_image(mut self) -> Self {
        self.null_image = true;
        self
    }
}

impl RawBackend for MockBackend {
    type Session = MockSession;
    type Allocator = CountingAllocator;

    fn init(&self) -> Option<MockSession> {
        if self.init_fails {
            return None;
        }
        self.shared.inits.fetch_add(1, Ordering::SeqCst);
        Some(MockSession {
            shared: Arc::clone(&self.shared),
            fixtures: self.fixtures.clone(),
            fail_at: self.fail_at,
            image_on_error: self.image_on_error,
            null_image: self.null_image,
            params: OutputParams::default(),
            opened: None,
            closed: false,
        })
    }

    fn error_message(&self, code: c_int) -> String {
        match code {
            ERR_UNSUPPORTED => "Unsupported file format or not RAW file".to_string(),
            ERR_DATA => "Corrupted data or unexpected EOF".to_string(),
            ERR_IO => "Input/output error".to_string(),
            other => format!("Unknown error code {other}"),
        }
    }

    fn allocator(&self) -> &CountingAllocator {
        &self.shared.allocator
    }
}

#[derive(Debug)]
pub struct MockSession {
    shared: Arc<MockShared>,
    fixtures: HashMap<String, MockFixture>,
    fail_at: Option<(MockStage, c_int)>,
    image_on_error: bool,
    null_image: bool,
    params: OutputParams,
    opened: Option<MockFixture>,
    closed: bool,
}

impl MockSession {
    fn failure(&self, stage: MockStage) -> c_int {
        match self.fail_at {
            Some((failing, code)) if failing == stage => code,
            _ => 0,
        }
    }

    fn read_param_string(ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    fn opened(&self) -> &MockFixture {
        self.opened.as_ref().expect("session has no open file")
    }

    fn new_image(&self, format: u32, width: u32, height: u32, bits: u16, data: Vec<u8>) -> MockImage {
        self.shared.images_made.fetch_add(1, Ordering::SeqCst);
        MockImage {
            shared: Some(Arc::clone(&self.shared)),
            format,
            width,
            height,
            bits,
            data,
        }
    }
}

impl RawSession for MockSession {
    type Image = MockImage;

    fn params(&self) -> OutputParams {
        self.params
    }

    fn set_params(&mut self, params: &OutputParams) {
        self.params = *params;
    }

    fn open_file(&mut self, path: &CStr) -> c_int {
        self.shared.record("open");
        self.shared.seen_params.lock().unwrap().push(SeenParams {
            half_size: self.params.half_size,
            output_bps: self.params.output_bps,
            user_qual: self.params.user_qual,
            dark_frame: Self::read_param_string(self.params.dark_frame),
            output_profile: Self::read_param_string(self.params.output_profile),
        });

        let code = self.failure(MockStage::Open);
        if code != 0 {
            return code;
        }
        match self.fixtures.get(path.to_str().unwrap_or_default()) {
            Some(fixture) => {
                self.opened = Some(fixture.clone());
                0
            }
            None => ERR_UNSUPPORTED,
        }
    }

    fn unpack(&mut self) -> c_int {
        self.shared.record("unpack");
        self.failure(MockStage::Unpack)
    }

    fn process(&mut self) -> c_int {
        self.shared.record("process");
        self.failure(MockStage::Process)
    }

    fn make_mem_image(&mut self) -> (Option<MockImage>, c_int) {
        self.shared.record("make_mem_image");
        let code = self.failure(MockStage::MakeImage);
        if self.null_image || (code != 0 && !self.image_on_error) {
            return (None, code);
        }
        let fixture = self.opened().clone();
        let image = self.new_image(2, fixture.width, fixture.height, fixture.bits, fixture.data);
        (Some(image), code)
    }

    fn unpack_thumb(&mut self) -> c_int {
        self.shared.record("unpack_thumb");
        self.failure(MockStage::UnpackThumb)
    }

    fn make_mem_thumb(&mut self) -> (Option<MockImage>, c_int) {
        self.shared.record("make_mem_thumb");
        let code = self.failure(MockStage::MakeThumb);
        if code != 0 {
            return (None, code);
        }
        match self.opened().thumbnail.clone() {
            Some((format, data)) => (Some(self.new_image(format, 160, 120, 8, data)), 0),
            None => (None, -5),
        }
    }

    fn recycle_and_close(mut self) {
        assert!(!self.closed, "session closed twice");
        self.closed = true;
        self.shared.record("recycle_and_close");
        self.shared.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn iparams(&self) -> RawIParams {
        self.opened().iparams
    }

    fn sizes(&self) -> RawSizes {
        self.opened().sizes
    }

    fn timestamp(&self) -> i64 {
        self.opened().timestamp
    }
}

#[derive(Debug)]
pub struct MockImage {
    shared: Option<Arc<MockShared>>,
    format: u32,
    width: u32,
    height: u32,
    bits: u16,
    data: Vec<u8>,
}

impl MockImage {
    /// Image not tied to any backend counters.
    pub fn new(width: u32, height: u32, bits: u16, data: Vec<u8>) -> Self {
        Self {
            shared: None,
            format: 2,
            width,
            height,
            bits,
            data,
        }
    }
}

impl MemoryImage for MockImage {
    fn format(&self) -> u32 {
        self.format
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn colors(&self) -> u16 {
        3
    }

    fn bits(&self) -> u16 {
        self.bits
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn clear(self) {
        if let Some(shared) = self.shared {
            shared.record("clear_mem_image");
            shared.images_cleared.fetch_add(1, Ordering::SeqCst);
        }
    }
}
