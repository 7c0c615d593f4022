use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Allocation primitive for the C strings stored in the parameter block.
///
/// Every pointer returned by `alloc` must be handed back to `free` of the same
/// allocator exactly once.
pub trait StringAllocator: Send + Sync {
    fn alloc(&self, value: &CStr) -> *mut c_char;

    /// # Safety
    ///
    /// `ptr` must come from `alloc` on this allocator and not have been freed.
    unsafe fn free(&self, ptr: *mut c_char);
}

/// Allocates through `CString`; LibRaw only reads these strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct CStringAllocator;

impl StringAllocator for CStringAllocator {
    fn alloc(&self, value: &CStr) -> *mut c_char {
        value.to_owned().into_raw()
    }

    unsafe fn free(&self, ptr: *mut c_char) {
        drop(unsafe { CString::from_raw(ptr) });
    }
}
