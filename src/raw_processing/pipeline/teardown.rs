use std::mem::ManuallyDrop;

use tracing::debug;

use crate::raw_processing::native::{MemoryImage, RawSession, StringAllocator};
use crate::raw_processing::params::ParamStrings;

/// Clears `image` if there is one, then recycles and closes `session`.
pub fn release<S: RawSession>(session: Option<S>, image: Option<S::Image>) {
    if let Some(image) = image {
        image.clear();
    }
    if let Some(session) = session {
        session.recycle_and_close();
        debug!("LibRaw session released");
    }
}

/// Owns everything acquired for one decode call.
///
/// Dropping the guard clears the memory image, closes the session and only
/// then frees the parameter strings the session's block pointed to.
pub struct SessionGuard<'a, S: RawSession, A: StringAllocator + ?Sized> {
    session: ManuallyDrop<S>,
    image: Option<S::Image>,
    strings: Option<ParamStrings<'a, A>>,
}

impl<'a, S: RawSession, A: StringAllocator + ?Sized> SessionGuard<'a, S, A> {
    pub fn new(session: S) -> Self {
        Self {
            session: ManuallyDrop::new(session),
            image: None,
            strings: None,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn image(&self) -> Option<&S::Image> {
        self.image.as_ref()
    }

    /// Takes ownership of a memory image, clearing any previous one.
    pub fn hold_image(&mut self, image: Option<S::Image>) {
        if let Some(previous) = std::mem::replace(&mut self.image, image) {
            previous.clear();
        }
    }

    pub fn hold_strings(&mut self, strings: ParamStrings<'a, A>) {
        self.strings = Some(strings);
    }
}

impl<S: RawSession, A: StringAllocator + ?Sized> Drop for SessionGuard<'_, S, A> {
    fn drop(&mut self) {
        // SAFETY: the session is taken exactly once, here, and never used again.
        let session = unsafe { ManuallyDrop::take(&mut self.session) };
        release(Some(session), self.image.take());
        if let Some(mut strings) = self.strings.take() {
            strings.release();
        }
    }
}
