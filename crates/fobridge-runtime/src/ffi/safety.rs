//! Safe helpers for host strings and pointers

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Owned, NUL-terminated text handed to the host
///
/// Text is cut at the first interior NUL instead of being rejected, since
/// the host would stop reading there anyway.
pub struct HostCString {
    inner: CString,
}

impl HostCString {
    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Host text from raw codepage bytes, passed through unchanged
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bytes = match bytes.iter().position(|&b| b == 0) {
            Some(end) => &bytes[..end],
            None => bytes,
        };
        // No NUL left in `bytes`.
        let inner = CString::new(bytes).unwrap_or_default();
        Self { inner }
    }

    /// Raw pointer for the host
    pub fn as_ptr(&self) -> *const c_char {
        self.inner.as_ptr()
    }
}

impl std::ops::Deref for HostCString {
    type Target = CStr;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Text handed to a host function
///
/// Host strings are 8-bit codepage bytes, not UTF-8. A borrowed `&CStr`
/// (such as a message from [`Host::message_str`](crate::host::Host)) goes to
/// the host byte for byte; `&str` and `&[u8]` are copied into a
/// [`HostCString`] first.
pub enum HostText<'a> {
    Borrowed(&'a CStr),
    Owned(HostCString),
}

impl HostText<'_> {
    pub fn as_c_str(&self) -> &CStr {
        match self {
            HostText::Borrowed(text) => *text,
            HostText::Owned(text) => &text.inner,
        }
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.as_c_str().as_ptr()
    }
}

impl<'a> From<&'a CStr> for HostText<'a> {
    fn from(text: &'a CStr) -> Self {
        HostText::Borrowed(text)
    }
}

impl From<&str> for HostText<'_> {
    fn from(text: &str) -> Self {
        HostText::Owned(HostCString::new(text))
    }
}

impl From<&[u8]> for HostText<'_> {
    fn from(bytes: &[u8]) -> Self {
        HostText::Owned(HostCString::from_bytes(bytes))
    }
}

/// `None` for null pointers
pub fn check_null<T>(ptr: *const T) -> Option<*const T> {
    if ptr.is_null() {
        None
    } else {
        Some(ptr)
    }
}

/// Borrow a NUL-terminated string living in host memory
///
/// # Safety
///
/// `addr` must be null or point to a NUL-terminated string that stays
/// unchanged for `'a`.
pub unsafe fn borrow_c_str<'a>(addr: usize) -> Option<&'a CStr> {
    let ptr = check_null(addr as *const c_char)?;
    Some(CStr::from_ptr(ptr))
}
