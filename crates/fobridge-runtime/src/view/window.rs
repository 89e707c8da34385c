//! Interface windows

use super::{RawView, WindowRef};
use fobridge_config::WindowOffsets;

/// Accessors for a host window record
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'l> {
    window: WindowRef,
    raw: RawView,
    offsets: &'l WindowOffsets,
}

impl<'l> WindowView<'l> {
    /// # Safety
    ///
    /// `window` must be an open host window and `offsets` must describe the
    /// running host.
    pub unsafe fn new(window: WindowRef, offsets: &'l WindowOffsets) -> Self {
        Self {
            window,
            raw: window.raw(),
            offsets,
        }
    }

    pub fn window(&self) -> WindowRef {
        self.window
    }

    pub fn id(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.id) }
    }

    /// Screen rectangle as `(left, top, right, bottom)`, edges inclusive
    pub fn rect(&self) -> (i32, i32, i32, i32) {
        unsafe {
            (
                self.raw.read(self.offsets.rect_left),
                self.raw.read(self.offsets.rect_top),
                self.raw.read(self.offsets.rect_right),
                self.raw.read(self.offsets.rect_bottom),
            )
        }
    }

    /// Address of the window's screen rectangle
    pub fn rect_addr(&self) -> usize {
        self.raw.field_addr(self.offsets.rect_left)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (left, top, right, bottom) = self.rect();
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }

    pub fn width(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.width) }
    }

    pub fn height(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.height) }
    }

    /// Address of the window's pixel buffer, 0 when it has none
    pub fn buffer(&self) -> usize {
        unsafe { self.raw.read_word(self.offsets.buffer) }
    }
}
