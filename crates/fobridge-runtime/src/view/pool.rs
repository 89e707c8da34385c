//! Pooled dirty-rectangle nodes

use super::{RawView, RectNode};
use fobridge_config::RectOffsets;

/// Accessors for a rectangle node's free-list link
#[derive(Debug, Clone, Copy)]
pub struct RectView<'l> {
    raw: RawView,
    offsets: &'l RectOffsets,
}

impl<'l> RectView<'l> {
    /// # Safety
    ///
    /// `node` must be a rectangle node owned by the host pool and `offsets`
    /// must describe the running host.
    pub unsafe fn new(node: RectNode, offsets: &'l RectOffsets) -> Self {
        Self {
            raw: node.raw(),
            offsets,
        }
    }

    /// Address of the next node, 0 at the end of the list
    pub fn next(&self) -> usize {
        unsafe { self.raw.read_word(self.offsets.next) }
    }

    pub fn set_next(&self, next: usize) {
        unsafe { self.raw.write(self.offsets.next, next) }
    }
}
