//! Per-tile object lists

use super::RawView;
use fobridge_config::TileNodeOffsets;

/// One entry of the singly linked object list hanging off a tile
#[derive(Debug, Clone, Copy)]
pub struct TileNodeView<'l> {
    raw: RawView,
    offsets: &'l TileNodeOffsets,
}

impl<'l> TileNodeView<'l> {
    /// `None` for a null node
    ///
    /// # Safety
    ///
    /// A non-null `addr` must be a node of the host's object table and
    /// `offsets` must describe the running host.
    pub unsafe fn new(addr: usize, offsets: &'l TileNodeOffsets) -> Option<Self> {
        RawView::new(addr).map(|raw| Self { raw, offsets })
    }

    /// Address of the object this node holds
    pub fn object(&self) -> usize {
        unsafe { self.raw.read_word(self.offsets.object) }
    }

    /// The following node, if any
    pub fn next(&self) -> Option<TileNodeView<'l>> {
        let next = unsafe { self.raw.read_word(self.offsets.next) };
        unsafe { Self::new(next, self.offsets) }
    }
}
