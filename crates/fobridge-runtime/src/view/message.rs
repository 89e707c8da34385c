//! Message lists (string tables loaded from `.msg` files)

use super::{MessageListRef, RawView};
use crate::ffi::borrow_c_str;
use fobridge_config::MessageOffsets;
use std::ffi::CStr;

/// One record of a message list
#[derive(Debug, Clone, Copy)]
pub struct MessageRecord<'a> {
    raw: RawView,
    offsets: &'a MessageOffsets,
}

impl<'a> MessageRecord<'a> {
    pub fn number(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.node_number) }
    }

    /// Message text, `None` when the record has no text
    pub fn text(&self) -> Option<&'a CStr> {
        unsafe { borrow_c_str(self.raw.read_word(self.offsets.node_text)) }
    }
}

/// Accessors for a loaded message list
#[derive(Debug, Clone, Copy)]
pub struct MessageListView<'l> {
    raw: RawView,
    offsets: &'l MessageOffsets,
}

impl<'l> MessageListView<'l> {
    /// # Safety
    ///
    /// `list` must be a loaded message list and `offsets` must describe the
    /// running host.
    pub unsafe fn new(list: MessageListRef, offsets: &'l MessageOffsets) -> Self {
        Self {
            raw: list.raw(),
            offsets,
        }
    }

    /// Number of records; negative counts read as empty
    pub fn len(&self) -> usize {
        let count: i32 = unsafe { self.raw.read(self.offsets.count) };
        usize::try_from(count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record at `index`, without a bounds check against [`len`](Self::len)
    ///
    /// Returns `None` only when the list has no record array.
    ///
    /// # Safety
    ///
    /// `index` must be below `len()`.
    pub unsafe fn record_unchecked(&self, index: usize) -> Option<MessageRecord<'l>> {
        let nodes = RawView::new(self.raw.read_word(self.offsets.nodes))?;
        let raw = RawView::new(nodes.field_addr(index * self.offsets.node_size))?;
        Some(MessageRecord {
            raw,
            offsets: self.offsets,
        })
    }

    /// Record at `index`, `None` past the end
    pub fn record(&self, index: usize) -> Option<MessageRecord<'l>> {
        if index >= self.len() {
            return None;
        }
        unsafe { self.record_unchecked(index) }
    }
}
