//! Message list lookups

use crate::host::Host;
use crate::view::{MessageListRef, MessageListView};
use std::cmp::Ordering;
use std::ffi::CStr;

/// Text returned by [`Host::message_str`] when a message does not resolve
pub const MESSAGE_PLACEHOLDER: &CStr = c"Error";

impl Host {
    /// Text of message `number`, `None` when the list has no such record
    ///
    /// The host keeps records sorted by number, so this is a binary search.
    /// Records without text count as missing.
    pub fn message_search(&self, list: MessageListRef, number: i32) -> Option<&CStr> {
        let view = unsafe { MessageListView::new(list, &self.layout().message) };

        let (mut low, mut high) = (0usize, view.len());
        while low < high {
            let mid = low + (high - low) / 2;
            let record = view.record(mid)?;
            match record.number().cmp(&number) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return record.text(),
            }
        }
        None
    }

    /// Text of message `number`, or [`MESSAGE_PLACEHOLDER`]
    pub fn message_str(&self, list: MessageListRef, number: i32) -> &CStr {
        self.message_search(list, number)
            .unwrap_or(MESSAGE_PLACEHOLDER)
    }
}
