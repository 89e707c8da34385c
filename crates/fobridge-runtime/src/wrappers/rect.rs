//! Dirty-rectangle pool
//!
//! The host keeps spare rectangle nodes on a singly linked free list whose
//! head lives in the `rect_list` variable. Releasing pushes onto the head,
//! taking pops it, so reuse is LIFO.

use crate::host::Host;
use crate::view::{read_global, write_global, RectNode, RectView};

impl Host {
    /// Return `node` to the free list
    ///
    /// Releasing a node that is already pooled corrupts the list; this is
    /// not detected.
    pub fn release_rect(&self, node: RectNode) {
        let head_var = self.layout().variables.rect_list;
        unsafe {
            let head: usize = read_global(head_var);
            RectView::new(node, &self.layout().rect).set_next(head);
            write_global(head_var, node.addr());
        }
    }

    /// Take the most recently released node, `None` when the pool is empty
    pub fn take_pooled_rect(&self) -> Option<RectNode> {
        let head_var = self.layout().variables.rect_list;
        unsafe {
            let node = RectNode::from_addr(read_global(head_var))?;
            let next = RectView::new(node, &self.layout().rect).next();
            write_global(head_var, next);
            Some(node)
        }
    }
}
