//! Script instances

use super::{RawView, ScriptRef};
use fobridge_config::ScriptOffsets;

#[derive(Debug, Clone, Copy)]
pub struct ScriptView<'l> {
    raw: RawView,
    offsets: &'l ScriptOffsets,
}

impl<'l> ScriptView<'l> {
    /// # Safety
    ///
    /// `script` must be a live script instance and `offsets` must describe
    /// the running host.
    pub unsafe fn new(script: ScriptRef, offsets: &'l ScriptOffsets) -> Self {
        Self {
            raw: script.raw(),
            offsets,
        }
    }

    pub fn num_local_vars(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.num_local_vars) }
    }
}
