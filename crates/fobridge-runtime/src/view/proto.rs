//! Template records ("protos")

use super::{ProtoRef, RawView};
use fobridge_config::ProtoOffsets;

/// Accessors for a template record
///
/// Item and critter templates share a header. Past it the records differ:
/// `item_type` and `weapon_anim_code` only mean something for item PIDs,
/// `critter_flags` only for critter PIDs.
#[derive(Debug, Clone, Copy)]
pub struct ProtoView<'l> {
    proto: ProtoRef,
    raw: RawView,
    offsets: &'l ProtoOffsets,
}

impl<'l> ProtoView<'l> {
    /// # Safety
    ///
    /// `proto` must be a loaded template and `offsets` must describe the
    /// running host.
    pub unsafe fn new(proto: ProtoRef, offsets: &'l ProtoOffsets) -> Self {
        Self {
            proto,
            raw: proto.raw(),
            offsets,
        }
    }

    pub fn proto(&self) -> ProtoRef {
        self.proto
    }

    pub fn pid(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.pid) }
    }

    pub fn item_type(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.item_type) }
    }

    pub fn weapon_anim_code(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.weapon_anim_code) }
    }

    pub fn critter_flags(&self) -> u32 {
        unsafe { self.raw.read(self.offsets.critter_flags) }
    }

    pub fn set_critter_flags(&self, flags: u32) {
        unsafe { self.raw.write(self.offsets.critter_flags, flags) }
    }

    /// Copy the first `count` 32-bit words of the record
    ///
    /// # Safety
    ///
    /// The record must be at least `count * 4` bytes long.
    pub unsafe fn words(&self, count: usize) -> Vec<i32> {
        (0..count)
            .map(|index| self.raw.read_indexed::<i32>(0, index))
            .collect()
    }
}
