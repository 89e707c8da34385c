//! Live object records

use super::{ObjectHandle, RawView};
use fobridge_config::ObjectOffsets;

/// Object class, encoded in the high byte of a PID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Item,
    Critter,
    Scenery,
    Wall,
    Tile,
    Misc,
    /// Anything else the host may store
    Other(u8),
}

impl ObjectType {
    pub fn from_pid(pid: i32) -> Self {
        Self::from_raw(((pid as u32) >> 24) as u8)
    }

    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => ObjectType::Item,
            1 => ObjectType::Critter,
            2 => ObjectType::Scenery,
            3 => ObjectType::Wall,
            4 => ObjectType::Tile,
            5 => ObjectType::Misc,
            other => ObjectType::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            ObjectType::Item => 0,
            ObjectType::Critter => 1,
            ObjectType::Scenery => 2,
            ObjectType::Wall => 3,
            ObjectType::Tile => 4,
            ObjectType::Misc => 5,
            ObjectType::Other(raw) => raw,
        }
    }
}

/// Accessors for a live object record
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'l> {
    handle: ObjectHandle,
    raw: RawView,
    offsets: &'l ObjectOffsets,
}

impl<'l> ObjectView<'l> {
    /// # Safety
    ///
    /// `handle` must be live and `offsets` must describe the running host.
    pub unsafe fn new(handle: ObjectHandle, offsets: &'l ObjectOffsets) -> Self {
        Self {
            handle,
            raw: handle.raw(),
            offsets,
        }
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    /// Object id; ids from the host's player id upward belong to the player
    /// and party members
    pub fn id(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.id) }
    }

    pub fn pid(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.pid) }
    }

    pub fn tile(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.tile) }
    }

    pub fn elevation(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.elevation) }
    }

    pub fn flags(&self) -> u32 {
        unsafe { self.raw.read(self.offsets.flags) }
    }

    /// Number of inventory entries
    pub fn inventory_len(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.inven_size) }
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::from_pid(self.pid())
    }

    pub fn is_critter(&self) -> bool {
        self.object_type() == ObjectType::Critter
    }
}
