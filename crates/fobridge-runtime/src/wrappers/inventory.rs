//! Critter inventory slots

use crate::ffi::HostArg;
use crate::host::Host;
use crate::view::ObjectHandle;

/// Equipment slot of a critter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum InvenSlot {
    Worn = 0,
    RightHand = 1,
    LeftHand = 2,
}

impl InvenSlot {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(InvenSlot::Worn),
            1 => Some(InvenSlot::RightHand),
            2 => Some(InvenSlot::LeftHand),
            _ => None,
        }
    }
}

impl Host {
    /// Item in one of a critter's equipment slots
    ///
    /// `None` for non-critters, critters with an empty inventory and empty
    /// slots. The host is not called in the first two cases.
    pub fn item_in_slot(&self, critter: ObjectHandle, slot: InvenSlot) -> Option<ObjectHandle> {
        let object = self.object(critter);
        if !object.is_critter() || object.inventory_len() <= 0 {
            return None;
        }

        let functions = &self.layout().functions;
        let (symbol, spec) = match slot {
            InvenSlot::Worn => ("inven_worn", functions.inven_worn),
            InvenSlot::RightHand => ("inven_right_hand", functions.inven_right_hand),
            InvenSlot::LeftHand => ("inven_left_hand", functions.inven_left_hand),
        };
        let item = unsafe { self.call(symbol, spec, &[HostArg::Ptr(critter.addr())])? };
        // Items returned by the host live as long as the critter holds them.
        unsafe { ObjectHandle::from_addr(item.as_addr()) }
    }
}
