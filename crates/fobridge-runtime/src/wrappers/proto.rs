//! Template lookups and template-derived item data

use crate::ffi::HostArg;
use crate::host::Host;
use crate::view::{ObjectHandle, ObjectType, ProtoRef, ProtoView};

impl Host {
    /// Template record for `pid`, `None` when the host has none
    pub fn proto(&self, pid: i32) -> Option<ProtoRef> {
        let mut out: usize = 0;
        let result = unsafe {
            self.call(
                "proto_ptr",
                self.layout().functions.proto_ptr,
                &[HostArg::Int(pid), HostArg::out(&mut out as *mut usize)],
            )?
        };
        if result.is_minus_one() {
            return None;
        }
        unsafe { ProtoRef::from_addr(out) }
    }

    /// View of a template record
    pub fn proto_view(&self, proto: ProtoRef) -> ProtoView<'_> {
        unsafe { ProtoView::new(proto, &self.layout().proto) }
    }

    /// Owned copy of a critter template, one `i32` per word
    ///
    /// `None` for non-critter PIDs and PIDs without a template.
    pub fn copy_critter_proto(&self, pid: i32) -> Option<Vec<i32>> {
        if ObjectType::from_pid(pid) != ObjectType::Critter {
            return None;
        }
        let proto = self.proto(pid)?;
        let words = (self.layout().constants.critter_proto_size / 4) as usize;
        Some(unsafe { self.proto_view(proto).words(words) })
    }

    /// Item subtype as the host reports it, -1 if the call fails
    pub fn item_type(&self, item: ObjectHandle) -> i32 {
        unsafe {
            self.call(
                "item_get_type",
                self.layout().functions.item_get_type,
                &[HostArg::Ptr(item.addr())],
            )
        }
        .map(|value| value.as_i32())
        .unwrap_or(-1)
    }

    /// Animation code of a weapon, 0 for no item or a non-weapon
    pub fn anim_code_by_weapon(&self, weapon: Option<ObjectHandle>) -> i32 {
        let Some(weapon) = weapon else {
            return 0;
        };
        let Some(proto) = self.proto(self.object(weapon).pid()) else {
            return 0;
        };
        let view = self.proto_view(proto);
        if i64::from(view.item_type()) == self.layout().constants.item_type_weapon {
            view.weapon_anim_code()
        } else {
            0
        }
    }

    /// Set or clear bit `flag` of an NPC's template critter flags
    ///
    /// Returns `false` without touching memory when `flag` is not a bit
    /// index, the object is not a critter or it has no template. The change
    /// applies to every critter sharing the template.
    pub fn toggle_npc_flag(&self, npc: ObjectHandle, flag: u32, set: bool) -> bool {
        if flag >= u32::BITS {
            return false;
        }
        let object = self.object(npc);
        if !object.is_critter() {
            return false;
        }
        let Some(proto) = self.proto(object.pid()) else {
            return false;
        };

        let view = self.proto_view(proto);
        let mask = 1u32 << flag;
        let flags = view.critter_flags();
        view.set_critter_flags(if set { flags | mask } else { flags & !mask });
        true
    }
}
