//! C ABI exports
//!
//! Thin `extern "C"` shims over the installed [`Host`]. Absence keeps the
//! host's own conventions at this boundary: null pointers, the `"Error"`
//! placeholder, zero counts. With no host installed every export returns
//! its sentinel and touches nothing.
//!
//! Handles cross the boundary as plain pointers; the caller is responsible
//! for passing only live host records.

use crate::host::{installed, Host};
use crate::view::{MessageListRef, ObjectHandle, ObjectType, RectNode};
use crate::wrappers::{InvenSlot, MESSAGE_PLACEHOLDER};
use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr;

fn with_host<T>(sentinel: T, f: impl FnOnce(&'static Host) -> T) -> T {
    match installed() {
        Some(host) => f(host),
        None => sentinel,
    }
}

fn to_c_bool(value: bool) -> c_int {
    c_int::from(value)
}

/// Text of message `number` in `list`, or `"Error"`
///
/// # Safety
///
/// `list` must be null or a loaded message list.
#[no_mangle]
pub unsafe extern "C" fn fob_message_str(list: *const c_void, number: c_int) -> *const c_char {
    let Some(list) = MessageListRef::from_ptr(list) else {
        return MESSAGE_PLACEHOLDER.as_ptr();
    };
    with_host(MESSAGE_PLACEHOLDER.as_ptr(), |host| {
        host.message_str(list, number).as_ptr()
    })
}

/// Text of message `number` in `list`, or null
///
/// # Safety
///
/// `list` must be null or a loaded message list.
#[no_mangle]
pub unsafe extern "C" fn fob_message_search(list: *const c_void, number: c_int) -> *const c_char {
    let Some(list) = MessageListRef::from_ptr(list) else {
        return ptr::null();
    };
    with_host(ptr::null(), |host| {
        host.message_search(list, number)
            .map_or(ptr::null(), CStr::as_ptr)
    })
}

/// Template record for `pid`, or null
#[no_mangle]
pub extern "C" fn fob_proto(pid: c_int) -> *mut c_void {
    with_host(ptr::null_mut(), |host| {
        host.proto(pid).map_or(ptr::null_mut(), |proto| proto.as_ptr())
    })
}

/// Read up to `num` tagged skills into `dst`; returns the count written
///
/// # Safety
///
/// `dst` must be null or valid for writing `num` entries.
#[no_mangle]
pub unsafe extern "C" fn fob_skill_get_tags(dst: *mut c_int, num: c_int) -> c_int {
    if dst.is_null() {
        return 0;
    }
    with_host(0, |host| {
        let len = tag_buffer_len(host, num);
        let dst = std::slice::from_raw_parts_mut(dst, len);
        host.skill_get_tags(dst, num) as c_int
    })
}

/// Tag up to `num` skills from `tags`; returns the count the host was given
///
/// # Safety
///
/// `tags` must be null or valid for reading `num` entries.
#[no_mangle]
pub unsafe extern "C" fn fob_skill_set_tags(tags: *const c_int, num: c_int) -> c_int {
    if tags.is_null() {
        return 0;
    }
    with_host(0, |host| {
        let len = tag_buffer_len(host, num);
        let tags = std::slice::from_raw_parts(tags, len);
        host.skill_set_tags(tags, num) as c_int
    })
}

/// Entries of a caller buffer that a tag transfer may touch
fn tag_buffer_len(host: &Host, num: c_int) -> usize {
    let slots = usize::try_from(host.layout().constants.tag_skill_slots).unwrap_or(0);
    usize::try_from(num).unwrap_or(0).min(slots)
}

/// Item in slot `slot` (0 worn, 1 right hand, 2 left hand), or null
///
/// # Safety
///
/// `critter` must be null or a live object.
#[no_mangle]
pub unsafe extern "C" fn fob_item_in_slot(critter: *mut c_void, slot: c_int) -> *mut c_void {
    let (Some(critter), Some(slot)) = (
        ObjectHandle::from_ptr(critter.cast_const()),
        InvenSlot::from_raw(slot),
    ) else {
        return ptr::null_mut();
    };
    with_host(ptr::null_mut(), |host| {
        host.item_in_slot(critter, slot)
            .map_or(ptr::null_mut(), |item| item.as_ptr())
    })
}

/// Objects within `radius` of `center` on `elevation`
///
/// `type_filter` is an object type number, or -1 for any. Fills at most
/// `capacity` entries of `out` in distance order and returns the total
/// number of matches, which may exceed `capacity`.
///
/// # Safety
///
/// `out` must be null or valid for writing `capacity` pointers.
#[no_mangle]
pub unsafe extern "C" fn fob_objects_in_radius(
    center: c_int,
    radius: c_int,
    elevation: c_int,
    type_filter: c_int,
    out: *mut *mut c_void,
    capacity: usize,
) -> usize {
    let filter = match type_filter {
        -1 => None,
        raw => match u8::try_from(raw) {
            Ok(raw) => Some(ObjectType::from_raw(raw)),
            Err(_) => return 0,
        },
    };
    let found = with_host(Vec::new(), |host| {
        host.objects_in_radius(center, radius, elevation, filter)
    });

    if !out.is_null() {
        let out = std::slice::from_raw_parts_mut(out, capacity);
        for (slot, object) in out.iter_mut().zip(&found) {
            *slot = object.as_ptr();
        }
    }
    found.len()
}

/// Return a rectangle node to the host pool
///
/// # Safety
///
/// `node` must be null or a rectangle node that is not already pooled.
#[no_mangle]
pub unsafe extern "C" fn fob_release_rect(node: *mut c_void) {
    if let Some(node) = RectNode::from_ptr(node.cast_const()) {
        with_host((), |host| host.release_rect(node));
    }
}

/// Print `text` into the host message window
///
/// The bytes reach the host unchanged.
///
/// # Safety
///
/// `text` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fob_display_print(text: *const c_char) {
    if text.is_null() {
        return;
    }
    let text = CStr::from_ptr(text);
    with_host((), |host| host.display_print(text));
}

/// 1 when `object` is still on the map
///
/// # Safety
///
/// `object` is compared by address only; any value is accepted.
#[no_mangle]
pub unsafe extern "C" fn fob_is_live(object: *const c_void) -> c_int {
    let Some(object) = ObjectHandle::from_ptr(object) else {
        return 0;
    };
    with_host(0, |host| to_c_bool(host.is_live(object)))
}

/// Weapon animation code of `item`, 0 for none
///
/// # Safety
///
/// `item` must be null or a live object.
#[no_mangle]
pub unsafe extern "C" fn fob_anim_code_by_weapon(item: *mut c_void) -> c_int {
    let item = ObjectHandle::from_ptr(item.cast_const());
    with_host(0, |host| host.anim_code_by_weapon(item))
}

#[no_mangle]
pub extern "C" fn fob_hero_is_female() -> c_int {
    with_host(0, |host| to_c_bool(host.hero_is_female()))
}

/// 1-based party roster position of `pid`, 0 when absent
#[no_mangle]
pub extern "C" fn fob_party_member_index(pid: c_int) -> c_int {
    with_host(0, |host| host.party_member_index(pid))
}

#[no_mangle]
pub extern "C" fn fob_current_attack_mode() -> c_int {
    with_host(-1, |host| host.current_attack_mode())
}

#[no_mangle]
pub extern "C" fn fob_script_local_vars(sid: c_int) -> c_int {
    with_host(0, |host| host.script_local_vars(sid))
}

/// Height of the current font, 0 when none is loaded
#[no_mangle]
pub extern "C" fn fob_text_height() -> c_int {
    with_host(0, |host| host.text_height())
}

/// Width of `text` in the current font
///
/// # Safety
///
/// `text` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fob_text_width(text: *const c_char) -> c_int {
    if text.is_null() {
        return 0;
    }
    let text = CStr::from_ptr(text);
    with_host(0, |host| host.text_width(text))
}

/// Id of the topmost window at screen point (`x`, `y`), -1 when none is open
#[no_mangle]
pub extern "C" fn fob_top_window_id(x: c_int, y: c_int) -> c_int {
    with_host(-1, |host| host.top_window_id(x, y).unwrap_or(-1))
}

/// Terrain type under the player on the world map, -1 when unknown
#[no_mangle]
pub extern "C" fn fob_current_terrain_type() -> c_int {
    with_host(-1, |host| host.current_terrain_type())
}
