//! In-process fake host for runtime tests
//!
//! Host memory is leaked heap blocks, so every address stays valid for the
//! rest of the test binary. Host functions are `extern "C"` stand-ins backed
//! by thread-local state; the test harness runs each test on its own thread,
//! so tests never see each other's state.

#![allow(dead_code)]

use fobridge_config::{Convention, FunctionSpec, Layout, VersionTable};
use fobridge_runtime::{Host, MessageListRef, ObjectHandle, ProtoRef, RectNode, ScriptRef};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 20;
pub const TILE_COUNT: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;
pub const TAG_SLOTS: usize = 4;
pub const STAT_GENDER: i32 = 34;
pub const ITEM_TYPE_WEAPON: i32 = 3;
pub const ATK_LWEAPON_RELOAD: i32 = 6;
pub const CRITTER_PROTO_WORDS: usize = 16;
pub const MULTIHEX: u32 = 0x800;
pub const PLAYER_ID: i32 = 18_000;
pub const FONT_HEIGHT: usize = 10;
pub const GLYPH_WIDTH: usize = 7;

// Object record
const OBJ_TILE: usize = 0x00;
const OBJ_ELEVATION: usize = 0x04;
const OBJ_FLAGS: usize = 0x08;
const OBJ_INVEN_SIZE: usize = 0x0C;
const OBJ_PID: usize = 0x10;
const OBJ_ID: usize = 0x14;

// Template record; item and critter data start after the shared header
const PROTO_PID: usize = 0x00;
const PROTO_ITEM_TYPE: usize = 0x20;
const PROTO_ANIM_CODE: usize = 0x24;
const PROTO_CRITTER_FLAGS: usize = 0x2C;

// Item button record
const BUTTON_ITEM: usize = 0x00;
const BUTTON_PRIMARY: usize = 0x08;
const BUTTON_SECONDARY: usize = 0x0C;
const BUTTON_MODE: usize = 0x10;
const BUTTON_SIZE: usize = 0x18;

// Window record
const WIN_ID: usize = 0x00;
const WIN_RECT: usize = 0x08;
const WIN_WIDTH: usize = 0x18;
const WIN_HEIGHT: usize = 0x1C;
const WIN_BUFFER: usize = 0x20;
const WINDOW_SLOTS: usize = 8;

/// Global variable slots (8 bytes each) in the globals block
const VARIABLE_SLOTS: &[&str] = &[
    "rect_list",
    "obj_dude",
    "party_member_max_count",
    "party_member_pid_list",
    "item_current_item",
    "interface_window",
    "text_height",
    "text_width",
    "text_char_width",
    "text_max",
    "text_spacing",
    "text_mono_width",
    "text_to_buf",
    "num_windows",
    "doing_refresh_all",
    "world_xpos",
    "world_ypos",
    "world_subtile",
];

// ============================================================================
// Raw memory
// ============================================================================

/// Leak a zeroed, 8-byte aligned block of `bytes` bytes
pub fn alloc(bytes: usize) -> usize {
    let words = bytes.div_ceil(8).max(1);
    Box::leak(vec![0u64; words].into_boxed_slice()).as_mut_ptr() as usize
}

pub fn poke_i32(addr: usize, value: i32) {
    unsafe { std::ptr::write_unaligned(addr as *mut i32, value) }
}

pub fn peek_i32(addr: usize) -> i32 {
    unsafe { std::ptr::read_unaligned(addr as *const i32) }
}

pub fn poke_word(addr: usize, value: usize) {
    unsafe { std::ptr::write_unaligned(addr as *mut usize, value) }
}

pub fn peek_word(addr: usize) -> usize {
    unsafe { std::ptr::read_unaligned(addr as *const usize) }
}

fn leak_c_string(text: &str) -> usize {
    let text = CString::new(text).unwrap();
    Box::leak(text.into_boxed_c_str()).as_ptr() as usize
}

// ============================================================================
// Stand-in host functions
// ============================================================================

const HOST_FAIL: usize = usize::MAX;

#[derive(Default)]
pub struct FakeState {
    pub protos: HashMap<i32, usize>,
    pub scripts: HashMap<i32, usize>,
    pub slots: HashMap<(usize, i32), usize>,
    pub item_types: HashMap<usize, i32>,
    pub stats: HashMap<(usize, i32), i32>,
    pub tags: [i32; 8],
    pub last_tag_count: Option<usize>,
    pub slot_calls: usize,
    pub printed: Vec<Vec<u8>>,
    pub windows: HashMap<i32, usize>,
    /// (window, rect, refresh-all flag at the time of the call)
    pub refreshes: Vec<(usize, [i32; 4], i32)>,
    pub doing_refresh_all: usize,
    pub bounds: HashMap<usize, [i32; 4]>,
    pub tile_refreshes: Vec<([i32; 4], i32)>,
    pub terrain: HashMap<(i32, i32), usize>,
    pub subtile_lookups: usize,
}

thread_local! {
    pub static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

pub fn with_state<T>(f: impl FnOnce(&mut FakeState) -> T) -> T {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

extern "C" fn fake_display_print(text: usize) -> usize {
    let text = unsafe { CStr::from_ptr(text as *const c_char) };
    with_state(|s| s.printed.push(text.to_bytes().to_vec()));
    0
}

extern "C" fn fake_proto_ptr(pid: usize, out: usize) -> usize {
    match with_state(|s| s.protos.get(&(pid as i32)).copied()) {
        Some(proto) => {
            poke_word(out, proto);
            0
        }
        None => HOST_FAIL,
    }
}

extern "C" fn fake_skill_get_tags(dst: usize, count: usize) -> usize {
    with_state(|s| {
        s.last_tag_count = Some(count);
        for index in 0..count {
            poke_i32(dst + index * 4, s.tags[index]);
        }
    });
    0
}

extern "C" fn fake_skill_set_tags(src: usize, count: usize) -> usize {
    with_state(|s| {
        s.last_tag_count = Some(count);
        for index in 0..count {
            s.tags[index] = peek_i32(src + index * 4);
        }
    });
    0
}

fn slot_item(critter: usize, slot: i32) -> usize {
    with_state(|s| {
        s.slot_calls += 1;
        s.slots.get(&(critter, slot)).copied().unwrap_or(0)
    })
}

extern "C" fn fake_inven_worn(critter: usize) -> usize {
    slot_item(critter, 0)
}

extern "C" fn fake_inven_right_hand(critter: usize) -> usize {
    slot_item(critter, 1)
}

extern "C" fn fake_inven_left_hand(critter: usize) -> usize {
    slot_item(critter, 2)
}

extern "C" fn fake_item_get_type(item: usize) -> usize {
    with_state(|s| s.item_types.get(&item).copied().unwrap_or(0)) as usize
}

extern "C" fn fake_stat_level(critter: usize, stat: usize) -> usize {
    with_state(|s| s.stats.get(&(critter, stat as i32)).copied().unwrap_or(0)) as usize
}

extern "C" fn fake_scr_ptr(sid: usize, out: usize) -> usize {
    match with_state(|s| s.scripts.get(&(sid as i32)).copied()) {
        Some(script) => {
            poke_word(out, script);
            0
        }
        None => HOST_FAIL,
    }
}

fn peek_rect(addr: usize) -> [i32; 4] {
    [0, 4, 8, 12].map(|offset| peek_i32(addr + offset))
}

extern "C" fn fake_obj_bound(object: usize, out: usize) -> usize {
    let bounds = with_state(|s| s.bounds.get(&object).copied().unwrap_or_default());
    for (index, value) in bounds.iter().enumerate() {
        poke_i32(out + index * 4, *value);
    }
    0
}

extern "C" fn fake_tile_refresh_rect(rect: usize, elevation: usize) -> usize {
    with_state(|s| s.tile_refreshes.push((peek_rect(rect), elevation as i32)));
    0
}

extern "C" fn fake_gnw_find(id: usize) -> usize {
    with_state(|s| s.windows.get(&(id as i32)).copied().unwrap_or(0))
}

extern "C" fn fake_gnw_win_refresh(window: usize, rect: usize, _buffer: usize) -> usize {
    with_state(|s| {
        let flag = peek_i32(s.doing_refresh_all);
        s.refreshes.push((window, peek_rect(rect), flag));
    });
    0
}

extern "C" fn fake_wm_find_cur_sub_tile(x: usize, y: usize, out: usize) -> usize {
    with_state(|s| {
        s.subtile_lookups += 1;
        if let Some(cell) = s.terrain.get(&(x as i32, y as i32)) {
            poke_word(out, *cell);
        }
    });
    0
}

fn c_len(text: usize) -> usize {
    unsafe { CStr::from_ptr(text as *const c_char) }.to_bytes().len()
}

extern "C" fn fake_text_height() -> usize {
    FONT_HEIGHT
}

extern "C" fn fake_text_width(text: usize) -> usize {
    c_len(text) * GLYPH_WIDTH
}

/// Fills the text's glyph box, `GLYPH_WIDTH` per byte and `FONT_HEIGHT`
/// rows, clipped to `width`
extern "C" fn fake_text_to_buf(
    buffer: usize,
    text: usize,
    width: usize,
    pitch: usize,
    color: usize,
) -> usize {
    let columns = (c_len(text) * GLYPH_WIDTH).min(width);
    for row in 0..FONT_HEIGHT {
        for column in 0..columns {
            unsafe { *((buffer + row * pitch + column) as *mut u8) = color as u8 };
        }
    }
    0
}

extern "C" fn fake_text_char_width(ch: usize) -> usize {
    if ch as u8 == b'i' {
        3
    } else {
        7
    }
}

extern "C" fn fake_text_mono_width(text: usize) -> usize {
    c_len(text) * 9
}

extern "C" fn fake_text_spacing() -> usize {
    1
}

extern "C" fn fake_text_max() -> usize {
    9
}

// ============================================================================
// Fake host
// ============================================================================

/// A tiny host: 20x20 tiles, three elevations, stand-in functions
pub struct FakeHost {
    host: Host,
}

fn register(address: usize, args: u8) -> FunctionSpec {
    FunctionSpec {
        address: address as u64,
        convention: Convention::Register,
        args,
    }
}

fn record(fields: &[(&str, u64)]) -> BTreeMap<String, u64> {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

impl FakeHost {
    /// Version table describing freshly allocated fake memory
    ///
    /// Also resets this thread's stand-in state.
    pub fn table() -> VersionTable {
        STATE.with(|state| *state.borrow_mut() = FakeState::default());

        let mut table = VersionTable {
            description: Some("in-process fake".to_string()),
            ..VersionTable::default()
        };

        let functions: [(&str, usize, u8); 15] = [
            ("display_print", fake_display_print as usize, 1),
            ("proto_ptr", fake_proto_ptr as usize, 2),
            ("skill_get_tags", fake_skill_get_tags as usize, 2),
            ("skill_set_tags", fake_skill_set_tags as usize, 2),
            ("inven_left_hand", fake_inven_left_hand as usize, 1),
            ("inven_right_hand", fake_inven_right_hand as usize, 1),
            ("inven_worn", fake_inven_worn as usize, 1),
            ("item_get_type", fake_item_get_type as usize, 1),
            ("stat_level", fake_stat_level as usize, 2),
            ("scr_ptr", fake_scr_ptr as usize, 2),
            ("obj_bound", fake_obj_bound as usize, 2),
            ("tile_refresh_rect", fake_tile_refresh_rect as usize, 2),
            ("gnw_find", fake_gnw_find as usize, 1),
            ("gnw_win_refresh", fake_gnw_win_refresh as usize, 3),
            ("wm_find_cur_sub_tile", fake_wm_find_cur_sub_tile as usize, 3),
        ];
        for (name, address, args) in functions {
            table.functions.insert(name.to_string(), register(address, args));
        }

        let globals = alloc(VARIABLE_SLOTS.len() * 8);
        for (index, name) in VARIABLE_SLOTS.iter().enumerate() {
            table
                .variables
                .insert(name.to_string(), (globals + index * 8) as u64);
        }
        table
            .variables
            .insert("object_table".to_string(), alloc(TILE_COUNT * 8) as u64);
        table
            .variables
            .insert("item_button_items".to_string(), alloc(2 * BUTTON_SIZE) as u64);
        table
            .variables
            .insert("window".to_string(), alloc(WINDOW_SLOTS * 8) as u64);
        table
            .variables
            .insert("scr_size".to_string(), alloc(16) as u64);
        let doing_refresh_all = table.variables["doing_refresh_all"] as usize;
        with_state(|s| s.doing_refresh_all = doing_refresh_all);

        let offsets = [
            (
                "object",
                record(&[
                    ("tile", OBJ_TILE as u64),
                    ("elevation", OBJ_ELEVATION as u64),
                    ("flags", OBJ_FLAGS as u64),
                    ("inven_size", OBJ_INVEN_SIZE as u64),
                    ("pid", OBJ_PID as u64),
                    ("id", OBJ_ID as u64),
                ]),
            ),
            (
                "proto",
                record(&[
                    ("pid", PROTO_PID as u64),
                    ("item_type", PROTO_ITEM_TYPE as u64),
                    ("critter_flags", PROTO_CRITTER_FLAGS as u64),
                    ("weapon_anim_code", PROTO_ANIM_CODE as u64),
                ]),
            ),
            (
                "message",
                record(&[
                    ("count", 0),
                    ("nodes", 8),
                    ("node_number", 0),
                    ("node_text", 8),
                    ("node_size", 16),
                ]),
            ),
            ("rect", record(&[("next", 0x10)])),
            ("tile_node", record(&[("object", 0), ("next", 8)])),
            ("script", record(&[("num_local_vars", 0x24)])),
            (
                "item_button",
                record(&[
                    ("item", BUTTON_ITEM as u64),
                    ("mode", BUTTON_MODE as u64),
                    ("primary_attack", BUTTON_PRIMARY as u64),
                    ("secondary_attack", BUTTON_SECONDARY as u64),
                    ("size", BUTTON_SIZE as u64),
                ]),
            ),
            (
                "window",
                record(&[
                    ("id", WIN_ID as u64),
                    ("rect_left", WIN_RECT as u64),
                    ("rect_top", (WIN_RECT + 4) as u64),
                    ("rect_right", (WIN_RECT + 8) as u64),
                    ("rect_bottom", (WIN_RECT + 12) as u64),
                    ("width", WIN_WIDTH as u64),
                    ("height", WIN_HEIGHT as u64),
                    ("buffer", WIN_BUFFER as u64),
                ]),
            ),
        ];
        for (name, fields) in offsets {
            table.offsets.insert(name.to_string(), fields);
        }

        let constants: [(&str, i64); 11] = [
            ("grid_width", GRID_WIDTH as i64),
            ("grid_height", GRID_HEIGHT as i64),
            ("elevations", 3),
            ("tag_skill_slots", TAG_SLOTS as i64),
            ("stat_gender", STAT_GENDER as i64),
            ("gender_female", 1),
            ("critter_proto_size", (CRITTER_PROTO_WORDS * 4) as i64),
            ("item_type_weapon", ITEM_TYPE_WEAPON as i64),
            ("atk_lweapon_reload", ATK_LWEAPON_RELOAD as i64),
            ("multihex_flag", MULTIHEX as i64),
            ("player_id", PLAYER_ID as i64),
        ];
        for (name, value) in constants {
            table.constants.insert(name.to_string(), value);
        }

        table
    }

    pub fn layout() -> Layout {
        Self::table().resolve("fake").unwrap()
    }

    pub fn new() -> Self {
        Self::from_layout(Self::layout())
    }

    pub fn from_layout(layout: Layout) -> Self {
        let host = unsafe { Host::new(layout) }.unwrap();
        let fake = Self { host };
        fake.install_fonts();
        fake
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    fn var(&self, name: &str) -> usize {
        let v = &self.host.layout().variables;
        match name {
            "rect_list" => v.rect_list,
            "obj_dude" => v.obj_dude,
            "object_table" => v.object_table,
            "party_member_max_count" => v.party_member_max_count,
            "party_member_pid_list" => v.party_member_pid_list,
            "item_current_item" => v.item_current_item,
            "item_button_items" => v.item_button_items,
            "interface_window" => v.interface_window,
            "text_height" => v.text_height,
            "text_width" => v.text_width,
            "text_char_width" => v.text_char_width,
            "text_max" => v.text_max,
            "text_spacing" => v.text_spacing,
            "text_mono_width" => v.text_mono_width,
            "text_to_buf" => v.text_to_buf,
            "window" => v.window,
            "num_windows" => v.num_windows,
            "doing_refresh_all" => v.doing_refresh_all,
            "scr_size" => v.scr_size,
            "world_xpos" => v.world_xpos,
            "world_ypos" => v.world_ypos,
            "world_subtile" => v.world_subtile,
            other => panic!("unknown fake variable {other}"),
        }
    }

    // ------------------------------------------------------------------
    // Objects and tiles
    // ------------------------------------------------------------------

    /// Create an object and append it to `tile`'s list
    pub fn spawn(&self, pid: i32, tile: i32, elevation: i32) -> ObjectHandle {
        let object = alloc(0x20);
        poke_i32(object + OBJ_TILE, tile);
        poke_i32(object + OBJ_ELEVATION, elevation);
        poke_i32(object + OBJ_PID, pid);

        let node = alloc(16);
        poke_word(node, object);

        let mut link = self.var("object_table") + tile as usize * 8;
        while peek_word(link) != 0 {
            link = peek_word(link) + 8;
        }
        poke_word(link, node);

        unsafe { ObjectHandle::from_addr(object) }.unwrap()
    }

    /// Unlink an object from its tile list
    pub fn remove(&self, object: ObjectHandle) {
        let tile = peek_i32(object.addr() + OBJ_TILE) as usize;
        let mut link = self.var("object_table") + tile * 8;
        while peek_word(link) != 0 {
            let node = peek_word(link);
            if peek_word(node) == object.addr() {
                poke_word(link, peek_word(node + 8));
                return;
            }
            link = node + 8;
        }
    }

    /// An object record that is on no tile list
    pub fn loose_object(&self, pid: i32) -> ObjectHandle {
        let object = alloc(0x20);
        poke_i32(object + OBJ_TILE, -1);
        poke_i32(object + OBJ_PID, pid);
        unsafe { ObjectHandle::from_addr(object) }.unwrap()
    }

    pub fn set_object_id(&self, object: ObjectHandle, id: i32) {
        poke_i32(object.addr() + OBJ_ID, id);
    }

    pub fn set_flags(&self, object: ObjectHandle, flags: u32) {
        poke_i32(object.addr() + OBJ_FLAGS, flags as i32);
    }

    pub fn set_bounds(&self, object: ObjectHandle, bounds: [i32; 4]) {
        with_state(|s| s.bounds.insert(object.addr(), bounds));
    }

    pub fn set_inventory_len(&self, object: ObjectHandle, len: i32) {
        poke_i32(object.addr() + OBJ_INVEN_SIZE, len);
    }

    pub fn set_slot(&self, critter: ObjectHandle, slot: i32, item: ObjectHandle) {
        with_state(|s| s.slots.insert((critter.addr(), slot), item.addr()));
    }

    pub fn set_item_type(&self, item: ObjectHandle, item_type: i32) {
        with_state(|s| s.item_types.insert(item.addr(), item_type));
    }

    pub fn set_stat(&self, critter: ObjectHandle, stat: i32, value: i32) {
        with_state(|s| s.stats.insert((critter.addr(), stat), value));
    }

    pub fn set_dude(&self, dude: Option<ObjectHandle>) {
        poke_word(self.var("obj_dude"), dude.map_or(0, |d| d.addr()));
    }

    // ------------------------------------------------------------------
    // Templates and scripts
    // ------------------------------------------------------------------

    /// Register a template; word `i` holds `100 + i` except the PID and
    /// the critter flags, which start cleared
    pub fn add_proto(&self, pid: i32) -> ProtoRef {
        let proto = alloc(CRITTER_PROTO_WORDS * 4);
        for index in 0..CRITTER_PROTO_WORDS {
            poke_i32(proto + index * 4, 100 + index as i32);
        }
        poke_i32(proto + PROTO_PID, pid);
        poke_i32(proto + PROTO_CRITTER_FLAGS, 0);
        with_state(|s| s.protos.insert(pid, proto));
        unsafe { ProtoRef::from_addr(proto) }.unwrap()
    }

    pub fn add_weapon_proto(&self, pid: i32, item_type: i32, anim_code: i32) -> ProtoRef {
        let proto = self.add_proto(pid);
        poke_i32(proto.addr() + PROTO_ITEM_TYPE, item_type);
        poke_i32(proto.addr() + PROTO_ANIM_CODE, anim_code);
        proto
    }

    pub fn proto_flags(&self, proto: ProtoRef) -> u32 {
        peek_i32(proto.addr() + PROTO_CRITTER_FLAGS) as u32
    }

    /// Word `index` of a template record
    pub fn proto_word(&self, proto: ProtoRef, index: usize) -> i32 {
        peek_i32(proto.addr() + index * 4)
    }

    pub fn add_script(&self, sid: i32, local_vars: i32) -> ScriptRef {
        let script = alloc(0x40);
        poke_i32(script + 0x24, local_vars);
        with_state(|s| s.scripts.insert(sid, script));
        unsafe { ScriptRef::from_addr(script) }.unwrap()
    }

    // ------------------------------------------------------------------
    // Message lists
    // ------------------------------------------------------------------

    /// A message list with records sorted by number; `None` text is null
    pub fn message_list(&self, records: &[(i32, Option<&str>)]) -> MessageListRef {
        let nodes = alloc(records.len() * 16);
        for (index, (number, text)) in records.iter().enumerate() {
            let node = nodes + index * 16;
            poke_i32(node, *number);
            poke_word(node + 8, text.map_or(0, leak_c_string));
        }

        let list = alloc(16);
        poke_i32(list, records.len() as i32);
        poke_word(list + 8, if records.is_empty() { 0 } else { nodes });
        unsafe { MessageListRef::from_addr(list) }.unwrap()
    }

    pub fn set_message_count(&self, list: MessageListRef, count: i32) {
        poke_i32(list.addr(), count);
    }

    // ------------------------------------------------------------------
    // Rect pool
    // ------------------------------------------------------------------

    pub fn new_rect(&self) -> RectNode {
        unsafe { RectNode::from_addr(alloc(0x18)) }.unwrap()
    }

    pub fn rect_head(&self) -> usize {
        peek_word(self.var("rect_list"))
    }

    pub fn rect_next(&self, node: usize) -> usize {
        peek_word(node + 0x10)
    }

    // ------------------------------------------------------------------
    // Party, interface, fonts
    // ------------------------------------------------------------------

    pub fn set_party(&self, pids: &[i32]) {
        let list = alloc(pids.len() * 4);
        for (index, pid) in pids.iter().enumerate() {
            poke_i32(list + index * 4, *pid);
        }
        poke_i32(self.var("party_member_max_count"), pids.len() as i32);
        poke_word(self.var("party_member_pid_list"), if pids.is_empty() { 0 } else { list });
    }

    pub fn set_interface_window(&self, window: i32) {
        poke_i32(self.var("interface_window"), window);
    }

    pub fn set_current_hand(&self, hand: i32) {
        poke_i32(self.var("item_current_item"), hand);
    }

    pub fn set_button(
        &self,
        hand: usize,
        item: Option<ObjectHandle>,
        mode: i32,
        primary: i32,
        secondary: i32,
    ) {
        let button = self.var("item_button_items") + hand * BUTTON_SIZE;
        poke_word(button + BUTTON_ITEM, item.map_or(0, |i| i.addr()));
        poke_i32(button + BUTTON_MODE, mode);
        poke_i32(button + BUTTON_PRIMARY, primary);
        poke_i32(button + BUTTON_SECONDARY, secondary);
    }

    pub fn button_mode(&self, hand: usize) -> i32 {
        peek_i32(self.var("item_button_items") + hand * BUTTON_SIZE + BUTTON_MODE)
    }

    // ------------------------------------------------------------------
    // Windows and world map
    // ------------------------------------------------------------------

    /// Open a window on top of the stack; `rect` is (left, top, right, bottom)
    ///
    /// Returns the window record's address and its pixel buffer.
    pub fn open_window(&self, id: i32, rect: [i32; 4], with_buffer: bool) -> (usize, &'static mut [u8]) {
        let width = rect[2] - rect[0] + 1;
        let height = rect[3] - rect[1] + 1;
        let window = alloc(0x30);
        poke_i32(window + WIN_ID, id);
        for (index, value) in rect.iter().enumerate() {
            poke_i32(window + WIN_RECT + index * 4, *value);
        }
        poke_i32(window + WIN_WIDTH, width);
        poke_i32(window + WIN_HEIGHT, height);

        let pixels: &'static mut [u8] = if with_buffer {
            Box::leak(vec![0xAAu8; (width * height) as usize].into_boxed_slice())
        } else {
            Box::leak(Vec::new().into_boxed_slice())
        };
        if with_buffer {
            poke_word(window + WIN_BUFFER, pixels.as_ptr() as usize);
        }

        let count = peek_i32(self.var("num_windows")) as usize;
        poke_word(self.var("window") + count * 8, window);
        poke_i32(self.var("num_windows"), count as i32 + 1);
        with_state(|s| s.windows.insert(id, window));
        (window, pixels)
    }

    pub fn scr_size(&self) -> usize {
        self.var("scr_size")
    }

    pub fn doing_refresh_all(&self) -> i32 {
        peek_i32(self.var("doing_refresh_all"))
    }

    pub fn set_world_pos(&self, x: i32, y: i32) {
        poke_i32(self.var("world_xpos"), x);
        poke_i32(self.var("world_ypos"), y);
    }

    /// A terrain cell the world map lookup returns for `(x, y)`
    pub fn add_terrain(&self, (x, y): (i32, i32), terrain: i32) -> usize {
        let cell = alloc(4);
        poke_i32(cell, terrain);
        with_state(|s| s.terrain.insert((x, y), cell));
        cell
    }

    pub fn cached_subtile(&self) -> usize {
        peek_word(self.var("world_subtile"))
    }

    pub fn set_cached_subtile(&self, cell: usize) {
        poke_word(self.var("world_subtile"), cell);
    }

    fn install_fonts(&self) {
        let fonts: [(&str, usize); 7] = [
            ("text_height", fake_text_height as usize),
            ("text_width", fake_text_width as usize),
            ("text_char_width", fake_text_char_width as usize),
            ("text_max", fake_text_max as usize),
            ("text_spacing", fake_text_spacing as usize),
            ("text_mono_width", fake_text_mono_width as usize),
            ("text_to_buf", fake_text_to_buf as usize),
        ];
        for (name, function) in fonts {
            poke_word(self.var(name), function);
        }
    }

    pub fn clear_fonts(&self) {
        for name in [
            "text_height",
            "text_width",
            "text_char_width",
            "text_max",
            "text_spacing",
            "text_mono_width",
            "text_to_buf",
        ] {
            poke_word(self.var(name), 0);
        }
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

pub fn printed() -> Vec<String> {
    with_state(|s| {
        s.printed
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    })
}

/// Printed lines exactly as the host received them
pub fn printed_bytes() -> Vec<Vec<u8>> {
    with_state(|s| s.printed.clone())
}

pub fn refreshes() -> Vec<(usize, [i32; 4], i32)> {
    with_state(|s| s.refreshes.clone())
}

pub fn tile_refreshes() -> Vec<([i32; 4], i32)> {
    with_state(|s| s.tile_refreshes.clone())
}

pub fn subtile_lookups() -> usize {
    with_state(|s| s.subtile_lookups)
}

pub fn tags() -> [i32; 8] {
    with_state(|s| s.tags)
}

pub fn set_tags(values: &[i32]) {
    with_state(|s| s.tags[..values.len()].copy_from_slice(values));
}

pub fn last_tag_count() -> Option<usize> {
    with_state(|s| s.last_tag_count)
}

pub fn slot_calls() -> usize {
    with_state(|s| s.slot_calls)
}
