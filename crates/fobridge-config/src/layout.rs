//! Resolved layout
//!
//! [`Layout`] is the typed view of one [`VersionTable`]: every symbol the
//! runtime touches is looked up once, converted to the target's pointer
//! width and checked. A layout is never modified after it is built.

use crate::table::{Convention, VersionTable};
use crate::{ConfigError, ConfigResult};

/// Declares a group of named symbols resolved from one section of a table
macro_rules! symbol_group {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $ty:ty {
            $($(#[$fmeta:meta])* $field:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $($(#[$fmeta])* pub $field: $ty,)*
        }

        impl $name {
            /// Names of every symbol in this group
            pub const NAMES: &'static [&'static str] = &[$(stringify!($field)),*];

            fn resolve(
                mut lookup: impl FnMut(&'static str) -> ConfigResult<$ty>,
            ) -> ConfigResult<Self> {
                Ok(Self {
                    $($field: lookup(stringify!($field))?,)*
                })
            }
        }
    };
}

/// A resolved host function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionAddr {
    pub address: usize,
    pub convention: Convention,
    pub args: usize,
}

/// A resolved version probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub address: usize,
    pub len: usize,
    pub sha256: String,
}

symbol_group! {
    /// Host functions called through thunks
    pub struct Functions: FunctionAddr {
        /// `(text)`
        display_print,
        /// `(pid, &mut proto_ptr) -> 0 | -1`
        proto_ptr,
        /// `(dst, count)`
        skill_get_tags,
        /// `(src, count)`
        skill_set_tags,
        /// `(critter) -> item`
        inven_left_hand,
        /// `(critter) -> item`
        inven_right_hand,
        /// `(critter) -> item`
        inven_worn,
        /// `(item) -> item type`
        item_get_type,
        /// `(critter, stat) -> value`
        stat_level,
        /// `(sid, &mut script_ptr) -> 0 | -1`
        scr_ptr,
        /// `(object, &mut bound_rect)`
        obj_bound,
        /// `(&rect, elevation)`
        tile_refresh_rect,
        /// `(window id) -> window`
        gnw_find,
        /// `(window, &rect, buffer)`
        gnw_win_refresh,
        /// `(x, y, &mut terrain_ptr)`
        wm_find_cur_sub_tile,
    }
}

symbol_group! {
    /// Host global variables
    pub struct Variables: usize {
        /// `RectList*` free-list head
        rect_list,
        /// `GameObject*` of the player character
        obj_dude,
        /// Per-tile object list heads
        object_table,
        /// Number of entries in the party member table
        party_member_max_count,
        /// `long*` party member PIDs
        party_member_pid_list,
        /// Active hand index (0 left, 1 right)
        item_current_item,
        /// Interface item button array
        item_button_items,
        /// Interface window id, -1 when closed
        interface_window,
        /// Font function pointer: `() -> height`
        text_height,
        /// Font function pointer: `(text) -> width`
        text_width,
        /// Font function pointer: `(char) -> width`
        text_char_width,
        /// Font function pointer: `() -> widest glyph`
        text_max,
        /// Font function pointer: `() -> gap`
        text_spacing,
        /// Font function pointer: `(text) -> monospaced width`
        text_mono_width,
        /// Font function pointer: `(buffer, text, width, pitch, color)`
        text_to_buf,
        /// `Window*[]` in stacking order, bottom first
        window,
        /// Number of entries in `window`
        num_windows,
        /// Set while every window is being redrawn
        doing_refresh_all,
        /// Screen rectangle
        scr_size,
        world_xpos,
        world_ypos,
        /// Cached `long*` terrain of the current world map sub-tile
        world_subtile,
    }
}

symbol_group! {
    /// Live object record
    pub struct ObjectOffsets: usize {
        id,
        tile,
        elevation,
        flags,
        inven_size,
        pid,
    }
}

symbol_group! {
    /// Template record
    pub struct ProtoOffsets: usize {
        pid,
        item_type,
        weapon_anim_code,
        critter_flags,
    }
}

symbol_group! {
    /// Message list and its records
    pub struct MessageOffsets: usize {
        count,
        nodes,
        node_number,
        node_text,
        node_size,
    }
}

symbol_group! {
    /// Pooled dirty-rectangle node
    pub struct RectOffsets: usize {
        next,
    }
}

symbol_group! {
    /// Entry of a per-tile object list
    pub struct TileNodeOffsets: usize {
        object,
        next,
    }
}

symbol_group! {
    /// Script instance
    pub struct ScriptOffsets: usize {
        num_local_vars,
    }
}

symbol_group! {
    /// Interface item button
    pub struct ItemButtonOffsets: usize {
        item,
        mode,
        primary_attack,
        secondary_attack,
        size,
    }
}

symbol_group! {
    /// Interface window
    pub struct WindowOffsets: usize {
        id,
        rect_left,
        rect_top,
        rect_right,
        rect_bottom,
        width,
        height,
        buffer,
    }
}

symbol_group! {
    /// Engine constants
    pub struct Constants: i64 {
        grid_width,
        grid_height,
        elevations,
        tag_skill_slots,
        stat_gender,
        gender_female,
        critter_proto_size,
        item_type_weapon,
        atk_lweapon_reload,
        multihex_flag,
        player_id,
    }
}

/// Everything the runtime knows about one host build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub version: String,
    pub description: Option<String>,
    pub probe: Option<Probe>,
    pub functions: Functions,
    pub variables: Variables,
    pub object: ObjectOffsets,
    pub proto: ProtoOffsets,
    pub message: MessageOffsets,
    pub rect: RectOffsets,
    pub tile_node: TileNodeOffsets,
    pub script: ScriptOffsets,
    pub item_button: ItemButtonOffsets,
    pub window: WindowOffsets,
    pub constants: Constants,
}

fn unresolved(version: &str, symbol: String) -> ConfigError {
    ConfigError::UnresolvedSymbol {
        version: version.to_string(),
        symbol,
    }
}

fn to_usize(version: &str, symbol: &str, value: u64) -> ConfigResult<usize> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidValue {
        version: version.to_string(),
        symbol: symbol.to_string(),
        reason: format!("{:#x} does not fit in a pointer", value),
    })
}

fn offset(table: &VersionTable, version: &str, record: &str, field: &str) -> ConfigResult<usize> {
    let symbol = format!("{}.{}", record, field);
    match table.offset_of(record, field) {
        Some(value) => to_usize(version, &symbol, value),
        None => Err(unresolved(version, symbol)),
    }
}

impl Layout {
    /// Resolve a version table
    pub fn resolve(table: &VersionTable, version: &str) -> ConfigResult<Self> {
        let functions = Functions::resolve(|name| {
            let spec = table
                .functions
                .get(name)
                .ok_or_else(|| unresolved(version, name.to_string()))?;
            Ok(FunctionAddr {
                address: to_usize(version, name, spec.address)?,
                convention: spec.convention,
                args: usize::from(spec.args),
            })
        })?;

        let variables = Variables::resolve(|name| {
            let address = table
                .variables
                .get(name)
                .ok_or_else(|| unresolved(version, name.to_string()))?;
            to_usize(version, name, *address)
        })?;

        let constants = Constants::resolve(|name| {
            table
                .constant(name)
                .ok_or_else(|| unresolved(version, name.to_string()))
        })?;

        let probe = match &table.probe {
            Some(spec) => Some(Probe {
                address: to_usize(version, "probe.address", spec.address)?,
                len: to_usize(version, "probe.len", spec.len)?,
                sha256: spec.sha256.to_ascii_lowercase(),
            }),
            None => None,
        };

        let layout = Layout {
            version: version.to_string(),
            description: table.description.clone(),
            probe,
            functions,
            variables,
            object: ObjectOffsets::resolve(|f| offset(table, version, "object", f))?,
            proto: ProtoOffsets::resolve(|f| offset(table, version, "proto", f))?,
            message: MessageOffsets::resolve(|f| offset(table, version, "message", f))?,
            rect: RectOffsets::resolve(|f| offset(table, version, "rect", f))?,
            tile_node: TileNodeOffsets::resolve(|f| offset(table, version, "tile_node", f))?,
            script: ScriptOffsets::resolve(|f| offset(table, version, "script", f))?,
            item_button: ItemButtonOffsets::resolve(|f| offset(table, version, "item_button", f))?,
            window: WindowOffsets::resolve(|f| offset(table, version, "window", f))?,
            constants,
        };
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> ConfigResult<()> {
        let invalid = |symbol: &str, reason: &str| ConfigError::InvalidValue {
            version: self.version.clone(),
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        };
        let c = &self.constants;

        if c.grid_width <= 0 || c.grid_height <= 0 {
            return Err(invalid("grid_width", "tile grid dimensions must be positive"));
        }
        let tiles = i32::try_from(c.grid_width)
            .ok()
            .zip(i32::try_from(c.grid_height).ok())
            .and_then(|(width, height)| width.checked_mul(height));
        if tiles.is_none() {
            return Err(invalid(
                "grid_width",
                "tile count must fit in a 32-bit tile number",
            ));
        }
        if c.elevations <= 0 {
            return Err(invalid("elevations", "must be positive"));
        }
        if c.tag_skill_slots < 0 {
            return Err(invalid("tag_skill_slots", "must not be negative"));
        }
        if c.critter_proto_size < 0 || c.critter_proto_size % 4 != 0 {
            return Err(invalid(
                "critter_proto_size",
                "must be a non-negative multiple of 4",
            ));
        }
        if self.message.node_size == 0 {
            return Err(invalid("message.node_size", "must be non-zero"));
        }
        if self.item_button.size == 0 {
            return Err(invalid("item_button.size", "must be non-zero"));
        }
        if let Some(probe) = &self.probe {
            let well_formed = probe.sha256.len() == 64
                && probe.sha256.bytes().all(|b| b.is_ascii_hexdigit());
            if !well_formed {
                return Err(invalid("probe.sha256", "expected a 64 digit hex digest"));
            }
        }
        Ok(())
    }

    /// Number of tiles on one elevation
    pub fn tile_count(&self) -> usize {
        (self.constants.grid_width * self.constants.grid_height) as usize
    }
}
