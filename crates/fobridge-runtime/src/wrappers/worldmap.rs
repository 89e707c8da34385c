//! World map state

use crate::ffi::HostArg;
use crate::host::Host;
use crate::view::{read_global, write_global};

impl Host {
    /// Terrain type of the world map sub-tile under the player, -1 when
    /// the host cannot resolve one
    ///
    /// The host caches the sub-tile pointer; when the cache is empty it is
    /// looked up from the current world position and stored back.
    pub fn current_terrain_type(&self) -> i32 {
        let variables = &self.layout().variables;
        let mut terrain: usize = unsafe { read_global(variables.world_subtile) };
        if terrain == 0 {
            let (x, y): (i32, i32) =
                unsafe { (read_global(variables.world_xpos), read_global(variables.world_ypos)) };
            let called = unsafe {
                self.call(
                    "wm_find_cur_sub_tile",
                    self.layout().functions.wm_find_cur_sub_tile,
                    &[HostArg::Int(x), HostArg::Int(y), HostArg::out(&mut terrain as *mut usize)],
                )
            };
            if called.is_none() || terrain == 0 {
                return -1;
            }
            unsafe { write_global(variables.world_subtile, terrain) };
        }
        unsafe { read_global(terrain) }
    }
}
