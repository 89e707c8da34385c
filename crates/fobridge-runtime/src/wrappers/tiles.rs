//! Tile grid queries

use crate::hex::Grid;
use crate::host::Host;
use crate::view::{ObjectHandle, ObjectType};

impl Host {
    /// Grid geometry of the running host
    pub fn grid(&self) -> Grid {
        let constants = &self.layout().constants;
        Grid::new(constants.grid_width as i32, constants.grid_height as i32)
    }

    /// Hex steps between two tiles, `None` if either is off the grid
    pub fn tile_distance(&self, a: i32, b: i32) -> Option<i32> {
        self.grid().distance(a, b)
    }

    /// Objects on `elevation` within `radius` tiles of `center`
    ///
    /// Objects flagged as multi-hex cover the tiles around their own, so
    /// they also match one step further out. Results are ordered by the hex
    /// distance of the object's tile, then tile number, then the host's
    /// order within a tile. `filter` keeps only objects of one type. An
    /// invalid center, radius or elevation gives an empty result.
    pub fn objects_in_radius(
        &self,
        center: i32,
        radius: i32,
        elevation: i32,
        filter: Option<ObjectType>,
    ) -> Vec<ObjectHandle> {
        let constants = &self.layout().constants;
        if radius < 0 || elevation < 0 || i64::from(elevation) >= constants.elevations {
            return Vec::new();
        }
        let multihex = constants.multihex_flag as u32;
        let grid = self.grid();

        // One list per tile holds every elevation.
        let mut found = Vec::new();
        for tile in grid.tiles_within(center, radius.saturating_add(1)) {
            let Some(distance) = grid.distance(center, tile) else {
                continue;
            };
            let mut node = self.tile_list(tile as usize);
            while let Some(current) = node {
                // Tile lists only hold live objects.
                if let Some(handle) = unsafe { ObjectHandle::from_addr(current.object()) } {
                    let object = self.object(handle);
                    let reach = if object.flags() & multihex != 0 {
                        radius.saturating_add(1)
                    } else {
                        radius
                    };
                    let wanted = filter.map_or(true, |kind| object.object_type() == kind);
                    if distance <= reach && object.elevation() == elevation && wanted {
                        found.push(handle);
                    }
                }
                node = current.next();
            }
        }

        log::trace!(
            "objects_in_radius(tile {}, radius {}, elevation {}): {} found",
            center,
            radius,
            elevation,
            found.len()
        );
        found
    }
}
