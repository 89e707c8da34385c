//! Hex tile grid geometry
//!
//! Tiles are numbered row by row: `tile = y * width + x`. Odd columns sit
//! half a hex lower than even ones, so a tile in an even column touches
//! rows `y - 1` and `y` of its side neighbours, and a tile in an odd column
//! touches rows `y` and `y + 1`.

/// Dimensions of one elevation's tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_count(&self) -> i32 {
        self.width * self.height
    }

    pub fn contains(&self, tile: i32) -> bool {
        tile >= 0 && tile < self.tile_count()
    }

    /// Column and row of `tile`
    pub fn coords(&self, tile: i32) -> Option<(i32, i32)> {
        if !self.contains(tile) {
            return None;
        }
        Some((tile % self.width, tile / self.width))
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<i32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Hex steps between two tiles, `None` if either is off the grid
    pub fn distance(&self, a: i32, b: i32) -> Option<i32> {
        let (ax, ay) = self.coords(a)?;
        let (bx, by) = self.coords(b)?;
        Some(axial_distance(ax, ay, bx, by))
    }

    /// Every tile within `radius` steps of `center`, nearest first
    ///
    /// Tiles at the same distance come in ascending tile order. Empty when
    /// `center` is off the grid or `radius` is negative.
    pub fn tiles_within(&self, center: i32, radius: i32) -> Vec<i32> {
        let Some((cx, cy)) = self.coords(center) else {
            return Vec::new();
        };
        if radius < 0 {
            return Vec::new();
        }
        let radius = radius.min(self.width + self.height);

        let mut tiles: Vec<(i32, i32)> = Vec::new();
        for y in (cy - radius).max(0)..=(cy + radius).min(self.height - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width - 1) {
                let distance = axial_distance(cx, cy, x, y);
                if distance <= radius {
                    tiles.push((distance, y * self.width + x));
                }
            }
        }
        tiles.sort_unstable();
        tiles.into_iter().map(|(_, tile)| tile).collect()
    }
}

/// Offset coordinates to axial `(q, r)`
fn to_axial(x: i32, y: i32) -> (i32, i32) {
    (x, y - (x - (x & 1)) / 2)
}

fn axial_distance(ax: i32, ay: i32, bx: i32, by: i32) -> i32 {
    let (aq, ar) = to_axial(ax, ay);
    let (bq, br) = to_axial(bx, by);
    let dq = aq - bq;
    let dr = ar - br;
    (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
}
