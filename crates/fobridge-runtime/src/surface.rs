//! 8-bit paletted surface blits
//!
//! Surfaces are caller-owned byte slices with a row pitch. Every blit is
//! clipped against both surfaces, so a region that hangs off either edge
//! copies only the overlapping part and never writes outside `dst`.

/// Palette index the host normally treats as transparent
pub const TRANSPARENT: u8 = 0;

/// Read-only surface
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
    pitch: usize,
}

/// Writable surface
#[derive(Debug)]
pub struct SurfaceMut<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
    pitch: usize,
}

fn fits(len: usize, width: usize, height: usize, pitch: usize) -> bool {
    if pitch < width {
        return false;
    }
    if width == 0 || height == 0 {
        return true;
    }
    (height - 1)
        .checked_mul(pitch)
        .and_then(|rows| rows.checked_add(width))
        .is_some_and(|needed| needed <= len)
}

impl<'a> Surface<'a> {
    /// `None` when `pixels` is too short for the given shape
    pub fn new(pixels: &'a [u8], width: usize, height: usize, pitch: usize) -> Option<Self> {
        fits(pixels.len(), width, height, pitch).then_some(Self {
            pixels,
            width,
            height,
            pitch,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize, x: usize, len: usize) -> &[u8] {
        let start = y * self.pitch + x;
        &self.pixels[start..start + len]
    }
}

impl<'a> SurfaceMut<'a> {
    /// `None` when `pixels` is too short for the given shape
    pub fn new(pixels: &'a mut [u8], width: usize, height: usize, pitch: usize) -> Option<Self> {
        if !fits(pixels.len(), width, height, pitch) {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
            pitch,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of two rows
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Pointer to the pixel at `(x, y)`, for host routines that draw
    /// directly into the surface
    pub(crate) fn pixel_ptr(&mut self, x: usize, y: usize) -> *mut u8 {
        self.pixels[y * self.pitch + x..].as_mut_ptr()
    }

    fn row_mut(&mut self, y: usize, x: usize, len: usize) -> &mut [u8] {
        let start = y * self.pitch + x;
        &mut self.pixels[start..start + len]
    }
}

/// A rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Overlap of a `region` of a `src_w` x `src_h` source drawn at
/// (`to_x`, `to_y`) on a `dst_w` x `dst_h` destination
///
/// Returns (src_x, src_y, dst_x, dst_y, width, height) with every value
/// inside both surfaces, or `None` when nothing overlaps.
fn clip(
    region: Region,
    (src_w, src_h): (usize, usize),
    (to_x, to_y): (i32, i32),
    (dst_w, dst_h): (usize, usize),
) -> Option<(usize, usize, usize, usize, usize, usize)> {
    let axis = |from: i64, to: i64, len: i64, src_len: i64, dst_len: i64| {
        // shift both start points until they are on their surfaces
        let skip = 0i64.max(-from).max(-to);
        let (from, to) = (from + skip, to + skip);
        let len = (len - skip).min(src_len - from).min(dst_len - to);
        (len > 0).then_some((from as usize, to as usize, len as usize))
    };

    let (sx, dx, width) = axis(
        i64::from(region.x),
        i64::from(to_x),
        i64::from(region.width),
        src_w as i64,
        dst_w as i64,
    )?;
    let (sy, dy, height) = axis(
        i64::from(region.y),
        i64::from(to_y),
        i64::from(region.height),
        src_h as i64,
        dst_h as i64,
    )?;
    Some((sx, sy, dx, dy, width, height))
}

fn blit(
    src: &Surface<'_>,
    region: Region,
    dst: &mut SurfaceMut<'_>,
    to: (i32, i32),
    mask: Option<u8>,
) -> usize {
    let Some((sx, sy, dx, dy, width, height)) = clip(
        region,
        (src.width, src.height),
        to,
        (dst.width, dst.height),
    ) else {
        return 0;
    };

    for row in 0..height {
        let from = src.row(sy + row, sx, width);
        let into = dst.row_mut(dy + row, dx, width);
        match mask {
            Some(mask) => {
                for (d, &s) in into.iter_mut().zip(from) {
                    if s != mask {
                        *d = s;
                    }
                }
            }
            None => into.copy_from_slice(from),
        }
    }
    width * height
}

/// Copy `region` of `src` onto `dst` at `to`
///
/// Returns the number of pixels in the clipped area.
pub fn draw_to_surface(src: &Surface<'_>, region: Region, dst: &mut SurfaceMut<'_>, to: (i32, i32)) -> usize {
    blit(src, region, dst, to, None)
}

/// Like [`draw_to_surface`], skipping source pixels equal to `mask`
///
/// Pass [`TRANSPARENT`] for the host's usual transparent index.
pub fn draw_masked(
    src: &Surface<'_>,
    region: Region,
    dst: &mut SurfaceMut<'_>,
    to: (i32, i32),
    mask: u8,
) -> usize {
    blit(src, region, dst, to, Some(mask))
}

/// Copy `region` of `src` into `out` as tightly packed rows
///
/// `out` is treated as a `region.width` wide buffer; rows past its end and
/// parts of the region outside `src` are skipped. Returns the number of
/// pixels copied.
pub fn copy_to_mem(src: &Surface<'_>, region: Region, out: &mut [u8]) -> usize {
    let Ok(out_width) = usize::try_from(region.width) else {
        return 0;
    };
    if out_width == 0 {
        return 0;
    }
    let out_height = out.len() / out_width;
    let Some(mut dst) = SurfaceMut::new(out, out_width, out_height, out_width) else {
        return 0;
    };
    blit(src, region, &mut dst, (0, 0), None)
}
