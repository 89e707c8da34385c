//! Interface item buttons (left and right hand)

use super::RawView;
use fobridge_config::ItemButtonOffsets;

/// Accessors for one entry of the host's item button array
#[derive(Debug, Clone, Copy)]
pub struct ItemButtonView<'l> {
    raw: RawView,
    offsets: &'l ItemButtonOffsets,
}

impl<'l> ItemButtonView<'l> {
    /// View of button `index` in the array at `array_addr`
    ///
    /// # Safety
    ///
    /// `array_addr` must be the host's item button array, `index` must be a
    /// valid button and `offsets` must describe the running host.
    pub unsafe fn new(array_addr: usize, index: usize, offsets: &'l ItemButtonOffsets) -> Option<Self> {
        let raw = RawView::new(array_addr.wrapping_add(index * offsets.size))?;
        Some(Self { raw, offsets })
    }

    /// Address of the item in the button, 0 when empty
    pub fn item(&self) -> usize {
        unsafe { self.raw.read_word(self.offsets.item) }
    }

    pub fn mode(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.mode) }
    }

    pub fn set_mode(&self, mode: i32) {
        unsafe { self.raw.write(self.offsets.mode, mode) }
    }

    pub fn primary_attack(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.primary_attack) }
    }

    pub fn secondary_attack(&self) -> i32 {
        unsafe { self.raw.read(self.offsets.secondary_attack) }
    }
}
