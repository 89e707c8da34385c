//! Interface bar item buttons

use crate::host::Host;
use crate::view::{read_global, ItemButtonView, ObjectHandle};

/// Number of hand buttons on the interface bar
pub const HAND_COUNT: i32 = 2;

impl Host {
    fn current_hand(&self) -> Option<usize> {
        let hand: i32 = unsafe { read_global(self.layout().variables.item_current_item) };
        (0..HAND_COUNT).contains(&hand).then_some(hand as usize)
    }

    fn current_button(&self) -> Option<ItemButtonView<'_>> {
        let hand = self.current_hand()?;
        unsafe {
            ItemButtonView::new(
                self.layout().variables.item_button_items,
                hand,
                &self.layout().item_button,
            )
        }
    }

    /// Item in the active hand button
    pub fn active_item(&self) -> Option<ObjectHandle> {
        let button = self.current_button()?;
        unsafe { ObjectHandle::from_addr(button.item()) }
    }

    /// Mode of the active hand button, -1 when no hand is active
    pub fn active_item_mode(&self) -> i32 {
        self.current_button().map_or(-1, |button| button.mode())
    }

    /// Set the mode of the active hand button
    ///
    /// Returns `false` when no hand is active.
    pub fn set_active_item_mode(&self, mode: i32) -> bool {
        match self.current_button() {
            Some(button) => {
                button.set_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Attack type of the active hand in its current mode
    ///
    /// -1 when the interface window is closed, no hand is active or the
    /// mode has no attack.
    pub fn current_attack_mode(&self) -> i32 {
        let window: i32 = unsafe { read_global(self.layout().variables.interface_window) };
        if window == -1 {
            return -1;
        }
        let Some(hand) = self.current_hand() else {
            return -1;
        };
        let Some(button) = self.current_button() else {
            return -1;
        };

        match button.mode() {
            1 | 2 => button.primary_attack(),
            3 | 4 => button.secondary_attack(),
            5 => self.layout().constants.atk_lweapon_reload as i32 + hand as i32,
            _ => -1,
        }
    }
}
