//! Typed wrappers over host functions and records
//!
//! Each submodule adds methods to [`Host`](crate::host::Host). Wrappers
//! validate their inputs before touching host memory and report absence
//! through sentinels (`None`, a placeholder string, an empty `Vec`, `0`)
//! instead of errors.

pub mod character;
pub mod interface;
pub mod inventory;
pub mod message;
pub mod party;
pub mod proto;
pub mod rect;
pub mod skills;
pub mod text;
pub mod tiles;
pub mod window;
pub mod worldmap;

pub use interface::HAND_COUNT;
pub use inventory::InvenSlot;
pub use message::MESSAGE_PLACEHOLDER;
