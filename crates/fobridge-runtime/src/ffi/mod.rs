//! Foreign call infrastructure
//!
//! Calls into the host go through [`HostFunction`]:
//! - Argument marshaling into machine words (`HostArg` -> `HostWord`)
//! - One trampoline per calling convention (register or stack)
//! - Return word decoding (`HostValue`)
//!
//! # Safety
//!
//! Every call jumps to a fixed address inside the host image. The thunks do
//! not validate arguments; the wrappers in [`crate::wrappers`] do.

pub mod caller;
pub mod safety;
pub mod types;

pub use caller::{CallError, HostFunction, REGISTER_SLOTS};
pub use safety::{borrow_c_str, check_null, HostCString, HostText};
pub use types::{HostArg, HostValue, HostWord};
