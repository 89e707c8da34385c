//! fobridge runtime - typed access to a fixed-layout host executable
//!
//! This library provides:
//! - Calls into host functions by address and calling convention ([`ffi`])
//! - Typed views over host records ([`view`])
//! - Host installation and version probing ([`host`])
//! - Domain wrappers with sentinel results ([`wrappers`])
//! - Hex grid geometry and surface blits ([`hex`], [`surface`])
//! - A C ABI over the installed host ([`capi`])

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod capi;
pub mod error;
pub mod ffi;
pub mod hex;
pub mod host;
pub mod surface;
pub mod view;
pub mod wrappers;

pub use error::{BridgeError, BridgeResult};
pub use ffi::{CallError, HostArg, HostFunction, HostText, HostValue};
pub use fobridge_config::{Layout, LayoutFile, LayoutLoader};
pub use hex::Grid;
pub use host::{install, install_from_file, installed, Host};
pub use surface::{Region, Surface, SurfaceMut};
pub use view::{MessageListRef, ObjectHandle, ObjectType, ProtoRef, RectNode, ScriptRef, WindowRef};
pub use wrappers::{InvenSlot, MESSAGE_PLACEHOLDER};
