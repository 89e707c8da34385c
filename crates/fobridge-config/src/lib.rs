//! fobridge Layout Tables
//!
//! Provides the per-version address and layout data the interop runtime needs:
//! - Version tables (function addresses, global variables, record field offsets)
//! - The bundled table for the supported host build
//! - Version selection (explicit request, environment, probe, default)
//! - Resolution into a typed, immutable [`Layout`]
//!
//! # Version Selection
//!
//! A version is chosen in the following order (earlier wins):
//! 1. The version requested by the caller
//! 2. The `FOBRIDGE_HOST_VERSION` environment variable
//! 3. The first version whose probe matches the running host
//! 4. The file's `default` entry
//!
//! # Example
//!
//! ```no_run
//! use fobridge_config::{LayoutFile, LayoutLoader};
//!
//! let file = LayoutFile::bundled().unwrap();
//! let layout = LayoutLoader::new().select(&file, None, |_| false).unwrap();
//! assert_eq!(layout.constants.grid_width, 200);
//! ```

pub mod layout;
pub mod loader;
pub mod table;

use std::path::PathBuf;
use thiserror::Error;

/// Layout configuration errors
///
/// All of these are fatal: they are raised while the layout is loaded and
/// resolved, never while host code is being called.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Layout file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read layout file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {origin}: {error}")]
    TomlParseError {
        origin: String,
        error: toml::de::Error,
    },

    #[error("Unknown host version '{0}'")]
    UnknownVersion(String),

    #[error("No host version matched (requested: {requested:?}, default: {default:?})")]
    NoMatchingVersion {
        requested: Option<String>,
        default: Option<String>,
    },

    #[error("Symbol '{symbol}' is not defined for host version '{version}'")]
    UnresolvedSymbol { version: String, symbol: String },

    #[error("Invalid value for '{symbol}' in host version '{version}': {reason}")]
    InvalidValue {
        version: String,
        symbol: String,
        reason: String,
    },
}

/// Result type for layout operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use layout::{
    Constants, FunctionAddr, Functions, ItemButtonOffsets, Layout, MessageOffsets,
    ObjectOffsets, Probe, ProtoOffsets, RectOffsets, ScriptOffsets, TileNodeOffsets, Variables,
    WindowOffsets,
};
pub use loader::{LayoutLoader, VERSION_ENV};
pub use table::{Convention, FunctionSpec, LayoutFile, ProbeSpec, VersionTable};
