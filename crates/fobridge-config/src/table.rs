//! Version tables (layout TOML)
//!
//! A layout file holds one table per supported host build:
//!
//! ```toml
//! default = "1.02d-us"
//!
//! [versions."1.02d-us".functions]
//! proto_ptr = { address = 0x4A2108, convention = "register", args = 2 }
//!
//! [versions."1.02d-us".variables]
//! rect_list = 0x51DEF4
//!
//! [versions."1.02d-us".offsets.object]
//! pid = 0x64
//! ```

use crate::layout::Layout;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUNDLED_LAYOUT: &str = include_str!("../data/layout.toml");

/// Calling convention of a host function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Leading arguments in `eax`, `edx`, `ebx`, `ecx`
    Register,
    /// All arguments pushed right to left, caller cleans up
    Stack,
}

/// Address and calling convention of one host function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSpec {
    /// Entry point in the host image
    pub address: u64,
    /// How arguments are delivered
    pub convention: Convention,
    /// Declared argument count
    pub args: u8,
}

/// Version probe: SHA-256 of a fixed region of host memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSpec {
    /// Start of the hashed region
    pub address: u64,
    /// Length of the hashed region in bytes
    pub len: u64,
    /// Lower-case hex digest
    pub sha256: String,
}

/// Symbol table for one host build
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionTable {
    /// Human-readable build name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeSpec>,

    /// Host functions by symbolic name
    #[serde(default)]
    pub functions: BTreeMap<String, FunctionSpec>,

    /// Host global variables by symbolic name
    #[serde(default)]
    pub variables: BTreeMap<String, u64>,

    /// Record field offsets, keyed by record then field
    #[serde(default)]
    pub offsets: BTreeMap<String, BTreeMap<String, u64>>,

    /// Engine constants (counts, enum values, sizes)
    #[serde(default)]
    pub constants: BTreeMap<String, i64>,
}

impl VersionTable {
    /// Look up the address of a function or global variable by name
    ///
    /// Functions take precedence over variables when a name is defined in both.
    pub fn address_of(&self, name: &str) -> Option<u64> {
        self.functions
            .get(name)
            .map(|f| f.address)
            .or_else(|| self.variables.get(name).copied())
    }

    /// Look up a field offset inside a host record
    pub fn offset_of(&self, record: &str, field: &str) -> Option<u64> {
        self.offsets.get(record)?.get(field).copied()
    }

    /// Look up an engine constant
    pub fn constant(&self, name: &str) -> Option<i64> {
        self.constants.get(name).copied()
    }

    /// Resolve every symbol the runtime needs into a typed layout
    ///
    /// `version` is only used to label the layout and any error.
    pub fn resolve(&self, version: &str) -> ConfigResult<Layout> {
        Layout::resolve(self, version)
    }
}

/// A layout file: one table per host build
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutFile {
    /// Version used when nothing else selects one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Tables by version name
    #[serde(default)]
    pub versions: BTreeMap<String, VersionTable>,
}

impl LayoutFile {
    /// Parse a layout file from TOML text
    ///
    /// `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> ConfigResult<Self> {
        let file: LayoutFile = toml::from_str(text).map_err(|error| ConfigError::TomlParseError {
            origin: origin.to_string(),
            error,
        })?;

        if let Some(default) = &file.default {
            if !file.versions.contains_key(default) {
                return Err(ConfigError::UnknownVersion(default.clone()));
            }
        }

        Ok(file)
    }

    /// Load a layout file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// The table shipped with this crate
    pub fn bundled() -> ConfigResult<Self> {
        Self::parse(BUNDLED_LAYOUT, "<bundled layout>")
    }

    /// Get a version table by name
    pub fn version(&self, name: &str) -> ConfigResult<&VersionTable> {
        self.versions
            .get(name)
            .ok_or_else(|| ConfigError::UnknownVersion(name.to_string()))
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
