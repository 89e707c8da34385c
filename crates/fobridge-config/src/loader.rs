//! Layout Loader
//!
//! Reads layout files and picks the table for the running host.

use crate::layout::Layout;
use crate::table::{LayoutFile, ProbeSpec};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::Path;

/// Environment variable naming the host version to use
pub const VERSION_ENV: &str = "FOBRIDGE_HOST_VERSION";

/// Layout loader
///
/// Selects a version with the following precedence:
/// 1. Version requested by the caller - highest priority
/// 2. `FOBRIDGE_HOST_VERSION`
/// 3. First version (in name order) whose probe matches
/// 4. The file's `default` - lowest priority
pub struct LayoutLoader {
    /// Environment variable consulted for overrides
    env_var: &'static str,
}

impl LayoutLoader {
    /// Create a loader reading `FOBRIDGE_HOST_VERSION`
    pub fn new() -> Self {
        Self {
            env_var: VERSION_ENV,
        }
    }

    /// Load a layout file from disk
    pub fn load(&self, path: &Path) -> ConfigResult<LayoutFile> {
        LayoutFile::load_from_file(path)
    }

    /// Load a layout file, falling back to the bundled tables when `path` does not exist
    pub fn load_or_bundled(&self, path: &Path) -> ConfigResult<LayoutFile> {
        if path.exists() {
            self.load(path)
        } else {
            log::debug!(
                "layout file {} not found, using bundled tables",
                path.display()
            );
            LayoutFile::bundled()
        }
    }

    /// Pick a version from `file` and resolve it
    ///
    /// `probe` is asked whether a version's probe region matches the running
    /// host; versions without a probe never match by probing.
    pub fn select(
        &self,
        file: &LayoutFile,
        requested: Option<&str>,
        probe: impl FnMut(&ProbeSpec) -> bool,
    ) -> ConfigResult<Layout> {
        let name = self.select_name(file, requested, probe)?;
        log::debug!("selected host layout '{}'", name);
        file.version(&name)?.resolve(&name)
    }

    /// Pick a version name from `file` without resolving it
    pub fn select_name(
        &self,
        file: &LayoutFile,
        requested: Option<&str>,
        mut probe: impl FnMut(&ProbeSpec) -> bool,
    ) -> ConfigResult<String> {
        if let Some(name) = requested {
            file.version(name)?;
            return Ok(name.to_string());
        }

        if let Ok(name) = env::var(self.env_var) {
            let name = name.trim();
            if !name.is_empty() {
                file.version(name)?;
                return Ok(name.to_string());
            }
        }

        let probed = file
            .versions
            .iter()
            .find(|(_, table)| table.probe.as_ref().is_some_and(&mut probe));
        if let Some((name, _)) = probed {
            return Ok(name.clone());
        }

        file.default
            .clone()
            .ok_or_else(|| ConfigError::NoMatchingVersion {
                requested: requested.map(str::to_string),
                default: file.default.clone(),
            })
    }
}

impl Default for LayoutLoader {
    fn default() -> Self {
        Self::new()
    }
}
