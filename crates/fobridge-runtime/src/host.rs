//! Host installation
//!
//! A [`Host`] pairs a resolved [`Layout`] with the promise that it describes
//! the process we are running in. All wrappers hang off it. One host can be
//! installed process-wide; after that the layout never changes.

use crate::error::{BridgeError, BridgeResult};
use crate::ffi::{CallError, HostArg, HostFunction, HostValue};
use crate::view::{self, ObjectHandle, ObjectView, TileNodeView};
use fobridge_config::{FunctionAddr, Layout, LayoutLoader, ProbeSpec};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::OnceLock;

static HOST: OnceLock<Host> = OnceLock::new();

/// The running host as seen through one layout
#[derive(Debug)]
pub struct Host {
    layout: Layout,
}

impl Host {
    /// Build a host context from a resolved layout
    ///
    /// Function signatures are checked here so that a bad table fails now
    /// rather than on first use.
    ///
    /// # Safety
    ///
    /// Every address and offset in `layout` must be correct for the current
    /// process. A wrong table is undefined behaviour on first use.
    pub unsafe fn new(layout: Layout) -> BridgeResult<Self> {
        let host = Self { layout };
        host.check_signatures()?;
        Ok(host)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn version(&self) -> &str {
        &self.layout.version
    }

    fn check_signatures(&self) -> BridgeResult<()> {
        let f = &self.layout.functions;
        let expected: [(&'static str, FunctionAddr, usize); 15] = [
            ("display_print", f.display_print, 1),
            ("proto_ptr", f.proto_ptr, 2),
            ("skill_get_tags", f.skill_get_tags, 2),
            ("skill_set_tags", f.skill_set_tags, 2),
            ("inven_left_hand", f.inven_left_hand, 1),
            ("inven_right_hand", f.inven_right_hand, 1),
            ("inven_worn", f.inven_worn, 1),
            ("item_get_type", f.item_get_type, 1),
            ("stat_level", f.stat_level, 2),
            ("scr_ptr", f.scr_ptr, 2),
            ("obj_bound", f.obj_bound, 2),
            ("tile_refresh_rect", f.tile_refresh_rect, 2),
            ("gnw_find", f.gnw_find, 1),
            ("gnw_win_refresh", f.gnw_win_refresh, 3),
            ("wm_find_cur_sub_tile", f.wm_find_cur_sub_tile, 3),
        ];

        for (symbol, spec, args) in expected {
            if spec.args != args {
                return Err(BridgeError::SignatureMismatch {
                    symbol,
                    expected: args,
                    declared: spec.args,
                });
            }
            let function = unsafe { HostFunction::new(spec) };
            function
                .check_shape()
                .map_err(|e| BridgeError::UncallableFunction {
                    symbol,
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Compare the probe region with the layout's digest
    ///
    /// Layouts without a probe pass with a warning.
    pub fn verify_probe(&self) -> BridgeResult<()> {
        let Some(probe) = &self.layout.probe else {
            log::warn!(
                "host layout '{}' has no probe; trusting it unverified",
                self.layout.version
            );
            return Ok(());
        };

        let actual = unsafe { region_digest(probe.address, probe.len) };
        if actual != probe.sha256 {
            return Err(BridgeError::ProbeMismatch {
                version: self.layout.version.clone(),
                expected: probe.sha256.clone(),
                actual,
            });
        }
        log::debug!("host layout '{}' probe matched", self.layout.version);
        Ok(())
    }

    /// Call a host function from the layout
    ///
    /// Shape errors were ruled out in [`Host::new`]; if one still shows up
    /// it is logged and `None` is returned.
    ///
    /// # Safety
    ///
    /// Pointer arguments must be valid for what the host function does with
    /// them.
    pub(crate) unsafe fn call(
        &self,
        symbol: &'static str,
        spec: FunctionAddr,
        args: &[HostArg],
    ) -> Option<HostValue> {
        Self::report(symbol, HostFunction::new(spec).call(args))
    }

    /// Call a host function through a pointer stored in a host variable
    ///
    /// Returns `None` when the variable holds null.
    ///
    /// # Safety
    ///
    /// See [`Host::call`]; the variable must hold a function with the given
    /// arity and the register convention.
    pub(crate) unsafe fn call_pointer(
        &self,
        symbol: &'static str,
        variable: usize,
        args: &[HostArg],
    ) -> Option<HostValue> {
        let target: usize = view::read_global(variable);
        if target == 0 {
            return None;
        }
        let function =
            HostFunction::from_pointer(target, fobridge_config::Convention::Register, args.len());
        Self::report(symbol, function.call(args))
    }

    fn report(symbol: &'static str, result: Result<HostValue, CallError>) -> Option<HostValue> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("call to host function '{}' failed: {}", symbol, e);
                None
            }
        }
    }

    /// View of a live object
    pub fn object(&self, handle: ObjectHandle) -> ObjectView<'_> {
        // Handles are only built from live addresses.
        unsafe { ObjectView::new(handle, &self.layout.object) }
    }

    /// Head node of the object list on `tile`
    pub(crate) fn tile_list(&self, tile: usize) -> Option<TileNodeView<'_>> {
        if tile >= self.layout.tile_count() {
            return None;
        }
        unsafe {
            let head: usize = view::RawView::new(self.layout.variables.object_table)?
                .read_indexed::<usize>(0, tile);
            TileNodeView::new(head, &self.layout.tile_node)
        }
    }

    /// Whether `handle` is still on the host's map
    ///
    /// Scans the object table for the address without dereferencing the
    /// handle, so stale handles are safe to test. Objects that are not on
    /// the map (inventory contents) report `false`.
    pub fn is_live(&self, handle: ObjectHandle) -> bool {
        (0..self.layout.tile_count()).any(|tile| {
            let mut node = self.tile_list(tile);
            while let Some(current) = node {
                if current.object() == handle.addr() {
                    return true;
                }
                node = current.next();
            }
            false
        })
    }
}

/// SHA-256 of `len` bytes at `address`, lower-case hex
///
/// # Safety
///
/// The region must be readable.
pub unsafe fn region_digest(address: usize, len: usize) -> String {
    let bytes = std::slice::from_raw_parts(address as *const u8, len);
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Whether a table's probe matches the running process
///
/// # Safety
///
/// The probe region must be readable.
pub unsafe fn probe_matches(spec: &ProbeSpec) -> bool {
    let (Ok(address), Ok(len)) = (usize::try_from(spec.address), usize::try_from(spec.len)) else {
        return false;
    };
    region_digest(address, len).eq_ignore_ascii_case(&spec.sha256)
}

/// Install `layout` as the process-wide host
///
/// Verifies the probe, then stores the host for [`installed`]. A second
/// install fails with [`BridgeError::AlreadyInstalled`].
///
/// # Safety
///
/// See [`Host::new`].
pub unsafe fn install(layout: Layout) -> BridgeResult<&'static Host> {
    if let Some(existing) = HOST.get() {
        return Err(BridgeError::AlreadyInstalled(existing.version().to_string()));
    }

    let host = Host::new(layout)?;
    host.verify_probe()?;

    let version = host.version().to_string();
    if HOST.set(host).is_err() {
        return Err(BridgeError::AlreadyInstalled(
            installed().map(|h| h.version().to_string()).unwrap_or_default(),
        ));
    }
    log::info!("installed host layout '{}'", version);
    installed().ok_or(BridgeError::AlreadyInstalled(version))
}

/// Load a layout file (or the bundled tables), pick a version and install it
///
/// Version choice follows [`LayoutLoader::select`]; probes are checked
/// against this process.
///
/// # Safety
///
/// See [`Host::new`]. Probe regions of every table in the file must be
/// readable.
pub unsafe fn install_from_file(path: &Path, requested: Option<&str>) -> BridgeResult<&'static Host> {
    let loader = LayoutLoader::new();
    let file = loader.load_or_bundled(path)?;
    let layout = loader.select(&file, requested, |spec| probe_matches(spec))?;
    install(layout)
}

/// The installed host, if any
pub fn installed() -> Option<&'static Host> {
    HOST.get()
}
