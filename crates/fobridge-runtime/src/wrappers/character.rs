//! Player character and script state

use crate::ffi::HostArg;
use crate::host::Host;
use crate::view::{read_global, ObjectHandle, ScriptRef, ScriptView};

impl Host {
    /// The player character, `None` before a game is loaded
    pub fn dude(&self) -> Option<ObjectHandle> {
        unsafe { ObjectHandle::from_addr(read_global(self.layout().variables.obj_dude)) }
    }

    /// Stat value as the host computes it, 0 if the call fails
    pub fn stat_level(&self, critter: ObjectHandle, stat: i32) -> i32 {
        unsafe {
            self.call(
                "stat_level",
                self.layout().functions.stat_level,
                &[HostArg::Ptr(critter.addr()), HostArg::Int(stat)],
            )
        }
        .map_or(0, |value| value.as_i32())
    }

    pub fn hero_is_female(&self) -> bool {
        let Some(dude) = self.dude() else {
            return false;
        };
        let constants = &self.layout().constants;
        i64::from(self.stat_level(dude, constants.stat_gender as i32)) == constants.gender_female
    }

    /// Script instance for script id `sid`
    pub fn script(&self, sid: i32) -> Option<ScriptRef> {
        let mut out: usize = 0;
        let result = unsafe {
            self.call(
                "scr_ptr",
                self.layout().functions.scr_ptr,
                &[HostArg::Int(sid), HostArg::out(&mut out as *mut usize)],
            )?
        };
        if result.is_minus_one() {
            return None;
        }
        unsafe { ScriptRef::from_addr(out) }
    }

    /// Number of local variables of script `sid`, 0 when it does not resolve
    pub fn script_local_vars(&self, sid: i32) -> i32 {
        self.script(sid)
            .map_or(0, |script| unsafe { ScriptView::new(script, &self.layout().script) }.num_local_vars())
    }
}
