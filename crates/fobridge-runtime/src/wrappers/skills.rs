//! Tagged skills

use crate::ffi::HostArg;
use crate::host::Host;

impl Host {
    /// Number of tag slots a transfer of `requested` entries may touch
    fn tag_count(&self, requested: i32, buffer_len: usize) -> usize {
        let slots = usize::try_from(self.layout().constants.tag_skill_slots).unwrap_or(0);
        usize::try_from(requested.max(0))
            .unwrap_or(0)
            .min(slots)
            .min(buffer_len)
    }

    /// Read up to `num` tagged skills into `dst`
    ///
    /// `num` is clamped to the host's tag slot count and to `dst.len()`.
    /// Returns the number of entries written; 0 skips the host call.
    pub fn skill_get_tags(&self, dst: &mut [i32], num: i32) -> usize {
        let count = self.tag_count(num, dst.len());
        if count == 0 {
            return 0;
        }
        let called = unsafe {
            self.call(
                "skill_get_tags",
                self.layout().functions.skill_get_tags,
                &[HostArg::out(dst.as_mut_ptr()), HostArg::Int(count as i32)],
            )
        };
        if called.is_some() {
            count
        } else {
            0
        }
    }

    /// Tag up to `num` skills from `tags`
    ///
    /// Clamped like [`Host::skill_get_tags`]. Returns the number of entries
    /// the host was given.
    pub fn skill_set_tags(&self, tags: &[i32], num: i32) -> usize {
        let count = self.tag_count(num, tags.len());
        if count == 0 {
            return 0;
        }
        let called = unsafe {
            self.call(
                "skill_set_tags",
                self.layout().functions.skill_set_tags,
                &[HostArg::ptr(tags.as_ptr()), HostArg::Int(count as i32)],
            )
        };
        if called.is_some() {
            count
        } else {
            0
        }
    }
}
