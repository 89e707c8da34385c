//! Party membership

use crate::host::Host;
use crate::view::{read_global, ObjectHandle};

impl Host {
    /// 1-based position of `pid` in the party roster, 0 when absent
    pub fn party_member_index(&self, pid: i32) -> i32 {
        let variables = &self.layout().variables;
        let (count, list) = unsafe {
            (
                read_global::<i32>(variables.party_member_max_count),
                read_global::<usize>(variables.party_member_pid_list),
            )
        };
        if count <= 0 || list == 0 {
            return 0;
        }

        (0..count as usize)
            .find(|&index| unsafe { read_global::<i32>(list + index * 4) } == pid)
            .map_or(0, |index| index as i32 + 1)
    }

    /// Whether `object` is one of the player's potential party members
    ///
    /// Map-placed objects have ids below the host's player id; only the
    /// player and party NPCs are numbered from it upward. An object passes
    /// when its id is in that range and its PID is on the roster.
    pub fn is_party_member(&self, object: ObjectHandle) -> bool {
        let view = self.object(object);
        i64::from(view.id()) >= self.layout().constants.player_id
            && self.party_member_index(view.pid()) > 0
    }
}
