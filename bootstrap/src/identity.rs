//! Host identity written into the environment file

use crate::error::Result;
use nix::unistd::{geteuid, Uid, User};
use tracing::debug;

/// Group id handed to containers; always root's group
pub const CONTAINER_GID: u32 = 0;

/// Numeric identity of the invoking user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostIdentity {
    pub uid: u32,
    pub gid: u32,
}

impl HostIdentity {
    /// Capture the effective uid of this process. The gid is fixed.
    pub fn current() -> Self {
        Self::from_uid(geteuid().as_raw())
    }

    pub fn from_uid(uid: u32) -> Self {
        HostIdentity {
            uid,
            gid: CONTAINER_GID,
        }
    }

    /// Login name for the uid, if the password database knows it
    pub fn user_name(&self) -> Result<Option<String>> {
        let user = User::from_uid(Uid::from_raw(self.uid))?;
        debug!("uid {} resolves to {:?}", self.uid, user.as_ref().map(|u| &u.name));
        Ok(user.map(|u| u.name))
    }
}
