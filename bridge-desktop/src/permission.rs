//! In-memory Permission Service
//!
//! Desktop operating systems have no runtime storage grants, so the default
//! service reports version `0` and the negotiator never calls into it. The
//! same type doubles as an emulator for hosts that do: give it an API level
//! and it keeps a grant table, answering batched requests immediately.

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    permission::{Capability, GrantState, OsVersion, PermissionService},
};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

pub struct InMemoryPermissionService {
    os_version: OsVersion,
    granted: Mutex<HashSet<Capability>>,
    grant_on_request: bool,
    requests: Mutex<Vec<Vec<Capability>>>,
}

impl InMemoryPermissionService {
    /// Service for a host without runtime permissions.
    pub fn desktop() -> Self {
        Self::with_version(0)
    }

    /// Service emulating `os_version` with nothing granted yet.
    pub fn with_version(os_version: OsVersion) -> Self {
        Self {
            os_version,
            granted: Mutex::new(HashSet::new()),
            grant_on_request: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pre-grant `capabilities`.
    pub fn with_granted(self, capabilities: &[Capability]) -> Self {
        self.lock_granted().extend(capabilities.iter().copied());
        self
    }

    /// Leave requests unanswered, as if the user denied every prompt.
    pub fn denying_requests(mut self) -> Self {
        self.grant_on_request = false;
        self
    }

    /// Every batch passed to [`PermissionService::request`], in order.
    pub fn requests(&self) -> Vec<Vec<Capability>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_granted(&self) -> std::sync::MutexGuard<'_, HashSet<Capability>> {
        self.granted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryPermissionService {
    fn default() -> Self {
        Self::desktop()
    }
}

#[async_trait]
impl PermissionService for InMemoryPermissionService {
    fn os_version(&self) -> OsVersion {
        self.os_version
    }

    async fn check(&self, capability: Capability) -> Result<GrantState> {
        if self.lock_granted().contains(&capability) {
            Ok(GrantState::Granted)
        } else {
            Ok(GrantState::Denied)
        }
    }

    async fn request(&self, capabilities: &[Capability]) -> Result<()> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(capabilities.to_vec());

        if self.grant_on_request {
            self.lock_granted().extend(capabilities.iter().copied());
        }

        debug!(count = capabilities.len(), granted = self.grant_on_request, "Permission request recorded");
        Ok(())
    }
}
