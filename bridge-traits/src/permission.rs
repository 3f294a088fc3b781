//! Runtime Permission Abstractions
//!
//! Storage capabilities are granted per process by the host OS. Which ones
//! are needed depends on the OS version, so the bridge exposes the version
//! alongside the grant query and the request call.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Platform API level. `0` means the host has no runtime permission model.
pub type OsVersion = u32;

/// Named OS-level permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    ReadMediaImages,
    ReadMediaVideo,
    ReadExternalStorage,
    WriteExternalStorage,
}

impl Capability {
    /// Identifier understood by the host permission API.
    pub fn identifier(&self) -> &'static str {
        match self {
            Capability::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
            Capability::ReadMediaVideo => "android.permission.READ_MEDIA_VIDEO",
            Capability::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            Capability::WriteExternalStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Current grant state of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantState {
    Granted,
    Denied,
}

/// Host permission service trait
///
/// - **Android**: `Build.VERSION.SDK_INT`, `checkSelfPermission`,
///   `requestPermissions`
/// - **iOS / Desktop**: no runtime storage grants; report version `0`
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// OS version of the running host.
    fn os_version(&self) -> OsVersion;

    /// Query the current grant state of `capability`.
    async fn check(&self, capability: Capability) -> Result<GrantState>;

    /// Ask the host to request `capabilities` in one batch.
    ///
    /// Returns once the request has been dispatched. The user's answer is
    /// not reported back through this call.
    async fn request(&self, capabilities: &[Capability]) -> Result<()>;
}
