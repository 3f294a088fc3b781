//! # Permission Negotiator
//!
//! Makes sure the process holds the storage capabilities its OS version
//! expects before any document is written.
//!
//! ## Capability table
//!
//! | OS version                          | Band     | Capabilities                                   |
//! |-------------------------------------|----------|------------------------------------------------|
//! | `< runtime_gate` (23)               | none     | granted at install time                        |
//! | `runtime_gate ..< media_gate` (33)  | `Legacy` | read-external-storage, write-external-storage  |
//! | `>= media_gate`                     | `Modern` | read-media-images, read-media-video            |
//!
//! When any capability of the band is missing, the whole band is requested in
//! one batch. The user's answer is not awaited: a denial surfaces later as a
//! failed write.

use std::sync::Arc;

use bridge_traits::{Capability, GrantState, OsVersion, PermissionService};
use core_runtime::config::PermissionPolicy;
use core_runtime::events::{EventBus, ExportEvent};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Group of capabilities required together for an OS version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermissionBand {
    /// Runtime-gated versions before the media permission split
    Legacy,
    /// Versions with granular media permissions
    Modern,
}

impl PermissionBand {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            PermissionBand::Legacy => &[
                Capability::ReadExternalStorage,
                Capability::WriteExternalStorage,
            ],
            PermissionBand::Modern => &[Capability::ReadMediaImages, Capability::ReadMediaVideo],
        }
    }
}

/// Band required on `version`, or `None` when grants happen at install time.
pub fn required_band(policy: &PermissionPolicy, version: OsVersion) -> Option<PermissionBand> {
    if version < policy.runtime_gate {
        None
    } else if version < policy.media_gate {
        Some(PermissionBand::Legacy)
    } else {
        Some(PermissionBand::Modern)
    }
}

/// What [`PermissionNegotiator::ensure_permissions`] did.
///
/// Purely informational; nothing in the export protocol depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermissionOutcome {
    /// The OS grants storage access at install time.
    NotRequired,
    /// Every capability of the band was already granted.
    AlreadyGranted(PermissionBand),
    /// The band was requested from the host.
    Requested(PermissionBand),
    /// The host refused to dispatch the request.
    RequestFailed(PermissionBand),
}

pub struct PermissionNegotiator {
    service: Arc<dyn PermissionService>,
    policy: PermissionPolicy,
    events: EventBus,
}

impl PermissionNegotiator {
    pub fn new(
        service: Arc<dyn PermissionService>,
        policy: PermissionPolicy,
        events: EventBus,
    ) -> Self {
        Self {
            service,
            policy,
            events,
        }
    }

    /// Request the storage capabilities of the running OS version if any is
    /// missing.
    ///
    /// Never fails: bridge errors are logged and a failed grant check counts
    /// as "not granted".
    pub async fn ensure_permissions(&self) -> PermissionOutcome {
        let version = self.service.os_version();

        let Some(band) = required_band(&self.policy, version) else {
            debug!(os_version = version, "Storage permissions granted at install time");
            return PermissionOutcome::NotRequired;
        };

        if self.band_granted(band).await {
            debug!(os_version = version, band = ?band, "Storage permissions already granted");
            return PermissionOutcome::AlreadyGranted(band);
        }

        let capabilities = band.capabilities();
        match self.service.request(capabilities).await {
            Ok(()) => {
                info!(os_version = version, band = ?band, "Requested storage permissions");
                self.events.emit(ExportEvent::PermissionsRequested {
                    capabilities: capabilities
                        .iter()
                        .map(|c| c.identifier().to_string())
                        .collect(),
                });
                PermissionOutcome::Requested(band)
            }
            Err(e) => {
                warn!(os_version = version, band = ?band, error = %e, "Permission request could not be dispatched");
                PermissionOutcome::RequestFailed(band)
            }
        }
    }

    async fn band_granted(&self, band: PermissionBand) -> bool {
        for capability in band.capabilities() {
            match self.service.check(*capability).await {
                Ok(GrantState::Granted) => continue,
                Ok(GrantState::Denied) => return false,
                Err(e) => {
                    warn!(capability = %capability, error = %e, "Grant check failed");
                    return false;
                }
            }
        }
        true
    }
}
