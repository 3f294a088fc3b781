//! # Export Configuration Module
//!
//! Provides configuration management for the export core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct an
//! `ExportConfig` holding the host bridges and the protocol defaults. It fails
//! fast when a bridge is missing so that misconfigured hosts are caught at
//! startup rather than on the first export.
//!
//! ## Bridges
//!
//! - `DocumentPicker` - create-document round trip
//! - `ContentResolver` - write-truncate streams for picked locators
//! - `PermissionService` - OS version and storage grants
//!
//! When the `desktop-shims` feature is enabled, `bridge-desktop` defaults are
//! injected for any bridge that was not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ExportConfig;
//! use std::sync::Arc;
//!
//! let config = ExportConfig::builder()
//!     .document_picker(Arc::new(MyPicker))
//!     .content_resolver(Arc::new(MyResolver))
//!     .permission_service(Arc::new(MyPermissions))
//!     .default_file_name("backup.json")
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{ContentResolver, DocumentPicker, OsVersion, PermissionService};
use std::sync::Arc;

/// Suggested document name when the caller gives none.
pub const DEFAULT_FILE_NAME: &str = "export.json";

/// MIME type when the caller gives none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// First OS version that grants storage permissions at runtime (Android 6.0).
pub const DEFAULT_RUNTIME_GATE: OsVersion = 23;

/// First OS version that replaced storage permissions with media ones (Android 13).
pub const DEFAULT_MEDIA_GATE: OsVersion = 33;

const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// OS version thresholds for the permission capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionPolicy {
    /// Versions below this grant everything at install time
    pub runtime_gate: OsVersion,
    /// Versions at or above this use the media capabilities
    pub media_gate: OsVersion,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            runtime_gate: DEFAULT_RUNTIME_GATE,
            media_gate: DEFAULT_MEDIA_GATE,
        }
    }
}

/// Export core configuration.
///
/// Use [`ExportConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ExportConfig {
    pub default_file_name: String,
    pub default_mime_type: String,
    pub permission_policy: PermissionPolicy,
    /// Per-subscriber buffer of the export event bus
    pub event_buffer_size: usize,
    pub document_picker: Arc<dyn DocumentPicker>,
    pub content_resolver: Arc<dyn ContentResolver>,
    pub permission_service: Arc<dyn PermissionService>,
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("default_file_name", &self.default_file_name)
            .field("default_mime_type", &self.default_mime_type)
            .field("permission_policy", &self.permission_policy)
            .field("event_buffer_size", &self.event_buffer_size)
            .field("document_picker", &"DocumentPicker { ... }")
            .field("content_resolver", &"ContentResolver { ... }")
            .field(
                "permission_service",
                &format!(
                    "PermissionService {{ os_version: {} }}",
                    self.permission_service.os_version()
                ),
            )
            .finish()
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Checks that both defaults are non-empty, the media gate does not
    /// precede the runtime gate, and the event buffer can hold an event.
    pub fn validate(&self) -> Result<()> {
        if self.default_file_name.trim().is_empty() {
            return Err(Error::Config(
                "Default file name cannot be empty".to_string(),
            ));
        }

        if self.default_mime_type.trim().is_empty() {
            return Err(Error::Config(
                "Default MIME type cannot be empty".to_string(),
            ));
        }

        if self.permission_policy.media_gate < self.permission_policy.runtime_gate {
            return Err(Error::Config(format!(
                "Media permission gate ({}) must not precede the runtime permission gate ({})",
                self.permission_policy.media_gate, self.permission_policy.runtime_gate
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn capability_missing(capability: &str, purpose: &str, mobile_hint: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{} implementation is required for {}. \
             Desktop: enable the 'desktop-shims' feature to use the bridge-desktop default. \
             Mobile: inject {}.",
            capability, purpose, mobile_hint
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_picker() -> Result<Arc<dyn DocumentPicker>> {
    Ok(Arc::new(bridge_desktop::DesktopDocumentPicker::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_picker() -> Result<Arc<dyn DocumentPicker>> {
    Err(capability_missing(
        "DocumentPicker",
        "creating export targets",
        "a picker backed by ACTION_CREATE_DOCUMENT / UIDocumentPickerViewController",
    ))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_resolver() -> Result<Arc<dyn ContentResolver>> {
    Ok(Arc::new(bridge_desktop::TokioContentResolver::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_resolver() -> Result<Arc<dyn ContentResolver>> {
    Err(capability_missing(
        "ContentResolver",
        "writing to picked documents",
        "the platform content resolver",
    ))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_permissions() -> Result<Arc<dyn PermissionService>> {
    Ok(Arc::new(bridge_desktop::InMemoryPermissionService::desktop()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_permissions() -> Result<Arc<dyn PermissionService>> {
    Err(capability_missing(
        "PermissionService",
        "storage permission negotiation",
        "the platform permission API",
    ))
}

/// Builder for [`ExportConfig`].
#[derive(Default)]
pub struct ExportConfigBuilder {
    default_file_name: Option<String>,
    default_mime_type: Option<String>,
    permission_policy: Option<PermissionPolicy>,
    event_buffer_size: Option<usize>,
    document_picker: Option<Arc<dyn DocumentPicker>>,
    content_resolver: Option<Arc<dyn ContentResolver>>,
    permission_service: Option<Arc<dyn PermissionService>>,
}

impl ExportConfigBuilder {
    /// Sets the suggested document name used when a request carries none.
    ///
    /// Default: `export.json`
    pub fn default_file_name(mut self, name: impl Into<String>) -> Self {
        self.default_file_name = Some(name.into());
        self
    }

    /// Sets the MIME type used when a request carries none.
    ///
    /// Default: `application/octet-stream`
    pub fn default_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.default_mime_type = Some(mime_type.into());
        self
    }

    pub fn permission_policy(mut self, policy: PermissionPolicy) -> Self {
        self.permission_policy = Some(policy);
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    pub fn document_picker(mut self, picker: Arc<dyn DocumentPicker>) -> Self {
        self.document_picker = Some(picker);
        self
    }

    pub fn content_resolver(mut self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.content_resolver = Some(resolver);
        self
    }

    pub fn permission_service(mut self, service: Arc<dyn PermissionService>) -> Self {
        self.permission_service = Some(service);
        self
    }

    /// Builds the final `ExportConfig`.
    ///
    /// Missing bridges are filled from `bridge-desktop` when the
    /// `desktop-shims` feature is enabled, otherwise they fail with
    /// [`Error::CapabilityMissing`].
    pub fn build(self) -> Result<ExportConfig> {
        let document_picker = match self.document_picker {
            Some(picker) => picker,
            None => provide_default_picker()?,
        };

        let content_resolver = match self.content_resolver {
            Some(resolver) => resolver,
            None => provide_default_resolver()?,
        };

        let permission_service = match self.permission_service {
            Some(service) => service,
            None => provide_default_permissions()?,
        };

        let config = ExportConfig {
            default_file_name: self
                .default_file_name
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            default_mime_type: self
                .default_mime_type
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            permission_policy: self.permission_policy.unwrap_or_default(),
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
            document_picker,
            content_resolver,
            permission_service,
        };

        config.validate()?;

        Ok(config)
    }
}
