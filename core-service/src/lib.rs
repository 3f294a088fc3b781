//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (document picker,
//! content resolver, permission service) into the export core. Desktop apps
//! typically enable the `desktop-shims` feature (which depends on
//! `bridge-desktop`), whereas mobile hosts inject their own bridges through
//! [`ExportConfig`].
//!
//! Hosts that speak the plugin protocol call [`CoreService::dispatch`] with a
//! method name and JSON arguments; see [`plugin`].

pub mod error;
pub mod plugin;

pub use error::{CoreError, Result};
pub use plugin::{PluginRejection, PLUGIN_NAME};

pub use core_export::{
    ErrorCode, ExportError, ExportRequest, PermissionBand, PermissionOutcome, TargetHandle,
    WriteRequest,
};
pub use core_runtime::config::{ExportConfig, ExportConfigBuilder, PermissionPolicy};
pub use core_runtime::events::{EventBus, ExportEvent};

use std::sync::Arc;

use core_export::{ExportSession, PermissionNegotiator};
use tokio::sync::{broadcast, OnceCell};
use tracing::info;

struct Inner {
    session: ExportSession,
    negotiator: PermissionNegotiator,
    permissions: OnceCell<PermissionOutcome>,
    events: EventBus,
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    inner: Arc<Inner>,
}

impl CoreService {
    /// Create a new service from a validated configuration.
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;

        let events = EventBus::new(config.event_buffer_size);
        let session = ExportSession::from_config(&config, events.clone());
        let negotiator = PermissionNegotiator::new(
            config.permission_service.clone(),
            config.permission_policy,
            events.clone(),
        );

        Ok(Self {
            inner: Arc::new(Inner {
                session,
                negotiator,
                permissions: OnceCell::new(),
                events,
            }),
        })
    }

    /// Negotiate storage permissions.
    ///
    /// Hosts call this when the plugin is loaded. Only the first call talks to
    /// the permission bridge; later calls return the recorded outcome.
    pub async fn start(&self) -> PermissionOutcome {
        *self
            .inner
            .permissions
            .get_or_init(|| async {
                let outcome = self.inner.negotiator.ensure_permissions().await;
                info!(outcome = ?outcome, "Export service started");
                outcome
            })
            .await
    }

    /// Outcome of [`start`](Self::start), if it has run.
    pub fn permission_outcome(&self) -> Option<PermissionOutcome> {
        self.inner.permissions.get().copied()
    }

    pub async fn create_target(
        &self,
        request: ExportRequest,
    ) -> core_export::Result<TargetHandle> {
        self.inner.session.create_target(request).await
    }

    pub async fn write_target(&self, request: WriteRequest) -> core_export::Result<()> {
        self.inner.session.write_target(request).await
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExportEvent> {
        self.inner.events.subscribe()
    }

    /// Number of create-target calls waiting on the picker.
    pub fn pending_picks(&self) -> usize {
        self.inner.session.pending_picks()
    }

    /// Tear the service down. Waiting create-target calls resolve `Canceled`.
    pub fn shutdown(&self) {
        let canceled = self.inner.session.close();
        info!(canceled, "Export service shut down");
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// Wires the `bridge-desktop` defaults with documents created under
/// `export_dir`, then negotiates permissions.
///
/// ```no_run
/// # #[cfg(feature = "desktop-shims")]
/// # async fn example() -> core_service::Result<()> {
/// use core_service::{bootstrap_desktop, ExportRequest};
///
/// let core = bootstrap_desktop("/tmp/exports").await?;
/// let handle = core.create_target(ExportRequest::named("notes.txt")).await.ok();
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub async fn bootstrap_desktop(export_dir: impl Into<std::path::PathBuf>) -> Result<CoreService> {
    let picker = bridge_desktop::DesktopDocumentPicker::with_directory(export_dir.into());
    let config = ExportConfig::builder()
        .document_picker(Arc::new(picker))
        .build()
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;

    let core = CoreService::new(config)?;
    core.start().await;
    Ok(core)
}
