//! # Export Session
//!
//! Drives the two-step export protocol:
//!
//! 1. [`create_target`](ExportSession::create_target) hands a create-document
//!    intent to the host picker and suspends until the user confirms or
//!    dismisses it. The result is a [`TargetHandle`] or `Canceled`.
//! 2. [`write_target`](ExportSession::write_target) opens the target
//!    write-truncate and writes the payload as UTF-8, then flushes and closes.
//!
//! Any number of create-target calls may be outstanding at once; each owns
//! its own pick registration, so results are never crossed between callers.
//!
//! ## Teardown
//!
//! [`close`](ExportSession::close) (or dropping the session) resolves every
//! waiting caller with `Canceled`. Completers fired afterwards are ignored.

use std::sync::Arc;

use bridge_traits::{
    ContentResolver, CreateDocumentIntent, DocumentPicker, PickCompleter, PickSink, PickerResult,
};
use bytes::Bytes;
use core_runtime::config::ExportConfig;
use core_runtime::events::{EventBus, ExportEvent};
use core_runtime::logging::redact_locator;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::error::{ExportError, Result};
use crate::pending::{PendingGuard, PendingPicks};
use crate::types::{ExportRequest, TargetHandle, WriteRequest};

pub struct ExportSession {
    picker: Arc<dyn DocumentPicker>,
    resolver: Arc<dyn ContentResolver>,
    default_file_name: String,
    default_mime_type: String,
    picks: Arc<PendingPicks>,
    events: EventBus,
}

impl ExportSession {
    pub fn new(
        picker: Arc<dyn DocumentPicker>,
        resolver: Arc<dyn ContentResolver>,
        default_file_name: impl Into<String>,
        default_mime_type: impl Into<String>,
        events: EventBus,
    ) -> Self {
        Self {
            picker,
            resolver,
            default_file_name: default_file_name.into(),
            default_mime_type: default_mime_type.into(),
            picks: Arc::new(PendingPicks::new()),
            events,
        }
    }

    pub fn from_config(config: &ExportConfig, events: EventBus) -> Self {
        Self::new(
            config.document_picker.clone(),
            config.content_resolver.clone(),
            config.default_file_name.clone(),
            config.default_mime_type.clone(),
            events,
        )
    }

    /// Ask the user to create a new document and return its handle.
    ///
    /// Absent or empty name and MIME type fall back to the session defaults.
    ///
    /// # Errors
    ///
    /// [`ExportError::Canceled`] if the picker was dismissed, returned no
    /// locator, could not be launched, or the session was closed while
    /// waiting.
    #[instrument(skip(self, request))]
    pub async fn create_target(&self, request: ExportRequest) -> Result<TargetHandle> {
        let (file_name, mime_type) =
            request.resolve(&self.default_file_name, &self.default_mime_type);

        let Some((id, receiver)) = self.picks.register() else {
            debug!("Session closed, refusing new pick");
            return self.canceled();
        };
        let _guard = PendingGuard::new(self.picks.clone(), id.clone());

        let sink: Arc<dyn PickSink> = self.picks.clone();
        let completer = PickCompleter::new(id.clone(), Arc::downgrade(&sink));
        let intent = CreateDocumentIntent::new(file_name.clone(), mime_type.clone());

        debug!(pick_id = %id, file_name = %file_name, mime_type = %mime_type, "Launching document picker");
        self.events.emit(ExportEvent::PickStarted {
            file_name,
            mime_type,
        });

        if let Err(e) = self.picker.launch(intent, completer).await {
            warn!(pick_id = %id, error = %e, "Document picker could not be launched");
            return self.canceled();
        }

        let result = match receiver.await {
            Ok(result) => result,
            Err(_) => {
                debug!(pick_id = %id, "Session closed while picker was open");
                return self.canceled();
            }
        };

        self.target_from(result)
    }

    fn target_from(&self, result: PickerResult) -> Result<TargetHandle> {
        match result.locator() {
            Some(locator) => {
                info!(locator = %redact_locator(locator), "Export target created");
                let handle = TargetHandle::from_locator(locator);
                self.events.emit(ExportEvent::TargetCreated {
                    locator: handle.as_str().to_string(),
                });
                Ok(handle)
            }
            None => {
                debug!(code = ?result.code, "Picker returned without a document");
                self.canceled()
            }
        }
    }

    fn canceled<T>(&self) -> Result<T> {
        self.events.emit(ExportEvent::PickCanceled);
        Err(ExportError::Canceled)
    }

    /// Replace the content of the target with `payload` encoded as UTF-8.
    ///
    /// The handle is checked before the payload, and both before the host is
    /// contacted. An empty payload truncates the document.
    ///
    /// # Errors
    ///
    /// - [`ExportError::MissingUri`] if the handle is absent or empty
    /// - [`ExportError::MissingData`] if the payload is absent
    /// - [`ExportError::FileNotCreated`] if the host cannot open the target
    /// - [`ExportError::WriteFailed`] if writing, flushing or closing fails
    #[instrument(skip(self, request))]
    pub async fn write_target(&self, request: WriteRequest) -> Result<()> {
        let result = self.write_payload(request).await;
        if let Err(e) = &result {
            warn!(code = %e.code(), error = %e, "Export write rejected");
            self.events.emit(ExportEvent::WriteFailed {
                code: e.code().to_string(),
            });
        }
        result
    }

    async fn write_payload(&self, request: WriteRequest) -> Result<()> {
        let locator = match request.handle {
            Some(handle) if !handle.is_empty() => handle,
            _ => return Err(ExportError::MissingUri),
        };
        let payload = Bytes::from(request.payload.ok_or(ExportError::MissingData)?);

        let mut stream = self
            .resolver
            .open_output_stream(&locator)
            .await
            .map_err(|source| ExportError::FileNotCreated { source })?;

        stream
            .write_all(&payload)
            .await
            .map_err(ExportError::write_failed)?;
        stream.flush().await.map_err(ExportError::write_failed)?;
        stream.shutdown().await.map_err(ExportError::write_failed)?;

        info!(locator = %redact_locator(&locator), bytes = payload.len(), "Export written");
        self.events.emit(ExportEvent::WriteCompleted {
            locator,
            bytes: payload.len(),
        });
        Ok(())
    }

    /// Number of create-target calls waiting on the picker.
    pub fn pending_picks(&self) -> usize {
        self.picks.len()
    }

    /// Tear the session down.
    ///
    /// Waiting create-target calls resolve `Canceled`; new ones are refused.
    /// Returns the number of callers that were waiting.
    pub fn close(&self) -> usize {
        self.picks.close()
    }
}

impl Drop for ExportSession {
    fn drop(&mut self) {
        self.picks.close();
    }
}
