//! Document Picker Abstractions
//!
//! The host owns the document picker UI. The core hands it a
//! [`CreateDocumentIntent`] together with a [`PickCompleter`] and then waits;
//! the host fires the completer whenever the user confirms or dismisses the
//! picker, possibly much later and from an arbitrary thread.
//!
//! - **Android**: `ACTION_CREATE_DOCUMENT` activity result
//! - **iOS**: `UIDocumentPickerViewController` in export mode
//! - **Desktop**: native save dialog, or a directory-backed picker
//!
//! # Example
//!
//! ```ignore
//! use bridge_traits::picker::{CreateDocumentIntent, DocumentPicker, PickCompleter, PickerResult};
//!
//! struct ActivityPicker { /* JNI handles */ }
//!
//! #[async_trait::async_trait]
//! impl DocumentPicker for ActivityPicker {
//!     async fn launch(&self, intent: CreateDocumentIntent, completer: PickCompleter) -> Result<()> {
//!         // start the activity, stash `completer` until onActivityResult fires
//!         Ok(())
//!     }
//! }
//!
//! // later, from the activity-result callback:
//! completer.complete(PickerResult::selected("content://downloads/document/42"));
//! ```

use std::fmt;
use std::sync::Weak;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Picker action requested by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentAction {
    /// Let the user name and place a new writable document.
    CreateDocument,
}

/// Category constraint attached to the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    /// Only documents that can be opened as a byte stream.
    Openable,
}

/// Request dispatched to the host picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentIntent {
    pub action: DocumentAction,
    pub categories: Vec<DocumentCategory>,
    pub mime_type: String,
    /// Suggested file name shown in the picker
    pub title: String,
}

impl CreateDocumentIntent {
    /// Intent for an openable, writable document of the given type.
    pub fn new(title: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            action: DocumentAction::CreateDocument,
            categories: vec![DocumentCategory::Openable],
            mime_type: mime_type.into(),
            title: title.into(),
        }
    }
}

/// Result code reported by the host alongside the picker data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickResultCode {
    Ok,
    Canceled,
}

/// Result envelope returned by the host picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerResult {
    pub code: PickResultCode,
    /// Locator of the created document, if any
    pub data: Option<String>,
}

impl PickerResult {
    /// The user confirmed the picker and the host created `locator`.
    pub fn selected(locator: impl Into<String>) -> Self {
        Self {
            code: PickResultCode::Ok,
            data: Some(locator.into()),
        }
    }

    /// The picker was dismissed without a selection.
    pub fn canceled() -> Self {
        Self {
            code: PickResultCode::Canceled,
            data: None,
        }
    }

    /// Returns the selected locator when the envelope carries one.
    ///
    /// Only the data field is consulted. Some hosts report a non-OK code
    /// together with a usable document, and an OK code with no data is still
    /// a cancellation.
    pub fn locator(&self) -> Option<&str> {
        self.data.as_deref().filter(|uri| !uri.is_empty())
    }
}

/// Identifier of one outstanding picker interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickId(pub String);

impl PickId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for PickId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receiving side of picker results, implemented by the core.
pub trait PickSink: Send + Sync {
    /// Route `result` to whoever is waiting on `id`.
    ///
    /// Returns `false` when nobody is waiting any more.
    fn deliver(&self, id: &PickId, result: PickerResult) -> bool;
}

/// Single-shot handle the host uses to report the picker outcome.
///
/// The completer only holds a weak reference to the waiting session, so
/// firing it after the session was torn down is a no-op.
pub struct PickCompleter {
    id: PickId,
    sink: Weak<dyn PickSink>,
}

impl PickCompleter {
    pub fn new(id: PickId, sink: Weak<dyn PickSink>) -> Self {
        Self { id, sink }
    }

    pub fn id(&self) -> &PickId {
        &self.id
    }

    /// Report the picker outcome. Consumes the completer.
    ///
    /// Returns `true` if a waiting caller received the result.
    pub fn complete(self, result: PickerResult) -> bool {
        match self.sink.upgrade() {
            Some(sink) => sink.deliver(&self.id, result),
            None => false,
        }
    }

    /// Shorthand for `complete(PickerResult::canceled())`.
    pub fn cancel(self) -> bool {
        self.complete(PickerResult::canceled())
    }
}

impl fmt::Debug for PickCompleter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickCompleter")
            .field("id", &self.id)
            .field("attached", &(self.sink.strong_count() > 0))
            .finish()
    }
}

/// Host document picker trait
///
/// `launch` must return as soon as the picker has been dispatched. It must not
/// wait for the user; the outcome travels back through the completer.
#[async_trait]
pub trait DocumentPicker: Send + Sync {
    /// Dispatch `intent` to the host picker.
    ///
    /// An `Err` means the picker could not be shown at all; the completer is
    /// dropped in that case and never fires.
    async fn launch(&self, intent: CreateDocumentIntent, completer: PickCompleter) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSink {
        received: Mutex<HashMap<PickId, PickerResult>>,
    }

    impl PickSink for RecordingSink {
        fn deliver(&self, id: &PickId, result: PickerResult) -> bool {
            self.received.lock().unwrap().insert(id.clone(), result);
            true
        }
    }

    fn completer_for(sink: &Arc<RecordingSink>) -> PickCompleter {
        let sink: Arc<dyn PickSink> = sink.clone();
        PickCompleter::new(PickId::new(), Arc::downgrade(&sink))
    }

    #[test]
    fn test_intent_is_openable_create_document() {
        let intent = CreateDocumentIntent::new("report.csv", "text/csv");
        assert_eq!(intent.action, DocumentAction::CreateDocument);
        assert_eq!(intent.categories, vec![DocumentCategory::Openable]);
        assert_eq!(intent.title, "report.csv");
        assert_eq!(intent.mime_type, "text/csv");
    }

    #[test]
    fn test_locator_ignores_empty_data() {
        assert_eq!(PickerResult::canceled().locator(), None);
        assert_eq!(PickerResult::selected("").locator(), None);
        assert_eq!(
            PickerResult::selected("content://a/b").locator(),
            Some("content://a/b")
        );
    }

    #[test]
    fn test_completer_delivers_to_live_sink() {
        let sink = Arc::new(RecordingSink::default());
        let completer = completer_for(&sink);
        let id = completer.id().clone();

        assert!(completer.complete(PickerResult::selected("file:///tmp/x")));
        let received = sink.received.lock().unwrap();
        assert_eq!(received.get(&id), Some(&PickerResult::selected("file:///tmp/x")));
    }

    #[test]
    fn test_completer_after_sink_dropped_is_noop() {
        let sink = Arc::new(RecordingSink::default());
        let completer = completer_for(&sink);
        drop(sink);

        assert!(!completer.cancel());
    }

    #[test]
    fn test_pick_ids_are_unique() {
        assert_ne!(PickId::new(), PickId::new());
    }
}
