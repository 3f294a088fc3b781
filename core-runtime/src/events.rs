//! # Export Event Bus
//!
//! Broadcasts export lifecycle events using `tokio::sync::broadcast`, so that
//! host UI (progress toasts, analytics) can observe exports without being on
//! the call path.
//!
//! ```text
//! ┌──────────────────────┐   emit    ┌──────────┐  subscribe  ┌────────────┐
//! │ PermissionNegotiator ├──────────>│          ├────────────>│ Host UI    │
//! └──────────────────────┘           │ EventBus │             └────────────┘
//! ┌──────────────────────┐   emit    │          │  subscribe  ┌────────────┐
//! │ ExportSession        ├──────────>│          ├────────────>│ Analytics  │
//! └──────────────────────┘           └──────────┘             └────────────┘
//! ```
//!
//! Events never carry payload contents. Locators are included because the
//! host already owns them; log output redacts them separately.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, ExportEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(ExportEvent::PickCanceled);
//! assert_eq!(rx.recv().await.unwrap(), ExportEvent::PickCanceled);
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast::{self, Receiver};

const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Export lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExportEvent {
    /// A batched permission request was dispatched to the host.
    PermissionsRequested { capabilities: Vec<String> },
    /// A create-document intent was handed to the picker.
    PickStarted { file_name: String, mime_type: String },
    /// The picker returned a document.
    TargetCreated { locator: String },
    /// The picker returned without a document.
    PickCanceled,
    /// A payload was fully written, flushed and closed.
    WriteCompleted { locator: String, bytes: usize },
    /// A write was rejected; `code` is the stable error code.
    WriteFailed { code: String },
}

impl ExportEvent {
    pub fn description(&self) -> &'static str {
        match self {
            ExportEvent::PermissionsRequested { .. } => "Storage permissions requested",
            ExportEvent::PickStarted { .. } => "Document picker launched",
            ExportEvent::TargetCreated { .. } => "Export target created",
            ExportEvent::PickCanceled => "Document picker canceled",
            ExportEvent::WriteCompleted { .. } => "Export written",
            ExportEvent::WriteFailed { .. } => "Export write failed",
        }
    }

    /// Whether the event ends an export attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportEvent::PickCanceled
                | ExportEvent::WriteCompleted { .. }
                | ExportEvent::WriteFailed { .. }
        )
    }
}

/// Broadcast channel for [`ExportEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ExportEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Returns the number of subscribers reached. Having none is normal.
    pub fn emit(&self, event: ExportEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a receiver for all future events. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<ExportEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(4);
        assert_eq!(bus.emit(ExportEvent::PickCanceled), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = EventBus::new(4);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let event = ExportEvent::WriteCompleted {
            locator: "file:///tmp/export.json".to_string(),
            bytes: 5,
        };
        assert_eq!(bus.emit(event.clone()), 2);

        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        for _ in 0..3 {
            bus.emit(ExportEvent::PickCanceled);
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
    }

    #[test]
    fn test_terminal_events() {
        assert!(ExportEvent::PickCanceled.is_terminal());
        assert!(ExportEvent::WriteFailed {
            code: "WRITE_FAILED".to_string()
        }
        .is_terminal());
        assert!(!ExportEvent::TargetCreated {
            locator: "content://x".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&ExportEvent::WriteFailed {
            code: "FILE_NOTCREATED".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"writeFailed","code":"FILE_NOTCREATED"}"#);
    }
}
