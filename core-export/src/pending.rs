//! Registry of outstanding picker interactions.
//!
//! Each create-target call registers a oneshot sender under a fresh
//! [`PickId`] and waits on the receiver. The host's [`PickCompleter`] routes
//! the result back through [`PickSink::deliver`], which removes the entry, so
//! a completer can succeed at most once.
//!
//! [`PickCompleter`]: bridge_traits::PickCompleter

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bridge_traits::{PickId, PickSink, PickerResult};
use tokio::sync::oneshot;
use tracing::{debug, trace};

#[derive(Default)]
pub(crate) struct PendingPicks {
    waiting: Mutex<HashMap<PickId, oneshot::Sender<PickerResult>>>,
    closed: Mutex<bool>,
}

impl PendingPicks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new interaction.
    ///
    /// Returns `None` once the registry is closed.
    pub(crate) fn register(&self) -> Option<(PickId, oneshot::Receiver<PickerResult>)> {
        let closed = lock(&self.closed);
        if *closed {
            return None;
        }
        let id = PickId::new();
        let (tx, rx) = oneshot::channel();
        lock(&self.waiting).insert(id.clone(), tx);
        trace!(pick_id = %id, "Registered pick");
        Some((id, rx))
    }

    pub(crate) fn remove(&self, id: &PickId) -> bool {
        lock(&self.waiting).remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.waiting).len()
    }

    /// Refuse new registrations and drop every waiting sender.
    ///
    /// Callers still awaiting a receiver observe a closed channel.
    pub(crate) fn close(&self) -> usize {
        *lock(&self.closed) = true;
        let drained: Vec<_> = lock(&self.waiting).drain().collect();
        let count = drained.len();
        drop(drained);
        if count > 0 {
            debug!(count, "Dropped outstanding picks");
        }
        count
    }
}

impl PickSink for PendingPicks {
    fn deliver(&self, id: &PickId, result: PickerResult) -> bool {
        let sender = lock(&self.waiting).remove(id);
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => {
                debug!(pick_id = %id, "Picker result for unknown or finished pick ignored");
                false
            }
        }
    }
}

/// Removes a registered pick when the waiting caller goes away.
pub(crate) struct PendingGuard {
    picks: Arc<PendingPicks>,
    id: PickId,
}

impl PendingGuard {
    pub(crate) fn new(picks: Arc<PendingPicks>, id: PickId) -> Self {
        Self { picks, id }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.picks.remove(&self.id);
    }
}

// A panic while holding the lock leaves the map consistent, so poisoning is
// ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
