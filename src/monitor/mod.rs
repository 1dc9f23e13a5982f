/// Published state: the last-known-good snapshot plus update health.
///
/// ## Architecture: single atomic swap
///
/// The fetch loop is the only writer. Each successful cycle builds a
/// complete `WarningSnapshot`, wraps it in an `Arc`, and swaps it in under
/// a short write lock. Readers clone the `Arc` and never observe a partial
/// update. A failed cycle only touches the status fields; the snapshot it
/// would have replaced stays published.
///
/// Subscribers get every published snapshot over an `mpsc` channel.

use crate::model::{FeedError, WarningSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Update status
// ---------------------------------------------------------------------------

/// Health of the fetch cycle as seen by readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateStatus {
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Message of the most recent failure; cleared on success.
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
}

impl UpdateStatus {
    /// True when the most recent attempt succeeded.
    pub fn last_update_success(&self) -> bool {
        self.last_attempt.is_some() && self.consecutive_failures == 0
    }
}

#[derive(Debug, Default)]
struct Published {
    snapshot: Option<Arc<WarningSnapshot>>,
    status: UpdateStatus,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holder of the published snapshot, shared via `Arc` between the fetch
/// loop and every consumer.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    state: RwLock<Published>,
    subscribers: Mutex<Vec<Sender<Arc<WarningSnapshot>>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published snapshot; `None` until the first successful cycle.
    pub fn latest(&self) -> Option<Arc<WarningSnapshot>> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot
            .clone()
    }

    pub fn status(&self) -> UpdateStatus {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .status
            .clone()
    }

    /// Replaces the published snapshot and notifies subscribers.
    pub fn publish(&self, snapshot: WarningSnapshot) -> Arc<WarningSnapshot> {
        self.publish_at(snapshot, Utc::now())
    }

    pub fn publish_at(&self, snapshot: WarningSnapshot, now: DateTime<Utc>) -> Arc<WarningSnapshot> {
        let snapshot = Arc::new(snapshot);
        {
            let mut state = self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            state.snapshot = Some(Arc::clone(&snapshot));
            state.status.last_attempt = Some(now);
            state.status.last_success = Some(now);
            state.status.last_error = None;
            state.status.consecutive_failures = 0;
        }
        self.notify(&snapshot);
        snapshot
    }

    /// Records a failed cycle. The published snapshot is left untouched.
    pub fn record_failure(&self, error: &FeedError) {
        self.record_failure_at(error, Utc::now());
    }

    pub fn record_failure_at(&self, error: &FeedError, now: DateTime<Utc>) {
        let mut state = self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.status.last_attempt = Some(now);
        state.status.last_error = Some(error.to_string());
        state.status.consecutive_failures += 1;
        warn!(
            consecutive_failures = state.status.consecutive_failures,
            keeping_previous = state.snapshot.is_some(),
            "update failed: {}",
            error
        );
    }

    /// Registers a subscriber that receives every future snapshot.
    pub fn subscribe(&self) -> Receiver<Arc<WarningSnapshot>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    fn notify(&self, snapshot: &Arc<WarningSnapshot>) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(Arc::clone(snapshot)).is_ok());
        if subscribers.len() < before {
            debug!(dropped = before - subscribers.len(), "pruned disconnected subscribers");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
