//! Persisted delivery queue for links that arrive before navigation is
//! ready.
//!
//! The queue exclusively owns its persisted representation: a flat JSON
//! array under a single storage key, rewritten wholesale on every
//! mutation (write-through) so a process kill between enqueue and drain
//! cannot lose a link. Restored entries older than the retention window
//! are discarded and never replayed.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use tracing::info;
use tracing::warn;

use trovelink_protocol::LinkOptions;

use crate::collaborators::KeyValueStore;
use crate::collaborators::StoreError;
use crate::config::QUEUE_STORAGE_KEY;

/// A link waiting for the navigation layer, exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedLink {
    pub url: String,
    pub options: LinkOptions,
    pub queued_at: DateTime<Utc>,
}

/// In-memory queue plus its durable mirror.
pub struct DeliveryQueue {
    store: Arc<dyn KeyValueStore>,
    retention: Duration,
    entries: Vec<QueuedLink>,
}

impl DeliveryQueue {
    pub fn new(store: Arc<dyn KeyValueStore>, retention: Duration) -> Self {
        Self {
            store,
            retention,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restore the persisted queue, discarding entries older than the
    /// retention window. Returns how many entries were evicted.
    ///
    /// A corrupt persisted blob is dropped rather than propagated; the
    /// queue is a best-effort delivery mechanism, not a ledger.
    pub async fn restore(&mut self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let Some(raw) = self.store.get(QUEUE_STORAGE_KEY).await? else {
            return Ok(0);
        };

        let persisted: Vec<QueuedLink> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, "discarding corrupt persisted queue");
                self.store.remove(QUEUE_STORAGE_KEY).await?;
                return Ok(0);
            }
        };

        let cutoff = now - self.retention;
        let total = persisted.len();
        let mut fresh: Vec<QueuedLink> = persisted
            .into_iter()
            .filter(|entry| entry.queued_at > cutoff)
            .collect();
        let evicted = total - fresh.len();

        if evicted > 0 {
            info!(evicted, retained = fresh.len(), "evicted stale queued links");
        }

        // Restored entries precede anything enqueued since startup so
        // arrival order is preserved across the restart.
        fresh.append(&mut self.entries);
        self.entries = fresh;

        if evicted > 0 {
            self.persist().await?;
        }
        Ok(evicted)
    }

    /// Append a link and immediately mirror the queue to durable
    /// storage. A link is only queued once it is durable; on a failed
    /// write the entry is rolled back and the error surfaced.
    pub async fn enqueue(&mut self, entry: QueuedLink) -> Result<(), StoreError> {
        debug!(url = entry.url, "queueing link until navigation is ready");
        self.entries.push(entry);
        if let Err(err) = self.persist().await {
            self.entries.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Take the whole batch for replay, leaving a fresh queue behind so
    /// re-entrant enqueues during replay are not part of this batch.
    /// The persisted mirror is untouched until [`Self::clear_persisted`].
    pub fn take_batch(&mut self) -> Vec<QueuedLink> {
        std::mem::take(&mut self.entries)
    }

    /// Drop the persisted representation after a batch has fully
    /// replayed. Links enqueued during the replay re-persist themselves
    /// through [`Self::enqueue`].
    pub async fn clear_persisted(&mut self) -> Result<(), StoreError> {
        if self.entries.is_empty() {
            self.store.remove(QUEUE_STORAGE_KEY).await
        } else {
            self.persist().await
        }
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(QUEUE_STORAGE_KEY, &json).await
    }
}
