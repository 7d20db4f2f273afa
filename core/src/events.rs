//! Queue lifecycle events for interested host components.
//!
//! A broadcast channel replaces ad-hoc listener callbacks: subscribers
//! receive events on their own receivers, so a slow, lagged or dropped
//! subscriber can never abort link processing.

use tokio::sync::broadcast;

/// What happened to a link inside the delivery queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A link arrived before navigation was ready and was persisted.
    Queued { url: String },
    /// Stale persisted links were discarded on restore.
    Evicted { count: usize },
    /// A queued batch finished replaying.
    Drained { count: usize },
}

const EVENT_CAPACITY: usize = 32;

pub(crate) struct EventBus {
    sender: broadcast::Sender<LinkEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.sender.subscribe()
    }

    /// Publishing never fails; with no subscribers the event is simply
    /// dropped.
    pub(crate) fn publish(&self, event: LinkEvent) {
        let _ = self.sender.send(event);
    }
}
