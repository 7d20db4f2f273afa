//! The deep-link service: an explicit state object owning the queue and
//! collaborator handles.
//!
//! Every public entry point returns a [`LinkResult`] value; nothing is
//! thrown across this boundary. Deep-link handling is advisory to the
//! host app, never fatal.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::sync::broadcast;
use tracing::info;
use tracing::warn;
use trovelink_protocol::Attribution;
use trovelink_protocol::LinkError;
use trovelink_protocol::LinkErrorCode;
use trovelink_protocol::LinkOptions;
use trovelink_protocol::LinkResult;
use trovelink_protocol::LinkTarget;
use trovelink_protocol::ValidationOutcome;

use crate::collaborators::KeyValueStore;
use crate::collaborators::Navigator;
use crate::collaborators::SessionProvider;
use crate::config::LinkConfig;
use crate::dispatch;
use crate::events::EventBus;
use crate::events::LinkEvent;
use crate::existence::ExistenceChecker;
use crate::generator;
use crate::generator::GeneratedLink;
use crate::parser;
use crate::queue::DeliveryQueue;
use crate::queue::QueuedLink;
use crate::router;
use crate::router::ErrorScreen;
use crate::validator;

pub struct DeepLinkService {
    config: LinkConfig,
    checker: ExistenceChecker,
    session: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    queue: Mutex<DeliveryQueue>,
    events: EventBus,
}

impl DeepLinkService {
    pub fn new(
        config: LinkConfig,
        store: Arc<dyn KeyValueStore>,
        session: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let checker = ExistenceChecker::new(&config);
        let queue = Mutex::new(DeliveryQueue::new(store, config.retention()));
        Self {
            config,
            checker,
            session,
            navigator,
            queue,
            events: EventBus::new(),
        }
    }

    /// Restore the persisted queue. Call once at app start, before the
    /// first link can arrive. Restore problems are logged and swallowed;
    /// an empty queue is always a valid starting state.
    pub async fn init(&self) {
        let mut queue = self.queue.lock().await;
        match queue.restore(Utc::now()).await {
            Ok(evicted) if evicted > 0 => {
                self.events.publish(LinkEvent::Evicted { count: evicted });
            }
            Ok(_) => {}
            Err(err) => warn!(%err, "failed to restore persisted link queue"),
        }
        if !queue.is_empty() {
            info!(pending = queue.len(), "restored queued deep links");
        }
    }

    /// Handle one raw link.
    ///
    /// Processed immediately if and only if the navigator reports
    /// itself ready right now; otherwise queued with write-through
    /// persistence and acknowledged as deferred.
    pub async fn handle_link(&self, url: &str, options: LinkOptions) -> LinkResult {
        if self.navigator.is_ready() {
            return self.resolve_and_dispatch(url, options).await;
        }

        let mut queue = self.queue.lock().await;
        let entry = QueuedLink {
            url: url.to_string(),
            options,
            queued_at: Utc::now(),
        };
        if let Err(err) = queue.enqueue(entry).await {
            // Write-through failed: the link is not durably queued, so
            // reporting it as queued would be a lie.
            warn!(%err, url, "failed to persist queued link");
            return LinkResult::failure(
                LinkError::new(LinkErrorCode::Unknown, "Failed to queue link")
                    .with_details(serde_json::json!({ "store": err.to_string() })),
            );
        }
        self.events.publish(LinkEvent::Queued {
            url: url.to_string(),
        });
        LinkResult::queued()
    }

    /// Replay everything queued, in original arrival order, once the
    /// navigation layer is ready. Each entry goes through the full
    /// pipeline as if it had just arrived; links that re-enqueue during
    /// replay land in a fresh batch. The persisted blob is cleared only
    /// after the whole batch has been replayed.
    pub async fn notify_navigation_ready(&self) -> Vec<LinkResult> {
        let batch = {
            let mut queue = self.queue.lock().await;
            queue.take_batch()
        };
        if batch.is_empty() {
            return Vec::new();
        }

        info!(count = batch.len(), "draining queued deep links");
        let mut results = Vec::with_capacity(batch.len());
        for entry in &batch {
            results.push(self.handle_link(&entry.url, entry.options).await);
        }

        let mut queue = self.queue.lock().await;
        if let Err(err) = queue.clear_persisted().await {
            warn!(%err, "failed to clear persisted link queue after drain");
        }
        self.events.publish(LinkEvent::Drained { count: batch.len() });
        results
    }

    /// Generate the canonical shareable URL for a link target.
    pub fn generate(
        &self,
        target: LinkTarget,
        attribution: Option<&Attribution>,
    ) -> GeneratedLink {
        generator::generate(&self.config, target, attribution)
    }

    /// Dedicated error destination for a finished result, if any.
    pub fn error_screen(&self, result: &LinkResult) -> Option<ErrorScreen> {
        router::screen_for_result(result)
    }

    /// Subscribe to queue lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.events.subscribe()
    }

    /// The full pipeline: parse, validate, optionally probe existence,
    /// map to a screen, dispatch.
    async fn resolve_and_dispatch(&self, url: &str, options: LinkOptions) -> LinkResult {
        let parsed = parser::parse(&self.config, url);
        let Some(link_type) = parsed.link_type else {
            return LinkResult::failure(LinkError::new(
                LinkErrorCode::InvalidUrl,
                "Unrecognized or malformed link",
            ));
        };

        let target = match validator::validate(link_type, &parsed.params) {
            ValidationOutcome::Valid { data } => data,
            ValidationOutcome::Invalid { message } => {
                return LinkResult::failure(LinkError::new(LinkErrorCode::InvalidParams, message));
            }
        };

        if options.check_existence
            && let Some(identifier) = target.identifier()
        {
            let token = self.session.access_token().await;
            let outcome = self
                .checker
                .check(link_type, identifier, token.as_deref())
                .await;
            if !outcome.exists {
                let error = if outcome.network_error && options.surface_network_errors {
                    LinkError::new(LinkErrorCode::NetworkError, "Could not verify link target")
                } else if outcome.expired {
                    LinkError::new(LinkErrorCode::Expired, "This link is no longer valid")
                } else {
                    LinkError::new(LinkErrorCode::NotFound, "Content not found")
                };
                return LinkResult::failure(error);
            }
            // 401/403 still dispatches; the app's auth gate takes over
            // at the destination.
        }

        let instruction = dispatch::instruction_for(target);
        dispatch::dispatch(self.navigator.as_ref(), &instruction);
        LinkResult::resolved(link_type, instruction.screen, instruction.params)
    }
}
