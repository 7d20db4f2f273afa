//! Authorization-aware remote existence probe.
//!
//! A HEAD request against the type's endpoint confirms a target is
//! present and visible before the app navigates to it. On any
//! uncertainty (unexpected status, transport failure, timeout) the
//! probe fails closed: the resource is reported absent rather than
//! revealed.

use reqwest::StatusCode;
use tracing::debug;
use tracing::warn;
use uuid::Uuid;

use trovelink_protocol::ExistenceOutcome;
use trovelink_protocol::LinkType;

use crate::config::LinkConfig;

/// Resource collection each identifier-bearing type probes against.
/// Administrative types have no endpoint and always exist.
fn resource_collection(link_type: LinkType) -> Option<&'static str> {
    match link_type {
        LinkType::Profile => Some("users"),
        LinkType::Moment => Some("moments"),
        LinkType::Gift => Some("gifts"),
        LinkType::Chat => Some("conversations"),
        LinkType::Request => Some("requests"),
        LinkType::Notifications | LinkType::Settings => None,
    }
}

/// Issues existence probes against the Trove API.
#[derive(Debug, Clone)]
pub struct ExistenceChecker {
    client: reqwest::Client,
    api_base: String,
}

impl ExistenceChecker {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
        }
    }

    /// Classify the target of a link.
    ///
    /// With no token the probe is skipped and the resource is treated
    /// as existing: unauthenticated taps on public resources must not
    /// dead-end, and the destination screen enforces access anyway.
    pub async fn check(
        &self,
        link_type: LinkType,
        identifier: Uuid,
        token: Option<&str>,
    ) -> ExistenceOutcome {
        let Some(collection) = resource_collection(link_type) else {
            return ExistenceOutcome::present(None);
        };

        let Some(token) = token else {
            debug!(%link_type, "no session token; skipping existence probe");
            return ExistenceOutcome::present(None);
        };

        let url = format!("{}/{collection}/{identifier}", self.api_base);
        let response = self.client.head(url.as_str()).bearer_auth(token).send().await;

        match response {
            Ok(response) => classify_status(link_type, response.status()),
            Err(err) => {
                // Timeouts land here too; the transport's default
                // deadline is the only one we apply.
                warn!(%link_type, %err, "existence probe transport failure; failing closed");
                ExistenceOutcome::transport_failure()
            }
        }
    }
}

fn classify_status(link_type: LinkType, status: StatusCode) -> ExistenceOutcome {
    let outcome = match status {
        StatusCode::NOT_FOUND => ExistenceOutcome::absent(404),
        StatusCode::GONE => ExistenceOutcome::gone(),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ExistenceOutcome::present(Some(status.as_u16()))
        }
        status if status.is_success() => ExistenceOutcome::present(Some(status.as_u16())),
        status => {
            warn!(%link_type, %status, "unexpected probe status; failing closed");
            ExistenceOutcome::transport_failure()
        }
    };
    debug!(%link_type, %status, ?outcome, "existence probe classified");
    outcome
}
