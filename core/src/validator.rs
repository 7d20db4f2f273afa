//! Per-type schema validation of path-derived parameters.
//!
//! Identifiers are opaque UUIDs; anything else is rejected with a
//! field-specific message so the host can show something better than a
//! generic failure. The first issue found is surfaced verbatim.

use std::collections::HashMap;

use uuid::Uuid;

use trovelink_protocol::LinkTarget;
use trovelink_protocol::LinkType;
use trovelink_protocol::ValidationOutcome;

fn require_uuid(
    params: &HashMap<String, String>,
    field: &str,
    label: &str,
) -> Result<Uuid, String> {
    let raw = params
        .get(field)
        .ok_or_else(|| format!("Missing {label}"))?;
    Uuid::try_parse(raw).map_err(|_| format!("Invalid {label}"))
}

/// Validate raw parameters against the schema for `link_type`.
///
/// Types with no schema (the administrative destinations) are always
/// valid; no schema lookup is performed for them.
pub fn validate(link_type: LinkType, params: &HashMap<String, String>) -> ValidationOutcome {
    let checked = match link_type {
        LinkType::Profile => {
            require_uuid(params, "userId", "user id").map(|user_id| LinkTarget::Profile { user_id })
        }
        LinkType::Moment => require_uuid(params, "momentId", "moment id")
            .map(|moment_id| LinkTarget::Moment { moment_id }),
        LinkType::Gift => require_uuid(params, "giftId", "gift id")
            .map(|gift_id| LinkTarget::Gift { gift_id }),
        LinkType::Chat => require_uuid(params, "conversationId", "conversation id")
            .map(|conversation_id| LinkTarget::Chat { conversation_id }),
        LinkType::Request => require_uuid(params, "requestId", "request id")
            .map(|request_id| LinkTarget::Request { request_id }),
        LinkType::Notifications => Ok(LinkTarget::Notifications),
        LinkType::Settings => Ok(LinkTarget::Settings),
    };

    match checked {
        Ok(data) => ValidationOutcome::Valid { data },
        Err(message) => ValidationOutcome::Invalid { message },
    }
}
