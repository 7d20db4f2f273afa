//! Outbound link generation: the inverse of the parser.
//!
//! Always emits the canonical origin so every generated link is
//! normalize-stable, and serializes attribution as standard `utm_*`
//! parameters that round-trip losslessly through the parser. Taking a
//! [`LinkTarget`] keeps identifier-less identifier-bearing links
//! unrepresentable.

use chrono::DateTime;
use chrono::Utc;
use tracing::debug;
use url::Url;

use trovelink_protocol::Attribution;
use trovelink_protocol::LinkTarget;
use trovelink_protocol::LinkType;

use crate::config::LinkConfig;

/// A freshly generated shareable link. `generated_at` supports
/// click-latency measurement without polluting the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLink {
    pub url: String,
    pub generated_at: DateTime<Utc>,
}

/// Outbound path segment per link type. This is the generator's own
/// table, kept separate from the parser's alias lookup and the
/// dispatcher's screen table.
fn path_segment(link_type: LinkType) -> &'static str {
    match link_type {
        LinkType::Profile => "profile",
        LinkType::Moment => "moment",
        LinkType::Gift => "gift",
        LinkType::Chat => "chat",
        LinkType::Request => "request",
        LinkType::Notifications => "notifications",
        LinkType::Settings => "settings",
    }
}

/// Build the canonical shareable URL for a link target.
///
/// Administrative targets have no identifier segment; identifier-bearing
/// targets emit exactly one.
pub fn generate(
    config: &LinkConfig,
    target: LinkTarget,
    attribution: Option<&Attribution>,
) -> GeneratedLink {
    let link_type = target.link_type();
    let mut path = format!("{}/{}", config.canonical_origin, path_segment(link_type));
    if let Some(identifier) = target.identifier() {
        path.push('/');
        path.push_str(&identifier.to_string());
    }

    let url = match attribution.filter(|attribution| !attribution.is_empty()) {
        Some(attribution) => match Url::parse(&path) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(attribution.utm_pairs());
                url.to_string()
            }
            // The canonical origin is config-controlled; if it is not a
            // URL the bare path is the best we can emit.
            Err(_) => path,
        },
        None => path,
    };

    debug!(%link_type, url, "generated shareable link");
    GeneratedLink {
        url,
        generated_at: Utc::now(),
    }
}
