//! The typed link grammar: link types, the parsed (pre-validation)
//! representation, and the option/attribution bags that travel with a link.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use uuid::Uuid;

/// Closed set of in-app destinations a deep link can name.
///
/// Every non-administrative variant carries exactly one required
/// identifier; `Notifications` and `Settings` are administrative and
/// take no identifier segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkType {
    Profile,
    Moment,
    Gift,
    Chat,
    Request,
    Notifications,
    Settings,
}

impl LinkType {
    /// True for variants that name an app surface rather than a resource.
    pub fn is_administrative(self) -> bool {
        matches!(self, LinkType::Notifications | LinkType::Settings)
    }

    /// Name of the path-derived identifier parameter, if this type has one.
    pub fn identifier_param(self) -> Option<&'static str> {
        match self {
            LinkType::Profile => Some("userId"),
            LinkType::Moment => Some("momentId"),
            LinkType::Gift => Some("giftId"),
            LinkType::Chat => Some("conversationId"),
            LinkType::Request => Some("requestId"),
            LinkType::Notifications | LinkType::Settings => None,
        }
    }
}

/// A fully-identified in-app destination: only the valid combinations
/// of link type and identifier are representable, so an
/// identifier-bearing type can never travel without its identifier.
///
/// The validator produces these, the dispatcher maps them to screens,
/// and the generator renders them back into canonical URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Profile { user_id: Uuid },
    Moment { moment_id: Uuid },
    Gift { gift_id: Uuid },
    Chat { conversation_id: Uuid },
    Request { request_id: Uuid },
    Notifications,
    Settings,
}

impl LinkTarget {
    pub fn link_type(&self) -> LinkType {
        match self {
            LinkTarget::Profile { .. } => LinkType::Profile,
            LinkTarget::Moment { .. } => LinkType::Moment,
            LinkTarget::Gift { .. } => LinkType::Gift,
            LinkTarget::Chat { .. } => LinkType::Chat,
            LinkTarget::Request { .. } => LinkType::Request,
            LinkTarget::Notifications => LinkType::Notifications,
            LinkTarget::Settings => LinkType::Settings,
        }
    }

    /// The identifier this target carries, if its type has one.
    pub fn identifier(&self) -> Option<Uuid> {
        match self {
            LinkTarget::Profile { user_id } => Some(*user_id),
            LinkTarget::Moment { moment_id } => Some(*moment_id),
            LinkTarget::Gift { gift_id } => Some(*gift_id),
            LinkTarget::Chat { conversation_id } => Some(*conversation_id),
            LinkTarget::Request { request_id } => Some(*request_id),
            LinkTarget::Notifications | LinkTarget::Settings => None,
        }
    }
}

/// Structural parse of a link, produced before any validation runs.
///
/// `link_type` is `None` when the input was unparsable or named an
/// unknown first segment; parsing itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLink {
    #[serde(rename = "type")]
    pub link_type: Option<LinkType>,
    pub raw_path: String,
    pub path_segments: Vec<String>,
    pub params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
}

impl ParsedLink {
    /// The representation of input that could not be parsed at all.
    pub fn unparsable() -> Self {
        Self::default()
    }
}

/// Caller-supplied knobs for a single resolution attempt.
///
/// These travel with the link when it is queued, so a replayed link is
/// resolved under the options it originally arrived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkOptions {
    /// Run the remote existence probe before dispatching.
    pub check_existence: bool,
    /// Report probe transport failures as `NETWORK_ERROR` instead of
    /// folding them into the fail-closed not-found path.
    pub surface_network_errors: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            check_existence: true,
            surface_network_errors: false,
        }
    }
}

/// Marketing attribution attached to an outbound shareable link.
///
/// Serialized as standard `utm_*` query parameters; absent fields are
/// omitted entirely so generated URLs stay minimal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub medium: Option<String>,
    pub content: Option<String>,
}

impl Attribution {
    /// The `utm_*` pairs this attribution serializes to, in a fixed order.
    pub fn utm_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(source) = &self.source {
            pairs.push(("utm_source", source.as_str()));
        }
        if let Some(campaign) = &self.campaign {
            pairs.push(("utm_campaign", campaign.as_str()));
        }
        if let Some(medium) = &self.medium {
            pairs.push(("utm_medium", medium.as_str()));
        }
        if let Some(content) = &self.content {
            pairs.push(("utm_content", content.as_str()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.campaign.is_none()
            && self.medium.is_none()
            && self.content.is_none()
    }
}
