//! Link normalization and structural parsing.
//!
//! All inbound forms (custom scheme, canonical origin, alias domains)
//! are rewritten to the canonical web origin first, so everything
//! downstream sees exactly one URL shape. Parsing never fails: input
//! that cannot be understood produces a `ParsedLink` with no type,
//! which the pipeline reports as `INVALID_URL`.

use std::collections::HashMap;

use tracing::debug;
use url::Url;

use trovelink_protocol::LinkType;
use trovelink_protocol::ParsedLink;

use crate::config::LinkConfig;

/// First-segment alias table: long form and short single-letter form.
/// Unknown segments yield no type rather than an error.
fn link_type_for_segment(segment: &str) -> Option<LinkType> {
    match segment {
        "profile" | "p" => Some(LinkType::Profile),
        "moment" | "m" => Some(LinkType::Moment),
        "gift" | "g" => Some(LinkType::Gift),
        "chat" | "c" => Some(LinkType::Chat),
        "request" | "r" => Some(LinkType::Request),
        "notifications" => Some(LinkType::Notifications),
        "settings" => Some(LinkType::Settings),
        _ => None,
    }
}

/// Case-insensitive prefix strip; schemes and origins compare
/// case-insensitively per RFC 3986 while the remainder keeps its case.
fn strip_prefix_ignore_ascii_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let (head, rest) = input.split_at_checked(prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(rest)
}

/// Rewrite custom-scheme and alias-domain forms to the canonical origin.
///
/// `trove://profile/abc` becomes `https://trove.app/profile/abc`; an
/// alias origin is substituted in place. Unrecognized prefixes pass
/// through untouched and take their chances with the URL parser.
pub fn normalize(config: &LinkConfig, raw: &str) -> String {
    let trimmed = raw.trim();

    for scheme in &config.custom_schemes {
        let prefix = format!("{scheme}://");
        if let Some(rest) = strip_prefix_ignore_ascii_case(trimmed, &prefix) {
            let normalized = format!("{}/{rest}", config.canonical_origin);
            debug!(raw = trimmed, normalized, "normalized custom scheme");
            return normalized;
        }
    }

    for alias in &config.alias_origins {
        if trimmed.eq_ignore_ascii_case(alias) {
            return config.canonical_origin.clone();
        }
        if let Some(rest) = strip_prefix_ignore_ascii_case(trimmed, &format!("{alias}/")) {
            let normalized = format!("{}/{rest}", config.canonical_origin);
            debug!(raw = trimmed, normalized, "normalized alias origin");
            return normalized;
        }
    }

    trimmed.to_string()
}

/// Parse a raw link into its structural representation.
pub fn parse(config: &LinkConfig, raw: &str) -> ParsedLink {
    let normalized = normalize(config, raw);

    let url = match Url::parse(&normalized) {
        Ok(url) => url,
        Err(err) => {
            debug!(raw, %err, "unparsable link");
            return ParsedLink::unparsable();
        }
    };

    // Only the canonical origin is accepted after normalization; a link
    // on any other host is not ours to resolve.
    let canonical_origin = match Url::parse(&config.canonical_origin) {
        Ok(canonical) => canonical.origin(),
        Err(err) => {
            debug!(%err, "canonical origin is not a valid URL");
            return ParsedLink::unparsable();
        }
    };
    if url.origin() != canonical_origin {
        debug!(raw, origin = %url.origin().ascii_serialization(), "rejecting foreign origin");
        return ParsedLink::unparsable();
    }

    let path_segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let query_params: HashMap<String, String> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let link_type = path_segments
        .first()
        .and_then(|segment| link_type_for_segment(segment.to_ascii_lowercase().as_str()));

    // Fixed arity: one identifier segment after the type segment for
    // identifier-bearing types; administrative types take none.
    let mut params = HashMap::new();
    if let Some(link_type) = link_type
        && let Some(param_name) = link_type.identifier_param()
        && let Some(identifier) = path_segments.get(1)
    {
        params.insert(param_name.to_string(), identifier.clone());
    }

    ParsedLink {
        link_type,
        raw_path: url.path().to_string(),
        path_segments,
        params,
        query_params,
    }
}
