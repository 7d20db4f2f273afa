//! Generate → parse round-trip properties.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use trovelink_core::LinkConfig;
use trovelink_core::generator;
use trovelink_core::parser;
use uuid::Uuid;

use trovelink_protocol::Attribution;
use trovelink_protocol::LinkTarget;

fn all_targets(id: Uuid) -> Vec<LinkTarget> {
    vec![
        LinkTarget::Profile { user_id: id },
        LinkTarget::Moment { moment_id: id },
        LinkTarget::Gift { gift_id: id },
        LinkTarget::Chat { conversation_id: id },
        LinkTarget::Request { request_id: id },
        LinkTarget::Notifications,
        LinkTarget::Settings,
    ]
}

#[test]
fn generated_links_parse_back_to_their_type_and_identifier() {
    let config = LinkConfig::default();
    let id = Uuid::new_v4();
    for target in all_targets(id) {
        let link_type = target.link_type();
        let link = generator::generate(&config, target, None);
        let parsed = parser::parse(&config, &link.url);

        assert_eq!(parsed.link_type, Some(link_type), "{link_type}");
        match link_type.identifier_param() {
            Some(param) => {
                assert_eq!(parsed.params.get(param), Some(&id.to_string()), "{link_type}");
            }
            None => assert!(parsed.params.is_empty(), "{link_type}"),
        }
    }
}

#[test]
fn attribution_round_trips_exactly() {
    let config = LinkConfig::default();
    let attribution = Attribution {
        source: Some("instagram".into()),
        campaign: Some("summer".into()),
        ..Default::default()
    };
    let id = Uuid::new_v4();
    let link = generator::generate(
        &config,
        LinkTarget::Moment { moment_id: id },
        Some(&attribution),
    );
    let parsed = parser::parse(&config, &link.url);

    let expected: HashMap<String, String> = HashMap::from([
        ("utm_source".to_string(), "instagram".to_string()),
        ("utm_campaign".to_string(), "summer".to_string()),
    ]);
    assert_eq!(parsed.query_params, expected);
}

#[test]
fn generated_links_are_normalize_stable() {
    // Always the canonical origin, so normalization is the identity.
    let config = LinkConfig::default();
    let link = generator::generate(&config, LinkTarget::Settings, None);
    assert_eq!(parser::normalize(&config, &link.url), link.url);
}
