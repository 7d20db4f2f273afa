//! Existence-check contract: status mapping, fail-closed transport
//! behavior, and the unauthenticated skip.

use std::sync::Arc;

use core_test_support::RecordingNavigator;
use core_test_support::StaticSession;
use pretty_assertions::assert_eq;
use trovelink_core::DeepLinkService;
use trovelink_core::ErrorScreen;
use trovelink_core::LinkConfig;
use trovelink_core::MemoryStore;
use uuid::Uuid;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

use trovelink_protocol::LinkErrorCode;
use trovelink_protocol::LinkOptions;
use trovelink_protocol::LinkResult;

fn service_against(
    api_base: &str,
    session: StaticSession,
    navigator: Arc<RecordingNavigator>,
) -> DeepLinkService {
    let config = LinkConfig {
        api_base: api_base.to_string(),
        ..LinkConfig::default()
    };
    DeepLinkService::new(
        config,
        Arc::new(MemoryStore::default()),
        Arc::new(session),
        navigator,
    )
}

#[tokio::test]
async fn not_found_status_blocks_navigation() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("HEAD"))
        .and(path(format!("/moments/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(&server.uri(), StaticSession::authenticated("tok"), navigator.clone());

    let result = service
        .handle_link(&format!("https://trove.app/moment/{id}"), LinkOptions::default())
        .await;
    assert_eq!(result.error_code(), Some(LinkErrorCode::NotFound));
    assert_eq!(service.error_screen(&result), Some(ErrorScreen::LinkNotFound));
    assert!(navigator.dispatched().is_empty());
}

#[tokio::test]
async fn gone_status_gets_distinct_expired_messaging() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("HEAD"))
        .and(path(format!("/gifts/{id}")))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(&server.uri(), StaticSession::authenticated("tok"), navigator);

    let result = service
        .handle_link(&format!("trove://gift/{id}"), LinkOptions::default())
        .await;
    assert_eq!(result.error_code(), Some(LinkErrorCode::Expired));
    assert_eq!(service.error_screen(&result), Some(ErrorScreen::LinkExpired));
    match result {
        LinkResult::Failed(failed) => {
            assert_eq!(failed.error.message, "This link is no longer valid");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn success_status_dispatches_with_bearer_auth() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("HEAD"))
        .and(path(format!("/users/{id}")))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(
        &server.uri(),
        StaticSession::authenticated("tok-123"),
        navigator.clone(),
    );

    let result = service
        .handle_link(&format!("https://trove.app/profile/{id}"), LinkOptions::default())
        .await;
    assert!(result.is_success());
    assert_eq!(navigator.dispatched_screens(), vec!["Profile".to_string()]);
}

#[tokio::test]
async fn forbidden_resource_still_dispatches_for_the_auth_gate() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("HEAD"))
        .and(path(format!("/conversations/{id}")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(&server.uri(), StaticSession::authenticated("tok"), navigator.clone());

    let result = service
        .handle_link(&format!("https://trove.app/chat/{id}"), LinkOptions::default())
        .await;
    assert!(result.is_success());
    assert_eq!(navigator.dispatched_screens(), vec!["ChatRoom".to_string()]);
}

#[tokio::test]
async fn transport_failure_fails_closed_as_not_found() {
    // Nothing listens here; the connection is refused immediately.
    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(
        "http://127.0.0.1:1",
        StaticSession::authenticated("tok"),
        navigator.clone(),
    );

    let id = Uuid::new_v4();
    let result = service
        .handle_link(&format!("https://trove.app/moment/{id}"), LinkOptions::default())
        .await;
    assert_eq!(result.error_code(), Some(LinkErrorCode::NotFound));
    assert!(navigator.dispatched().is_empty());
}

#[tokio::test]
async fn transport_failure_surfaces_when_the_caller_asks() {
    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(
        "http://127.0.0.1:1",
        StaticSession::authenticated("tok"),
        navigator,
    );

    let id = Uuid::new_v4();
    let options = LinkOptions {
        surface_network_errors: true,
        ..LinkOptions::default()
    };
    let result = service
        .handle_link(&format!("https://trove.app/moment/{id}"), options)
        .await;
    assert_eq!(result.error_code(), Some(LinkErrorCode::NetworkError));
    // No dedicated destination: generic invalid copy.
    assert_eq!(service.error_screen(&result), Some(ErrorScreen::LinkInvalid));
}

#[tokio::test]
async fn anonymous_sessions_skip_the_probe_and_assume_existence() {
    let server = MockServer::start().await;
    // Any request reaching the server would fail the expect(0) below.
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(&server.uri(), StaticSession::anonymous(), navigator.clone());

    let id = Uuid::new_v4();
    let result = service
        .handle_link(&format!("https://trove.app/gift/{id}"), LinkOptions::default())
        .await;
    assert!(result.is_success());
    assert_eq!(navigator.dispatched_screens(), vec!["GiftDetail".to_string()]);
}

#[tokio::test]
async fn existence_probe_can_be_disabled_per_link() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::ready());
    let service = service_against(&server.uri(), StaticSession::authenticated("tok"), navigator);

    let id = Uuid::new_v4();
    let options = LinkOptions {
        check_existence: false,
        ..LinkOptions::default()
    };
    let result = service
        .handle_link(&format!("https://trove.app/request/{id}"), options)
        .await;
    assert!(result.is_success());
}
