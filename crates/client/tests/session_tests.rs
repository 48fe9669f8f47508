//! Application session handshake tests.
//!
//! # Invariants
//! - Validation accepts 2xx and 403, nothing else
//! - A failed handshake clears the session but keeps the TGT
//! - Requests without a session never reach the network

mod common;

use common::*;
use wiremock::matchers::{body_string, header, method, path};

#[tokio::test]
async fn test_login_establishes_session() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    assert_eq!(client.phase(), SessionPhase::Authenticated);
    assert!(client.is_logged_in());
    assert_eq!(client.service_ticket().map(|t| t.as_str()), Some(ST));
}

#[tokio::test]
async fn test_second_login_is_a_no_op() {
    let server = MockServer::start().await;
    mount_tgt(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(format!("/cas/v1/tickets/{TGT}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(ST))
        .expect(1)
        .mount(&server)
        .await;
    mount_validation(&server, "/shiro-cas", 200).await;

    let mut client = app_client(AppKind::Emc, authority(&server), &server);
    let first = client.login().await.unwrap();
    let second = client.login().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_forbidden_validation_is_tolerated() {
    let server = MockServer::start().await;
    mount_tgt(&server, 1).await;
    mount_st(&server).await;
    mount_validation(&server, "/EI/V3/shiro-cas", 403).await;

    let mut client = app_client(AppKind::Insight, authority(&server), &server);
    client.login().await.unwrap();

    assert_eq!(client.phase(), SessionPhase::Authenticated);
}

#[tokio::test]
async fn test_server_error_during_validation_fails_login() {
    let server = MockServer::start().await;
    mount_tgt(&server, 1).await;
    mount_st(&server).await;
    mount_validation(&server, "/ER/V3/shiro-cas", 500).await;

    let authority = authority(&server);
    let mut client = app_client(AppKind::Recommender, authority.clone(), &server);
    let err = client.login().await.unwrap_err();

    assert!(matches!(err, ClientError::HttpStatus { status: 500, .. }));
    assert_eq!(client.phase(), SessionPhase::Failed);
    assert!(!client.is_logged_in());
    assert!(authority.ticket().await.is_some());
}

#[tokio::test]
async fn test_authority_failure_fails_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut client = app_client(AppKind::Emc, authority(&server), &server);
    let err = client.login().await.unwrap_err();

    assert!(matches!(err, ClientError::AuthFailed { .. }));
    assert_eq!(client.phase(), SessionPhase::Failed);
}

#[tokio::test]
async fn test_logout_then_request_performs_no_io() {
    let server = MockServer::start().await;
    let mut client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("GET"))
        .and(path("/commsrv/v1/group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    client.logout();
    assert_eq!(client.phase(), SessionPhase::Unauthenticated);

    let err = client.request_get("/group").await.unwrap_err();
    assert!(matches!(err, ClientError::NotLoggedIn { ref app } if app == "EMC2"));
}

#[tokio::test]
async fn test_clients_get_independent_service_tickets() {
    let server = MockServer::start().await;
    mount_tgt(&server, 1).await;

    let emc_service = format!(
        "service={}",
        url_encode(&format!("{}/shiro-cas", server.uri()))
    );
    let ei_service = format!(
        "service={}",
        url_encode(&format!("{}/EI/V3/shiro-cas", server.uri()))
    );
    Mock::given(method("POST"))
        .and(path(format!("/cas/v1/tickets/{TGT}")))
        .and(body_string(emc_service))
        .respond_with(ResponseTemplate::new(200).set_body_string("ST-EMC"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/cas/v1/tickets/{TGT}")))
        .and(body_string(ei_service))
        .respond_with(ResponseTemplate::new(200).set_body_string("ST-EI"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let authority = authority(&server);
    let mut emc = app_client(AppKind::Emc, authority.clone(), &server);
    let mut insight = app_client(AppKind::Insight, authority, &server);

    assert_eq!(emc.login().await.unwrap().as_str(), "ST-EMC");
    assert_eq!(insight.login().await.unwrap().as_str(), "ST-EI");
}

#[tokio::test]
async fn test_session_cookie_is_sent_with_requests() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("GET"))
        .and(path("/commsrv/v1/system/version"))
        .and(header("cookie", SESSION_COOKIE))
        .and(header("pragma", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": "2.4.0",
            "build": "118",
            "branch": "release"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.request_get("/system/version").await.unwrap();
    assert_eq!(info["version"], "2.4.0");
}

#[tokio::test]
async fn test_relogin_after_logout_uses_cached_tgt() {
    let server = MockServer::start().await;
    let mut client = logged_in(AppKind::Emc, &server).await;

    client.logout();
    client.login().await.unwrap();

    assert!(client.is_logged_in());
}

fn url_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
