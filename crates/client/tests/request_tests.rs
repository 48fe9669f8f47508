//! Authorized request tests.
//!
//! # Invariants
//! - Non-2xx answers are `HttpStatus` with the body kept verbatim
//! - A 2xx body that is not JSON is `Protocol` with the body kept verbatim
//! - Form and multipart values are coerced to strings, nulls dropped

mod common;

use common::*;
use nexus_client::{ApiRequest, FileAttachment};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param,
};

#[tokio::test]
async fn test_get_decodes_json() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("GET"))
        .and(path("/commsrv/v1/group"))
        .and(header("accept", "application/json, text/plain, */*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("emc/groups.json")))
        .mount(&server)
        .await;

    let groups = client.request_get("/group").await.unwrap();
    assert_eq!(groups[0]["name"], "acme");
}

#[tokio::test]
async fn test_non_json_body_is_protocol_error() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("GET"))
        .and(path("/commsrv/v1/group"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    match client.request_get("/group").await.unwrap_err() {
        ClientError::Protocol { url, body, .. } => {
            assert!(url.ends_with("/commsrv/v1/group"));
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("DELETE"))
        .and(path("/commsrv/v1/group/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("group 99 not found"))
        .mount(&server)
        .await;

    match client.request_del("/group/99").await.unwrap_err() {
        ClientError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(body, "group 99 not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_protocol_error() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("GET"))
        .and(path("/commsrv/v1/group"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client.request_get("/group").await.unwrap_err();
    match err {
        ClientError::Protocol { url, body, .. } => {
            assert!(url.ends_with("/commsrv/v1/group"));
            assert_eq!(body, "");
        }
        other => panic!("expected Protocol, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Emc, &server).await;

    Mock::given(method("POST"))
        .and(path("/commsrv/v1/group"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "acme", "displayName": "Acme Corp"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "acme", "displayName": "Acme Corp", "id": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let res = client
        .request_post("/group", &json!({"name": "acme", "displayName": "Acme Corp"}))
        .await
        .unwrap();
    assert_eq!(res["id"], 3);
}

#[tokio::test]
async fn test_form_values_are_coerced() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("POST"))
        .and(path("/EI/V3/service/v1/bandcategory"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("name=VIP+members"))
        .and(body_string_contains("rank=3"))
        .and(body_string_contains("pinned=true"))
        .and(body_string_contains("tags=%5B%22a%22%2C%22b%22%5D"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"name": "VIP members", "id": 7}})))
        .expect(1)
        .mount(&server)
        .await;

    let res = client
        .request_post_form(
            "/bandcategory",
            &json!({"name": "VIP members", "rank": 3, "pinned": true, "tags": ["a", "b"], "id": null}),
        )
        .await
        .unwrap();
    assert_eq!(res["data"]["id"], 7);
}

#[tokio::test]
async fn test_upload_sends_file_part() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("POST"))
        .and(path("/EI/V3/service/v1/item"))
        .and(body_string_contains(r#"name="groupId""#))
        .and(body_string_contains(r#"name="file"; filename="items.csv""#))
        .and(body_string_contains("pid,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"pidNumber": 2}})))
        .expect(1)
        .mount(&server)
        .await;

    let file = FileAttachment::new("items.csv", b"pid,name\np1,Tea\np2,Cake\n".to_vec());
    let res = client
        .request_upload("/item", file, Some(&json!({"groupId": 3})))
        .await
        .unwrap();
    assert_eq!(res["data"]["pidNumber"], 2);
}

#[tokio::test]
async fn test_multipart_without_file() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("POST"))
        .and(path("/EI/V3/service/v1/band"))
        .and(body_string_contains(r#"name="snapshotInfo""#))
        .and(body_string_contains(r#"{"children":[],"parent":null}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .request_post_multipart(
            "/band",
            &json!({"name": "VIP", "snapshotInfo": {"parent": null, "children": []}}),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_builder_query_header_and_method() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("POST"))
        .and(path("/EI/V3/service/v1/band/30/snapshot"))
        .and(query_param("dryRun", "true"))
        .and(header("x-request-source", "nightly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 31}})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new("/band/30/snapshot")
        .method(Method::POST)
        .query("dryRun", "true")
        .header("X-Request-Source", "nightly");
    let res = client.execute(request).await.unwrap();
    assert_eq!(res["data"]["id"], 31);
}

#[tokio::test]
async fn test_download_streams_to_file() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("GET"))
        .and(path("/EI/V3/export/uids-30.csv"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_string("uid\nu1\nu2\n"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("uids.csv");
    let saved = client
        .download("/EI/V3/export/uids-30.csv", &destination)
        .await
        .unwrap();

    assert_eq!(saved, destination);
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "uid\nu1\nu2\n");
}

#[tokio::test]
async fn test_download_failure_is_status_error() {
    let server = MockServer::start().await;
    let client = logged_in(AppKind::Insight, &server).await;

    Mock::given(method("GET"))
        .and(path("/EI/V3/export/missing.csv"))
        .respond_with(ResponseTemplate::new(410).set_body_string("expired"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download(&format!("{}/EI/V3/export/missing.csv", server.uri()), dir.path().join("x.csv"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(410));
}

#[tokio::test]
async fn test_download_requires_session() {
    let server = MockServer::start().await;
    let client = app_client(AppKind::Insight, authority(&server), &server);

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download("/EI/V3/export/uids.csv", dir.path().join("uids.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotLoggedIn { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
