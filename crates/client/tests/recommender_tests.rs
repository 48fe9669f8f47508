//! ER3 facade tests.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use nexus_client::models::{AlgInstance, Campaign, Logic, LogicAlgType, UserFilter};
use nexus_client::{FileAttachment, RecommenderClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};

async fn recommender(server: &MockServer) -> RecommenderClient {
    RecommenderClient::from_client(logged_in(AppKind::Recommender, server).await)
        .expect("ER client")
}

fn campaign(start_ms: i64, end_ms: i64) -> Campaign {
    Campaign {
        group_id: 3,
        name: "summer".to_string(),
        display_name: "Summer sale".to_string(),
        start_time: Utc.timestamp_millis_opt(start_ms).unwrap(),
        end_time: Utc.timestamp_millis_opt(end_ms).unwrap(),
        logics: Vec::new(),
        id: None,
        create_time: None,
        update_time: None,
    }
}

#[tokio::test]
async fn test_get_logics() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    Mock::given(method("GET"))
        .and(path("/ER/V3/recsrv/v1/group/3/logic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("er/logics.json")))
        .mount(&server)
        .await;

    let logics = er.get_logics(3).await.unwrap();
    assert_eq!(logics[0].id, Some(5));
    assert_eq!(logics[0].alg_type, LogicAlgType::ItemBase);
    assert_eq!(logics[0].alg_instances[0].setting["TIMERANGE"], 30);
}

#[tokio::test]
async fn test_add_logic_posts_camel_case() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    Mock::given(method("POST"))
        .and(path("/ER/V3/recsrv/v1/group/3/logic"))
        .and(body_partial_json(json!({
            "name": "hot",
            "numberOfRec": 8,
            "algType": "RANK",
            "algInstances": [{"algId": "HOT_ITEMS", "weight": 1.0}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hot",
            "displayName": "Hot items",
            "active": true,
            "numberOfRec": 8,
            "algType": "RANK",
            "algInstances": [{"algId": "HOT_ITEMS", "weight": 1.0, "setting": {}}],
            "id": 6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let logic = Logic::new(
        "hot",
        "Hot items",
        8,
        LogicAlgType::Rank,
        vec![AlgInstance {
            alg_id: "HOT_ITEMS".to_string(),
            weight: 1.0,
            setting: json!({}),
        }],
    );
    let saved = er.add_logic(3, &logic).await.unwrap();
    assert_eq!(saved.id, Some(6));
}

#[tokio::test]
async fn test_del_logic_returns_raw_answer() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/ER/V3/recsrv/v1/logic/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .mount(&server)
        .await;

    let res = er.del_logic(5).await.unwrap();
    assert_eq!(res["deleted"], true);
}

#[tokio::test]
async fn test_add_campaign_posts_to_group() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    Mock::given(method("POST"))
        .and(path("/ER/V3/recsrv/v1/group/3/campaign"))
        .and(body_partial_json(json!({
            "startTime": 1500000000000i64,
            "endTime": 1500086400000i64
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groupId": 3,
            "name": "summer",
            "displayName": "Summer sale",
            "startTime": 1500000000000i64,
            "endTime": 1500086400000i64,
            "logics": [],
            "id": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let saved = er
        .add_campaign(&campaign(1_500_000_000_000, 1_500_086_400_000))
        .await
        .unwrap();
    assert_eq!(saved.id, Some(40));
}

#[tokio::test]
async fn test_add_campaign_rejects_inverted_range() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    let err = er
        .add_campaign(&campaign(1_500_086_400_000, 1_500_000_000_000))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_add_user_filter_uploads_file() {
    let server = MockServer::start().await;
    let er = recommender(&server).await;

    Mock::given(method("POST"))
        .and(path("/ER/V3/recsrv/v1/group/3/userfilter"))
        .and(body_string_contains(r#"name="displayName""#))
        .and(body_string_contains(r#"name="file"; filename="members.csv""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "members", "displayName": "Members", "id": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = UserFilter {
        name: "members".to_string(),
        display_name: "Members".to_string(),
        id: None,
        create_time: None,
        update_time: None,
    };
    let saved = er
        .add_user_filter(3, &filter, FileAttachment::new("members.csv", b"uid\nu1\n".to_vec()))
        .await
        .unwrap();
    assert_eq!(saved.id, Some(11));
}
