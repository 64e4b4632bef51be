//! Integration tests for the provider endpoint against a mock scheduling service

mod common;

use axum::http::{Method, StatusCode};
use common::{batch_body, call, provider_app, scheduling_document, upstream_for};
use pretty_assertions::assert_eq;
use rstest::rstest;
use scheduling_provider::config::UpstreamConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn scheduling_service(body: serde_json::Value, expected_calls: u64) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(common::SCHEDULE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_region_lookup_scenario() {
    let mock_server = scheduling_service(scheduling_document("us-central1", ""), 1).await;
    let app = provider_app(upstream_for(&mock_server));

    let (status, body) = call(
        app,
        Method::POST,
        r#"{"request":{"keys":["region_not_scheduled"]}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"]["items"],
        json!([{"key": "region_not_scheduled", "value": "us-central1"}])
    );
    assert!(body["response"].get("systemError").is_none());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_unknown_key_makes_no_upstream_call() {
    let mock_server = scheduling_service(scheduling_document("us-central1", ""), 0).await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(app, Method::POST, batch_body(&["bogus_key"])).await;

    assert_eq!(body["response"]["systemError"], "invalid key: bogus_key");
    assert!(body["response"].get("items").is_none());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_unknown_key_after_known_keys_returns_no_partial_items() {
    let mock_server = scheduling_service(scheduling_document("us-central1", ""), 0).await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(
        app,
        Method::POST,
        batch_body(&["region_not_scheduled", "time_not_scheduled", "later_key"]),
    )
    .await;

    assert_eq!(body["response"]["systemError"], "invalid key: later_key");
    assert!(body["response"].get("items").is_none());
}

#[tokio::test]
async fn test_empty_batch_makes_no_upstream_call() {
    let mock_server = scheduling_service(scheduling_document("us-central1", ""), 0).await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(app, Method::POST, r#"{"request":{"keys":[]}}"#).await;

    assert_eq!(body["response"]["items"], json!([]));
    mock_server.verify().await;
}

#[rstest]
#[case(1)]
#[case(100)]
#[tokio::test]
async fn test_one_upstream_call_per_batch(#[case] size: usize) {
    let mock_server =
        scheduling_service(scheduling_document("eu-west4", "2025-06-01T02:00:00Z"), 1).await;
    let app = provider_app(upstream_for(&mock_server));

    let keys: Vec<&str> = (0..size)
        .map(|i| {
            if i % 2 == 0 {
                "time_not_scheduled"
            } else {
                "region_not_scheduled"
            }
        })
        .collect();

    let (_, body) = call(app, Method::POST, batch_body(&keys)).await;

    let items = body["response"]["items"].as_array().unwrap();
    assert_eq!(items.len(), size);
    for (item, key) in items.iter().zip(&keys) {
        assert_eq!(item["key"], *key);
        let expected = if *key == "time_not_scheduled" {
            "2025-06-01T02:00:00Z"
        } else {
            "eu-west4"
        };
        assert_eq!(item["value"], expected);
    }

    mock_server.verify().await;
}

#[tokio::test]
async fn test_repeated_request_is_idempotent() {
    let mock_server = scheduling_service(scheduling_document("us-central1", "03:00"), 2).await;
    let app = provider_app(upstream_for(&mock_server));
    let body = batch_body(&["time_not_scheduled", "region_not_scheduled"]);

    let (_, first) = call(app.clone(), Method::POST, body.clone()).await;
    let (_, second) = call(app, Method::POST, body).await;

    assert_eq!(first, second);
    assert_eq!(first["response"]["idempotent"], true);
    mock_server.verify().await;
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[tokio::test]
async fn test_non_post_is_error_envelope(#[case] verb: Method) {
    let mock_server = scheduling_service(scheduling_document("us-central1", ""), 0).await;
    let app = provider_app(upstream_for(&mock_server));

    let (status, body) = call(app, verb, batch_body(&["region_not_scheduled"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["systemError"], "only POST is allowed");
    assert!(body["response"].get("items").is_none());
    mock_server.verify().await;
}

#[rstest]
#[case(500)]
#[case(503)]
#[case(404)]
#[tokio::test]
async fn test_upstream_status_error(#[case] status: u16) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(app, Method::POST, batch_body(&["region_not_scheduled"])).await;

    assert_eq!(
        body["response"]["systemError"],
        format!("error getting scheduling response: unexpected status code: {status}")
    );
    assert!(body["response"].get("items").is_none());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_upstream_malformed_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("scheduler warming up"))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(app, Method::POST, batch_body(&["time_not_scheduled"])).await;

    let message = body["response"]["systemError"].as_str().unwrap();
    assert!(message.contains("error unmarshalling response body"));
}

#[tokio::test]
async fn test_upstream_timeout_is_error_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(scheduling_document("us-central1", ""))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    let app = provider_app(upstream_for(&mock_server));

    let (_, body) = call(app, Method::POST, batch_body(&["region_not_scheduled"])).await;

    let message = body["response"]["systemError"].as_str().unwrap();
    assert!(message.contains("error making request to scheduling service"));
    assert!(body["response"].get("items").is_none());
}

#[tokio::test]
async fn test_upstream_unreachable_is_error_envelope() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let app = provider_app(UpstreamConfig::new(
        "http://127.0.0.1",
        "",
        port.to_string(),
        common::SCHEDULE_PATH,
    ));

    let (status, body) = call(app, Method::POST, batch_body(&["region_not_scheduled"])).await;

    assert_eq!(status, StatusCode::OK);
    let message = body["response"]["systemError"].as_str().unwrap();
    assert!(message.starts_with("error getting scheduling response"));
    assert!(body["response"].get("items").is_none());
}
