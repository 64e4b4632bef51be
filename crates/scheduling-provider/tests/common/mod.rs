//! Shared helpers for provider integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use scheduling_provider::config::UpstreamConfig;
use scheduling_provider::{AppState, ProviderConfig, server};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

/// Path the mock scheduling service answers on
pub const SCHEDULE_PATH: &str = "/schedule";

/// Split a mock server URI into the four location parts.
pub fn upstream_for(mock_server: &MockServer) -> UpstreamConfig {
    let address = mock_server.address();
    UpstreamConfig::new(
        format!("http://{}", address.ip()),
        "",
        address.port().to_string(),
        SCHEDULE_PATH,
    )
}

/// Provider app wired to the given scheduling service location.
pub fn provider_app(upstream: UpstreamConfig) -> Router {
    let config = ProviderConfig::builder()
        .upstream(upstream)
        .upstream_timeout(Duration::from_millis(500))
        .connect_timeout(Duration::from_millis(500))
        .build();
    server::router(AppState::from_config(&config).expect("Failed to build provider state"))
}

/// Upstream document with the given region and time.
pub fn scheduling_document(region: &str, time: &str) -> Value {
    serde_json::json!({
        "schedulingRegion": region,
        "schedulingTime": time,
        "schedulingProvider": ""
    })
}

/// Send a request to the provider endpoint and decode the envelope.
pub async fn call(app: Router, method: Method, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(server::PROVIDER_PATH)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    (
        status,
        serde_json::from_slice(&bytes).expect("Response is not JSON"),
    )
}

/// Body of a batch request for the given keys.
pub fn batch_body(keys: &[&str]) -> String {
    serde_json::json!({"request": {"keys": keys}}).to_string()
}
