//! End-to-end tests for resolving the startup secret against a fake HCP API.
//!
//! A wiremock server stands in for api.cloud.hashicorp.com; each test points
//! `HCP_API_BASE` at it and checks what would be stored in the global.

use std::collections::HashMap;

use secrets_bootstrap::config::Config;
use secrets_bootstrap::{resolve, SecretValue};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPEN_PATH: &str = "/secrets/2023-06-13/organizations/org-1/projects/proj-1/apps/Demo/open";

fn config_for(base: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("HCP_API_BASE", base.to_string()),
        ("HCP_ORG", "org-1".to_string()),
        ("HCP_PROJECT", "proj-1".to_string()),
        ("HCP_API_KEY", "test-token".to_string()),
        ("HCP_TIMEOUT_SECS", "5".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned())
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(OPEN_PATH))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// ═══════════════════════════════════════════════════════════════════
//  Happy path
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_first_secret_value_is_stored_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPEN_PATH))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secrets": [
                {"name": "api_key", "version": {"version": 2, "value": "sk_live_abc123"}},
                {"name": "other", "version": {"version": 1, "value": "not-this-one"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = resolve(&config_for(&server.uri())).await;
    assert_eq!(value, SecretValue::Loaded("sk_live_abc123".to_string()));
}

// ═══════════════════════════════════════════════════════════════════
//  Fallback placeholders
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_missing_org_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let base = server.uri();
    let cfg = Config::from_lookup(|key| match key {
        "HCP_API_BASE" => Some(base.clone()),
        "HCP_PROJECT" => Some("proj-1".to_string()),
        _ => None,
    });

    let value = resolve(&cfg).await;
    assert_eq!(
        value,
        SecretValue::Placeholder("Demo: You have not loaded your secrets".to_string())
    );
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(403).set_body_string("forbidden")).await;

    let value = resolve(&config_for(&server.uri())).await;
    assert_eq!(value.as_str(), "Demo: Failed to fetch secrets (403)");
    assert!(!value.is_loaded());
}

#[tokio::test]
async fn test_server_error_status_is_not_retried() {
    let server = MockServer::start().await;
    // expect(1) fails the test on drop if a retry happens
    mount(&server, ResponseTemplate::new(503)).await;

    let value = resolve(&config_for(&server.uri())).await;
    assert_eq!(value.as_str(), "Demo: Failed to fetch secrets (503)");
}

#[tokio::test]
async fn test_empty_secret_list_is_invalid() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"secrets": []}))).await;

    let value = resolve(&config_for(&server.uri())).await;
    assert_eq!(value.as_str(), "Demo: Invalid secrets response");
}

#[tokio::test]
async fn test_missing_version_value_is_invalid() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"secrets": [{"name": "api_key", "version": {"value": ""}}]})),
    )
    .await;

    let value = resolve(&config_for(&server.uri())).await;
    assert_eq!(value.as_str(), "Demo: Invalid secrets response");
}

#[tokio::test]
async fn test_malformed_json_carries_error_message() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let value = resolve(&config_for(&server.uri())).await;
    let msg = value.as_str();
    assert!(msg.starts_with("Demo: Error loading secrets: "), "got: '{}'", msg);
    assert!(
        msg.len() > "Demo: Error loading secrets: ".len(),
        "error message should not be empty: '{}'",
        msg
    );
}

#[tokio::test]
async fn test_connection_failure_carries_error_message() {
    // Grab a free port, then close it so the connection is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let value = resolve(&config_for(&format!("http://{}", addr))).await;
    let msg = value.as_str();
    assert!(msg.starts_with("Demo: Error loading secrets: "), "got: '{}'", msg);
    assert!(!value.is_loaded());
}

#[tokio::test]
async fn test_placeholders_use_configured_app_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/2023-06-13/organizations/org-1/projects/proj-1/apps/billing/open"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = config_for(&server.uri());
    cfg.app_name = "billing".to_string();

    let value = resolve(&cfg).await;
    assert_eq!(value.as_str(), "billing: Failed to fetch secrets (404)");
}

#[tokio::test]
async fn test_whitespace_org_still_sends_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let cfg = Config::from_lookup(|key| match key {
        "HCP_API_BASE" => Some(base.clone()),
        "HCP_ORG" => Some("  ".to_string()),
        _ => None,
    });

    let value = resolve(&cfg).await;
    assert_eq!(value.as_str(), "Demo: Failed to fetch secrets (403)");
}
