//! Transport-level behaviour: auth header, base URL, timeouts, one request
//! per call.

mod common;

use std::time::Duration;

use ancla_sdk::{AnclaClient, AnclaError};
use common::http_mock::MockHttpServer;
use common::{anonymous_client_for, api, client_for, TEST_API_KEY};
use serde_json::json;

#[tokio::test]
async fn test_api_key_header_sent() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .with_header("X-API-Key", TEST_API_KEY)
        .respond_with_json(json!([]))
        .expect_times(1)
        .mount()
        .await;

    let client = client_for(&server);
    let workspaces = client.list_workspaces().await.expect("should succeed");

    assert!(workspaces.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_anonymous_client_omits_api_key_header() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/auth/session"))
        .respond_with_json(json!({"authenticated": false, "user": null}))
        .mount()
        .await;

    let client = anonymous_client_for(&server);
    let session = client.get_session().await.expect("should succeed");

    assert!(!session.authenticated);
    assert!(session.user.is_none());

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-api-key"));
}

#[tokio::test]
async fn test_wrong_api_key_not_matched() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .with_header("X-API-Key", "correct-key")
        .respond_with_json(json!([]))
        .mount()
        .await;

    let client = AnclaClient::builder()
        .api_key("wrong-key")
        .server(server.url())
        .env_lookup(|_| None)
        .build()
        .expect("client");

    let err = client.list_workspaces().await.expect_err("should fail");

    // Unmatched requests get wiremock's default 404.
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_with_trailing_slash() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/acme"))
        .respond_with_json(json!({"slug": "acme"}))
        .expect_times(1)
        .mount()
        .await;

    let client = AnclaClient::builder()
        .api_key(TEST_API_KEY)
        .server(format!("{}/", server.url()))
        .env_lookup(|_| None)
        .build()
        .expect("client");

    let ws = client.get_workspace("acme").await.expect("should succeed");

    assert_eq!(ws.slug, "acme");
    server.verify().await;
}

#[tokio::test]
async fn test_env_lookup_supplies_key_and_server() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .with_header("X-API-Key", "from-env")
        .respond_with_json(json!([{"slug": "acme"}]))
        .mount()
        .await;

    let url = server.url();
    let client = AnclaClient::builder()
        .env_lookup(move |key| match key {
            "ANCLA_API_KEY" => Some("from-env".to_string()),
            "ANCLA_SERVER" => Some(url.clone()),
            _ => None,
        })
        .build()
        .expect("client");

    let workspaces = client.list_workspaces().await.expect("should succeed");
    assert_eq!(workspaces.len(), 1);
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .respond_with_json(json!([]))
        .respond_with_delay(Duration::from_secs(5))
        .mount()
        .await;

    let client = AnclaClient::builder()
        .api_key(TEST_API_KEY)
        .server(server.url())
        .timeout(Duration::from_millis(100))
        .env_lookup(|_| None)
        .build()
        .expect("client");

    let result = client.list_workspaces().await;

    assert!(matches!(result, Err(AnclaError::Request(_))));
}

#[tokio::test]
async fn test_injected_http_client_is_used() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .with_header("X-API-Key", TEST_API_KEY)
        .respond_with_json(json!([]))
        .respond_with_delay(Duration::from_secs(5))
        .mount()
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");

    let client = AnclaClient::builder()
        .api_key(TEST_API_KEY)
        .server(server.url())
        .http_client(http_client)
        .env_lookup(|_| None)
        .build()
        .expect("client");

    let result = client.list_workspaces().await;

    assert!(matches!(result, Err(AnclaError::Request(_))));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let client = AnclaClient::builder()
        .api_key(TEST_API_KEY)
        .server("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .env_lookup(|_| None)
        .build()
        .expect("client");

    let err = client.list_workspaces().await.expect_err("should fail");

    assert!(matches!(err, AnclaError::Request(_)));
    assert!(err.kind().is_none());
}

#[tokio::test]
async fn test_each_call_issues_one_request() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/acme"))
        .respond_with_json(json!({"slug": "acme"}))
        .expect_times(2)
        .mount()
        .await;

    let client = client_for(&server);
    client.get_workspace("acme").await.expect("first call");
    client.get_workspace("acme").await.expect("second call");

    server.verify().await;
    client.close();
}

#[tokio::test]
async fn test_json_content_type_only_with_body() {
    let server = MockHttpServer::start().await;

    server
        .expect_post(&api("/workspaces/"))
        .with_header("Content-Type", "application/json")
        .with_body_json(json!({"name": "Acme"}))
        .respond_with_status(201)
        .with_json_response(json!({"name": "Acme", "slug": "acme"}))
        .mount()
        .await;
    server
        .expect_get(&api("/workspaces/"))
        .respond_with_json(json!([]))
        .mount()
        .await;

    let client = client_for(&server);
    client.create_workspace("Acme").await.expect("create");
    client.list_workspaces().await.expect("list");

    let requests = server.requests().await;
    let get = requests
        .iter()
        .find(|r| r.method.as_str() == "GET")
        .expect("GET request");
    assert!(!get.headers.contains_key("content-type"));
    assert!(get.body.is_empty());
}
