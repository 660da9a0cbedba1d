//! Mapping of failed responses onto `AnclaError`.

mod common;

use ancla_sdk::{AnclaError, ApiErrorKind};
use common::http_mock::MockHttpServer;
use common::{api, client_for};
use serde_json::json;

#[tokio::test]
async fn test_status_to_kind() {
    let cases = [
        (401, ApiErrorKind::Authentication),
        (403, ApiErrorKind::Other),
        (404, ApiErrorKind::NotFound),
        (422, ApiErrorKind::Validation),
        (429, ApiErrorKind::Other),
        (500, ApiErrorKind::Server),
        (502, ApiErrorKind::Server),
    ];

    for (status, expected) in cases {
        let server = MockHttpServer::start().await;
        server
            .expect_get(&api("/workspaces/acme"))
            .respond_with_status(status)
            .with_json_response(json!({"message": format!("failed with {status}")}))
            .mount()
            .await;

        let client = client_for(&server);
        let err = client.get_workspace("acme").await.expect_err("should fail");

        assert_eq!(err.kind(), Some(expected), "status {status}");
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.to_string(), format!("failed with {status}"));
    }
}

#[tokio::test]
async fn test_unauthorized_uses_detail() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/auth/session"))
        .respond_with_status(401)
        .with_json_response(json!({"detail": "Invalid API key"}))
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.get_session().await.expect_err("should fail");

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid API key");
    assert_eq!(err.detail(), Some("Invalid API key"));
}

#[tokio::test]
async fn test_not_found_message() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/missing"))
        .respond_with_status(404)
        .with_json_response(json!({"message": "Workspace not found"}))
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.get_workspace("missing").await.expect_err("should fail");

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Workspace not found");
}

#[tokio::test]
async fn test_validation_error_carries_detail() {
    let server = MockHttpServer::start().await;

    server
        .expect_post(&api("/workspaces/"))
        .respond_with_status(422)
        .with_json_response(json!({"detail": "name is required"}))
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.create_workspace("").await.expect_err("should fail");

    match err {
        AnclaError::Api {
            kind,
            status,
            message,
            detail,
        } => {
            assert_eq!(kind, ApiErrorKind::Validation);
            assert_eq!(status, 422);
            assert_eq!(message, "name is required");
            assert_eq!(detail.as_deref(), Some("name is required"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_plain_text_body() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .respond_with_status(500)
        .respond_with_body("Internal Server Error")
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.list_workspaces().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ApiErrorKind::Server));
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn test_empty_error_body_uses_generic_message() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .respond_with_status(503)
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.list_workspaces().await.expect_err("should fail");

    assert_eq!(err.kind(), Some(ApiErrorKind::Server));
    assert_eq!(err.to_string(), "API request failed (503)");
    assert!(err.detail().is_none());
}

#[tokio::test]
async fn test_malformed_json_error_falls_back_to_text() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .respond_with_status(502)
        .respond_with_body("{not json")
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.list_workspaces().await.expect_err("should fail");

    assert!(matches!(err, AnclaError::Api { status: 502, .. }));
    assert_eq!(err.to_string(), "{not json");
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = MockHttpServer::start().await;

    server
        .expect_get(&api("/workspaces/"))
        .respond_with_json(json!({"unexpected": "object"}))
        .mount()
        .await;

    let client = client_for(&server);
    let err = client.list_workspaces().await.expect_err("should fail");

    match err {
        AnclaError::Decode { path, .. } => assert_eq!(path, "/workspaces/"),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_ignores_response_body() {
    let server = MockHttpServer::start().await;

    server
        .expect_delete(&api("/workspaces/acme"))
        .respond_with_status(200)
        .respond_with_body("not even json")
        .mount()
        .await;

    let client = client_for(&server);
    client.delete_workspace("acme").await.expect("should succeed");
}
