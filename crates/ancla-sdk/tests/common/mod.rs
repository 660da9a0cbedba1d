//! Shared helpers for the client integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock-backed stub server
//! - [`client_for`] - a client pointed at that server, isolated from the
//!   process environment

#![allow(dead_code)]

pub mod http_mock;

use ancla_sdk::AnclaClient;
use http_mock::MockHttpServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Prefix every route with the API version segment.
pub fn api(route: &str) -> String {
    format!("/api/v1{route}")
}

pub fn client_for(server: &MockHttpServer) -> AnclaClient {
    AnclaClient::builder()
        .api_key(TEST_API_KEY)
        .server(server.url())
        .env_lookup(|_| None)
        .build()
        .expect("client should build")
}

/// A client with no API key at all.
pub fn anonymous_client_for(server: &MockHttpServer) -> AnclaClient {
    AnclaClient::builder()
        .server(server.url())
        .env_lookup(|_| None)
        .build()
        .expect("client should build")
}
