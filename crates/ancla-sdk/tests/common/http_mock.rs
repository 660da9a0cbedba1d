//! HTTP mock server helpers for testing the client against stubbed routes.
//!
//! A thin builder over `wiremock`: declare the request you expect, declare the
//! response, then `mount()`.
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/api/v1/workspaces/")
//!     .with_header("X-API-Key", "test-api-key")
//!     .respond_with_json(json!([]))
//!     .mount()
//!     .await;
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(422).with_json_response(value)`
//! - **Body matching**: `.with_body_json(value)` matches the request body exactly
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(5))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock, e.g. `http://127.0.0.1:54321`.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Escape hatch for matchers the builder doesn't cover.
    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Panics if any mounted `expect_times` expectation wasn't met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Every request the mock received, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    pub fn expect_get(&self, route: &str) -> MockBuilder<'_> {
        MockBuilder::new(&self.server, "GET", route)
    }

    pub fn expect_post(&self, route: &str) -> MockBuilder<'_> {
        MockBuilder::new(&self.server, "POST", route)
    }

    pub fn expect_patch(&self, route: &str) -> MockBuilder<'_> {
        MockBuilder::new(&self.server, "PATCH", route)
    }

    pub fn expect_delete(&self, route: &str) -> MockBuilder<'_> {
        MockBuilder::new(&self.server, "DELETE", route)
    }
}

enum Body {
    Json(Value),
    Text(String),
}

#[must_use = "call .mount().await to register the stub"]
pub struct MockBuilder<'a> {
    server: &'a MockServer,
    method: &'static str,
    route: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    request_body: Option<Value>,
    status: u16,
    response_body: Option<Body>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> MockBuilder<'a> {
    fn new(server: &'a MockServer, method: &'static str, route: &str) -> Self {
        Self {
            server,
            method,
            route: route.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            request_body: None,
            status: 200,
            response_body: None,
            delay: None,
            times: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Match only requests whose JSON body equals `body`.
    pub fn with_body_json(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    /// 200 with a JSON body.
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.response_body = Some(Body::Json(body));
        self
    }

    /// Plain-text body; status stays whatever was set.
    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.response_body = Some(Body::Text(body.to_string()));
        self
    }

    pub const fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// JSON body for a response whose status was set separately.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub const fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub const fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut mock = Mock::given(method(self.method)).and(path(self.route.as_str()));
        for (name, value) in &self.headers {
            mock = mock.and(header(name.as_str(), value.as_str()));
        }
        for (name, value) in &self.query {
            mock = mock.and(query_param(name.as_str(), value.as_str()));
        }
        if let Some(body) = &self.request_body {
            mock = mock.and(body_json(body));
        }

        let mut template = ResponseTemplate::new(self.status);
        template = match self.response_body {
            Some(Body::Json(body)) => template.set_body_json(body),
            Some(Body::Text(body)) => template.set_body_string(body),
            None => template,
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = mock.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
