//! HTTP client for the Ancla REST API.
//!
//! # Example
//!
//! ```ignore
//! use ancla_sdk::AnclaClient;
//!
//! let client = AnclaClient::builder().api_key("my-api-key").build()?;
//! for ws in client.list_workspaces().await? {
//!     println!("{} ({} projects)", ws.slug, ws.project_count);
//! }
//! client.close();
//! ```
//!
//! Resource methods live in the `resources` module; this one holds the
//! construction logic and the single request path every method goes through.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AnclaError;
use crate::settings::ClientSettings;
use crate::types::ItemList;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Client for the Ancla PaaS REST API.
///
/// The underlying connection pool is released when the client is dropped or
/// passed to [`AnclaClient::close`]. Every method issues exactly one request.
pub struct AnclaClient {
    http: reqwest::Client,
    settings: ClientSettings,
    base_url: String,
    api_key: Option<HeaderValue>,
}

impl AnclaClient {
    /// Create a client from the environment and defaults alone.
    ///
    /// # Errors
    /// Returns an error if `ANCLA_API_KEY` isn't a valid header value or the
    /// HTTP client can't be initialised.
    pub fn from_env() -> Result<Self, AnclaError> {
        Self::builder().build()
    }

    /// Create a client with an explicit API key; the server still falls back
    /// to `ANCLA_SERVER` and then the default.
    ///
    /// # Errors
    /// Returns an error if the key isn't a valid header value or the HTTP
    /// client can't be initialised.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AnclaError> {
        Self::builder().api_key(api_key).build()
    }

    #[must_use]
    pub fn builder() -> AnclaClientBuilder {
        AnclaClientBuilder::default()
    }

    /// Resolved settings this client was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Server URL without trailing slash, e.g. `https://ancla.dev`.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.settings.server
    }

    /// API key in use; empty for anonymous clients.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.settings.api_key
    }

    /// API root every path is appended to, e.g. `https://ancla.dev/api/v1`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Release the connection pool. Consumes the client.
    pub fn close(self) {
        tracing::debug!(server = %self.settings.server, "closing ancla client");
        drop(self);
    }

    // ------------------------------------------------------------------
    // Request plumbing shared by the resource modules
    // ------------------------------------------------------------------

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AnclaError> {
        let body = self.send(Method::GET, path, &[], None::<&()>).await?;
        decode(path, &body)
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AnclaError> {
        let body = self.send(Method::GET, path, query, None::<&()>).await?;
        decode(path, &body)
    }

    /// GET an endpoint that wraps its list in `{"items": [...]}`.
    pub(crate) async fn get_items<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, AnclaError> {
        let list: ItemList<T> = self.get(path).await?;
        Ok(list.items)
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AnclaError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(Method::POST, path, &[], Some(body)).await?;
        decode(path, &text)
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, AnclaError> {
        let text = self.send(Method::POST, path, &[], None::<&()>).await?;
        decode(path, &text)
    }

    /// POST whose response body is ignored.
    pub(crate) async fn post_discard<B>(&self, path: &str, body: &B) -> Result<(), AnclaError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, AnclaError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(Method::PATCH, path, &[], Some(body)).await?;
        decode(path, &text)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AnclaError> {
        self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    /// Issue one request and return the body text of a successful response.
    ///
    /// Status >= 400 becomes [`AnclaError::Api`]; transport failures become
    /// [`AnclaError::Request`].
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<String, AnclaError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.clone());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|source| AnclaError::Encode {
                path: path.to_string(),
                source,
            })?;
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "ancla api request");

        // Reading as text first lets error bodies that aren't JSON fall back
        // to the raw string.
        let text = response.text().await?;

        if status.as_u16() >= 400 {
            let err = AnclaError::from_response(status.as_u16(), &text);
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                error = %err,
                "ancla api error"
            );
            return Err(err);
        }

        Ok(text)
    }
}

impl fmt::Debug for AnclaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnclaClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.api_key.is_some())
            .field("timeout", &self.settings.timeout)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, AnclaError> {
    serde_json::from_str(body).map_err(|source| AnclaError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Builder for [`AnclaClient`].
///
/// Unset values are resolved from the environment, then defaults, once in
/// [`AnclaClientBuilder::build`].
#[derive(Default)]
pub struct AnclaClientBuilder {
    api_key: Option<String>,
    server: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    env_lookup: Option<EnvLookup>,
}

impl AnclaClientBuilder {
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Server base URL, without the `/api/v1` suffix.
    #[must_use]
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Per-request timeout (default 30 s). Ignored when a custom HTTP client
    /// is supplied; configure the timeout on that client instead.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a pre-built `reqwest::Client` (for testing with custom config).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the process environment as the fallback source (useful for tests).
    #[must_use]
    pub fn env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Some(Box::new(lookup));
        self
    }

    /// Resolve settings and build the client.
    ///
    /// # Errors
    /// Returns [`AnclaError::InvalidApiKey`] if the key can't be sent as a
    /// header, or [`AnclaError::Request`] if the HTTP client fails to build.
    pub fn build(self) -> Result<AnclaClient, AnclaError> {
        let mut settings = match self.env_lookup {
            Some(lookup) => ClientSettings::resolve_with(self.api_key, self.server, lookup),
            None => ClientSettings::resolve(self.api_key, self.server),
        };
        if let Some(timeout) = self.timeout {
            settings.timeout = timeout;
        }

        let api_key = if settings.has_api_key() {
            let mut value = HeaderValue::from_str(&settings.api_key)?;
            value.set_sensitive(true);
            Some(value)
        } else {
            None
        };

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(settings.timeout).build()?,
        };

        let base_url = settings.base_url();
        tracing::debug!(%base_url, authenticated = api_key.is_some(), "ancla client ready");

        Ok(AnclaClient {
            http,
            settings,
            base_url,
            api_key,
        })
    }
}

impl fmt::Debug for AnclaClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnclaClientBuilder")
            .field("server", &self.server)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{API_KEY_ENV, SERVER_ENV};

    fn isolated() -> AnclaClientBuilder {
        AnclaClient::builder().env_lookup(|_| None)
    }

    #[test]
    fn test_default_server() {
        let client = isolated().api_key("k").build().expect("client");
        assert_eq!(client.server(), "https://ancla.dev");
        assert_eq!(client.base_url(), "https://ancla.dev/api/v1");
    }

    #[test]
    fn test_custom_server_strips_trailing_slash() {
        let client = isolated()
            .api_key("k")
            .server("https://example.com/")
            .build()
            .expect("client");
        assert_eq!(client.server(), "https://example.com");
        assert_eq!(client.base_url(), "https://example.com/api/v1");
    }

    #[test]
    fn test_api_key_from_env() {
        let client = AnclaClient::builder()
            .env_lookup(|key| (key == API_KEY_ENV).then(|| "env-key".to_string()))
            .build()
            .expect("client");
        assert_eq!(client.api_key(), "env-key");
    }

    #[test]
    fn test_server_from_env() {
        let client = AnclaClient::builder()
            .api_key("k")
            .env_lookup(|key| (key == SERVER_ENV).then(|| "https://env.ancla.dev".to_string()))
            .build()
            .expect("client");
        assert_eq!(client.server(), "https://env.ancla.dev");
    }

    #[test]
    fn test_explicit_overrides_env() {
        let client = AnclaClient::builder()
            .api_key("explicit-key")
            .env_lookup(|key| (key == API_KEY_ENV).then(|| "env-key".to_string()))
            .build()
            .expect("client");
        assert_eq!(client.api_key(), "explicit-key");
    }

    #[test]
    fn test_timeout_override() {
        let client = isolated()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client");
        assert_eq!(client.settings().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = isolated().api_key("bad\nkey").build();
        assert!(matches!(result, Err(AnclaError::InvalidApiKey(_))));
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let client = isolated().api_key("super-secret").build().expect("client");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("authenticated: true"));
    }

    #[test]
    fn test_close_consumes_client() {
        let client = isolated().build().expect("client");
        client.close();
    }
}
