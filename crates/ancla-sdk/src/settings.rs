//! Connection settings for [`AnclaClient`](crate::AnclaClient).
//!
//! Every setting is resolved once, when the client is built, in priority order:
//!
//! 1. The explicit value passed to the builder
//! 2. The matching environment variable (`ANCLA_API_KEY`, `ANCLA_SERVER`)
//! 3. The compiled-in default
//!
//! Empty strings count as "not set" at every stage.

use std::env;
use std::fmt;
use std::time::Duration;

/// Production server used when nothing else is configured.
pub const DEFAULT_SERVER: &str = "https://ancla.dev";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANCLA_API_KEY";

/// Environment variable holding the server base URL.
pub const SERVER_ENV: &str = "ANCLA_SERVER";

/// Version segment appended to the server URL.
pub const API_PREFIX: &str = "/api/v1";

/// Per-request timeout applied when the caller doesn't pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// API key sent as `X-API-Key`. Empty means anonymous requests.
    pub api_key: String,
    /// Server URL without trailing slash and without the API prefix.
    pub server: String,
    /// Upper bound for a single request, connect through body.
    pub timeout: Duration,
}

impl ClientSettings {
    /// Resolve settings against the process environment.
    #[must_use]
    pub fn resolve(api_key: Option<String>, server: Option<String>) -> Self {
        Self::resolve_with(api_key, server, |key| env::var(key).ok())
    }

    /// Resolve settings using a custom variable lookup (useful for tests).
    pub fn resolve_with<F>(api_key: Option<String>, server: Option<String>, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_key = non_empty(api_key)
            .or_else(|| non_empty(lookup(API_KEY_ENV)))
            .unwrap_or_default();

        let server = non_empty(server)
            .or_else(|| non_empty(lookup(SERVER_ENV)))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        Self {
            api_key,
            server: normalize_server(&server),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Full API root, e.g. `https://ancla.dev/api/v1`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{API_PREFIX}", self.server)
    }

    /// Whether requests carry an `X-API-Key` header.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            server: DEFAULT_SERVER.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.has_api_key() { "<redacted>" } else { "<none>" };
        f.debug_struct("ClientSettings")
            .field("api_key", &api_key)
            .field("server", &self.server)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn normalize_server(server: &str) -> String {
    server.trim_end_matches('/').to_string()
}
