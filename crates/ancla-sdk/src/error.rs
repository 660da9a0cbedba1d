//! Error types returned by [`AnclaClient`](crate::AnclaClient).

use reqwest::header::InvalidHeaderValue;
use serde_json::Value;
use thiserror::Error;

/// Classification of an HTTP error status returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 401 Unauthorized
    Authentication,
    /// 404 Not Found
    NotFound,
    /// 422 Unprocessable Entity
    Validation,
    /// Any 5xx status
    Server,
    /// Any other 4xx status
    Other,
}

impl ApiErrorKind {
    /// Map an error status (>= 400) to its kind.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            404 => Self::NotFound,
            422 => Self::Validation,
            500..=u16::MAX => Self::Server,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Authentication => "authentication failed",
            Self::NotFound => "not found",
            Self::Validation => "validation failed",
            Self::Server => "server error",
            Self::Other => "request rejected",
        };
        f.write_str(label)
    }
}

/// Errors that can occur when calling the Ancla API.
#[derive(Debug, Error)]
pub enum AnclaError {
    /// The API answered with a status >= 400.
    #[error("{message}")]
    Api {
        kind: ApiErrorKind,
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// Transport failure: DNS, refused connection, timeout, broken body stream.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A success response whose body didn't match the expected record.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body couldn't be serialized.
    #[error("failed to encode request body for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured API key can't be sent as an HTTP header.
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
}

impl AnclaError {
    /// Build an API error from a failed response's status and raw body.
    ///
    /// The message prefers the JSON body's `message`, then `detail`, then the
    /// raw text, then a generic `API request failed (status)`.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        let message = detail
            .clone()
            .unwrap_or_else(|| format!("API request failed ({status})"));

        Self::Api {
            kind: ApiErrorKind::from_status(status),
            status,
            message,
            detail,
        }
    }

    /// Kind tag for API errors; `None` for transport and decode failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Detail string the server sent with an API error, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }

    /// True for a 401 response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ApiErrorKind::Authentication)
    }
}

/// Pull a human-readable detail out of an error body.
///
/// A JSON object contributes its `message` or `detail` field (non-string
/// values are rendered as compact JSON). Anything that isn't a JSON object
/// falls back to the raw text.
fn extract_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => ["message", "detail"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(render_field)),
        _ => {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

fn render_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}
