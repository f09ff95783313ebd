//! Failure taxonomy shared by every repository implementation

use serde::Serialize;
use thiserror::Error;

/// Longest server message carried into a [`FetchError`]
const MAX_MESSAGE_LEN: usize = 200;

/// Why a fetch did not produce a usable payload
///
/// Failures travel unmodified from the repository to the view state machine;
/// nothing in between retries or downgrades them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never reached the server or no response came back
    #[error("Network failure: {message}")]
    Network { message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Any 4xx other than 404
    #[error("Request rejected ({status}): {message}")]
    Client { status: u16, message: String },

    /// The payload was missing required fields or did not parse
    #[error("Malformed response: {detail}")]
    Malformed { detail: String },
}

/// Coarse status class a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Network,
    Client,
    Server,
    Payload,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        FetchError::Malformed {
            detail: detail.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        FetchError::NotFound {
            resource: resource.into(),
        }
    }

    /// Map a non-success HTTP response to a failure
    ///
    /// `resource` names what was requested (e.g. `case case-001`) and is
    /// only used for 404s. The body's `error`, `detail` or `message` field is
    /// preferred as the message; otherwise the raw body, then the status.
    pub fn from_status(status: u16, body: &str, resource: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            404 => FetchError::not_found(resource),
            400..=499 => FetchError::Client { status, message },
            500..=599 => FetchError::Server { status, message },
            _ => FetchError::malformed(format!("unexpected HTTP status {}", status)),
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            FetchError::Network { .. } => FailureClass::Network,
            FetchError::Server { .. } => FailureClass::Server,
            FetchError::NotFound { .. } | FetchError::Client { .. } => FailureClass::Client,
            FetchError::Malformed { .. } => FailureClass::Payload,
        }
    }

    /// Stable code for the UI layer
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "NETWORK_FAILURE",
            FetchError::Server { .. } => "SERVER_FAILURE",
            FetchError::NotFound { .. } => "NOT_FOUND",
            FetchError::Client { .. } => "CLIENT_FAILURE",
            FetchError::Malformed { .. } => "MALFORMED_RESPONSE",
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "detail", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });

    let message = from_json.unwrap_or_else(|| body.to_string());
    Some(truncate(&message, MAX_MESSAGE_LEN))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Invalid client configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("HTTP client could not be built: {0}")]
    Transport(String),
}
