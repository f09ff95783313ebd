//! Client configuration
//!
//! Native tooling reads the backend location from the environment; the
//! browser app passes it to the constructor instead.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for `api_base`, which must be http(s)
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: validate_base_url(api_base)?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - CASE_REVIEW_API_BASE: backend origin (default: http://localhost:8000)
    /// - CASE_REVIEW_TIMEOUT_MS: request timeout in milliseconds (default: 10000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base =
            lookup("CASE_REVIEW_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout_ms = match lookup("CASE_REVIEW_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "CASE_REVIEW_TIMEOUT_MS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self::new(&api_base)?.with_timeout(Duration::from_millis(timeout_ms)))
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}
