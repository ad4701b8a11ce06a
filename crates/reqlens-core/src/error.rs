//! Centralized error types for reqlens.

use thiserror::Error;

/// Main error type for reqlens operations.
#[derive(Error, Debug)]
pub enum ReqlensError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("credentials rejected by {url} (HTTP {status})")]
    Authentication { url: String, status: u16 },

    #[error("{url} answered HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("unexpected response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for reqlens operations.
pub type ReqlensResult<T> = Result<T, ReqlensError>;

impl ReqlensError {
    /// Create a malformed-response error.
    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short label naming the failure kind, used in report error lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Authentication { .. } => "authentication",
            Self::HttpStatus { .. } => "http status",
            Self::MalformedResponse { .. } => "malformed response",
            Self::Config(_) => "configuration",
        }
    }

    /// Classify a non-success HTTP status.
    pub(crate) fn from_status(url: &str, status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Authentication {
                url: url.to_string(),
                status: status.as_u16(),
            },
            code => Self::HttpStatus {
                url: url.to_string(),
                status: code,
            },
        }
    }
}
