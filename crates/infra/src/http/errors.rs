//! HTTP client error types
//!
//! Provides error classification for API operations with retry metadata.

use fincontrol_common::validation::ValidationError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 after replay, or the session could not be refreshed
    Authentication,
    /// 403 - passed through untouched
    Authorization,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) and undecodable responses - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Configuration errors - non-retryable
    Config,
    /// Rejected locally before any request was sent
    Validation,
}

/// Why a token refresh did not produce a new access token
///
/// Cloned to every request queued behind the refresh, so all of them observe
/// the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("refresh endpoint answered with status {status}")]
    Rejected { status: u16, body: String },

    #[error("refresh request failed: {0}")]
    Transport(String),

    #[error("refresh response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("no refresh token stored")]
    MissingRefreshToken,

    #[error("credential store failed during refresh: {0}")]
    Store(String),

    #[error("refresh was abandoned before it completed")]
    Abandoned,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-success response from the backend
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("session refresh failed: {0}")]
    RefreshFailed(#[from] RefreshError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Build a status error from a response status and its body
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status { status: status.as_u16(), body: body.into() }
    }

    /// HTTP status carried by the error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::RefreshFailed(RefreshError::Rejected { status, .. }) => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Status { status, .. } => match *status {
                401 => ApiErrorCategory::Authentication,
                403 => ApiErrorCategory::Authorization,
                429 => ApiErrorCategory::RateLimit,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::RefreshFailed(_) => ApiErrorCategory::Authentication,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Server,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Validation(_) => ApiErrorCategory::Validation,
        }
    }

    /// Check if this error should be retried
    ///
    /// Authentication failures are never retried here: the client has
    /// already refreshed and replayed once.
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }

    /// Get suggested retry delay in seconds
    pub fn retry_delay_secs(&self) -> u64 {
        match self.category() {
            ApiErrorCategory::RateLimit => 60,
            ApiErrorCategory::Server => 10,
            ApiErrorCategory::Network => 5,
            ApiErrorCategory::Authentication
            | ApiErrorCategory::Authorization
            | ApiErrorCategory::Client
            | ApiErrorCategory::Config
            | ApiErrorCategory::Validation => 0,
        }
    }

    /// Message to show the user
    ///
    /// Prefers the `message` field of a JSON error body sent by the backend,
    /// then the first local validation message, then `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        let from_body = match self {
            Self::Status { body, .. } | Self::RefreshFailed(RefreshError::Rejected { body, .. }) => {
                server_message(body)
            }
            Self::Validation(err) => err.errors.first().map(|e| e.message.clone()),
            _ => None,
        };
        from_body.unwrap_or_else(|| fallback.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body).ok()?.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}
