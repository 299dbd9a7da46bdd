//! Credential types and JWT claim decoding
//!
//! The access token is a JWT issued by the finance backend; the client only
//! needs its `exp` claim to decide whether a stored session is still usable.
//! Signatures are never verified here, the backend remains the authority.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access and refresh token pair owned by the client session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Short-lived JWT sent as bearer credential
    pub token: String,
    /// Opaque token used only against the refresh endpoint
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { token: token.into(), refresh_token }
    }

    /// Decode the access token's claims
    ///
    /// # Errors
    /// See [`decode_claims`]
    pub fn claims(&self) -> Result<TokenClaims, TokenError> {
        decode_claims(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[redacted]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Registered claims the client reads from the access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Expiration as a UTC timestamp
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Whether the token is still valid at `now`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.exp > now.timestamp()
    }
}

/// Errors raised while decoding an access token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("token payload is not valid claims JSON: {0}")]
    Claims(String),
}

/// Decode the payload segment of a JWT without verifying its signature
///
/// # Errors
/// Returns `TokenError::Malformed` when the token does not have three
/// segments, `TokenError::Encoding` when the payload is not base64url and
/// `TokenError::Claims` when it lacks a numeric `exp`.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(TokenError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
}

/// Whether `token` decodes and has not expired yet
///
/// Undecodable tokens are treated as invalid.
#[must_use]
pub fn is_token_valid(token: &str) -> bool {
    decode_claims(token).is_ok_and(|claims| claims.is_valid_at(Utc::now()))
}

/// Expiration of `token`, if it can be decoded
#[must_use]
pub fn token_expiration(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token).ok().and_then(|claims| claims.expires_at())
}
