//! Credential storage abstraction
//!
//! The HTTP client reads the access token before every request and rewrites
//! it after a refresh, so reads are synchronous and cheap. Implementations
//! must be safe to share across tasks.

use thiserror::Error;

use super::types::Credentials;

/// Errors raised by credential stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialStoreError {
    #[error("credential store access failed: {0}")]
    AccessFailed(String),

    #[error("credential store is read-only")]
    ReadOnly,
}

/// Durable get/set/clear of the session's access and refresh tokens
pub trait CredentialStore: Send + Sync {
    /// Stored access token, `None` when signed out
    fn access_token(&self) -> Result<Option<String>, CredentialStoreError>;

    /// Stored refresh token, `None` when signed out or never issued
    fn refresh_token(&self) -> Result<Option<String>, CredentialStoreError>;

    fn set_access_token(&self, token: &str) -> Result<(), CredentialStoreError>;

    fn set_refresh_token(&self, token: &str) -> Result<(), CredentialStoreError>;

    /// Remove every stored credential (idempotent)
    fn clear(&self) -> Result<(), CredentialStoreError>;

    /// Persist a full credential pair
    ///
    /// A pair without refresh token leaves any previously stored refresh
    /// token untouched.
    fn store(&self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        self.set_access_token(&credentials.token)?;
        if let Some(refresh_token) = credentials.refresh_token.as_deref() {
            self.set_refresh_token(refresh_token)?;
        }
        Ok(())
    }

    /// Stored credential pair, `None` without access token
    fn credentials(&self) -> Result<Option<Credentials>, CredentialStoreError> {
        let Some(token) = self.access_token()? else {
            return Ok(None);
        };
        Ok(Some(Credentials { token, refresh_token: self.refresh_token()? }))
    }
}
