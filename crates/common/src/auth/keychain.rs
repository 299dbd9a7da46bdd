//! Keyring-backed credential store
//!
//! Persists the session tokens in the platform keychain (macOS Keychain
//! Access, Windows Credential Manager, Linux Secret Service) so a session
//! survives restarts. Entries are stored under the keys `token` and
//! `refreshToken` of a configurable service name.
//!
//! ## Usage
//!
//! ```no_run
//! use fincontrol_common::auth::{CredentialStore, KeyringCredentialStore};
//!
//! let store = KeyringCredentialStore::new("FinControl");
//! store.set_access_token("eyJ...")?;
//! assert!(store.access_token()?.is_some());
//! # Ok::<(), fincontrol_common::auth::CredentialStoreError>(())
//! ```

use keyring::Entry;
use tracing::debug;

use super::traits::{CredentialStore, CredentialStoreError};

const ACCESS_TOKEN_KEY: &str = "token";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Credential store on top of the platform keychain
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service_name: String,
}

impl KeyringCredentialStore {
    /// Create a store for a specific service
    ///
    /// # Arguments
    /// * `service_name` - Keychain service identifier (e.g. "FinControl")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, CredentialStoreError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            CredentialStoreError::AccessFailed(format!("Failed to open keychain entry {key}: {e}"))
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialStoreError::AccessFailed(format!(
                "Failed to retrieve {key}: {e}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        debug!(service = %self.service_name, key = %key, "Storing credential in keychain");

        self.entry(key)?.set_password(value).map_err(|e| {
            CredentialStoreError::AccessFailed(format!("Failed to store {key}: {e}"))
        })
    }

    fn delete(&self, key: &str) -> Result<(), CredentialStoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                Err(CredentialStoreError::AccessFailed(format!("Failed to delete {key}: {e}")))
            }
        }
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn access_token(&self) -> Result<Option<String>, CredentialStoreError> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Result<Option<String>, CredentialStoreError> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn set_access_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.set(ACCESS_TOKEN_KEY, token)
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.set(REFRESH_TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        debug!(service = %self.service_name, "Clearing stored credentials");

        // Attempt both deletions before reporting a failure
        let access = self.delete(ACCESS_TOKEN_KEY);
        let refresh = self.delete(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}
