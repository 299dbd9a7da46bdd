//! In-process credential store
//!
//! Used when the platform keyring is unavailable (headless CI, containers)
//! and by tests. Credentials live as long as the store.

use parking_lot::RwLock;

use super::traits::{CredentialStore, CredentialStoreError};

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a credential pair
    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        Self {
            access_token: RwLock::new(access_token.map(str::to_string)),
            refresh_token: RwLock::new(refresh_token.map(str::to_string)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.access_token.read().clone())
    }

    fn refresh_token(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.refresh_token.read().clone())
    }

    fn set_access_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        *self.access_token.write() = Some(token.to_string());
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        *self.refresh_token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.access_token.write() = None;
        *self.refresh_token.write() = None;
        Ok(())
    }
}
