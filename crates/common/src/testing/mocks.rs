//! Mock implementations of common traits
//!
//! Provides mock objects for testing purposes.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::auth::{CredentialStore, CredentialStoreError, MemoryCredentialStore};

/// Credential store that records how it is used
///
/// Wraps a [`MemoryCredentialStore`] and counts writes and clears so tests
/// can assert that a failed refresh wipes the session exactly once.
///
/// # Examples
///
/// ```
/// use fincontrol_common::auth::CredentialStore;
/// use fincontrol_common::testing::MockCredentialStore;
///
/// let store = MockCredentialStore::signed_in("access", "refresh");
/// store.set_access_token("rotated").unwrap();
///
/// assert_eq!(store.set_access_calls(), 1);
/// assert_eq!(store.access_token().unwrap().as_deref(), Some("rotated"));
/// ```
#[derive(Debug, Default)]
pub struct MockCredentialStore {
    inner: MemoryCredentialStore,
    clear_calls: AtomicUsize,
    set_access_calls: AtomicUsize,
    set_refresh_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MockCredentialStore {
    /// Empty store (signed out)
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding an access and a refresh token
    pub fn signed_in(access_token: &str, refresh_token: &str) -> Self {
        Self {
            inner: MemoryCredentialStore::with_tokens(Some(access_token), Some(refresh_token)),
            ..Self::default()
        }
    }

    /// Store holding an access token but no refresh token
    pub fn access_only(access_token: &str) -> Self {
        Self {
            inner: MemoryCredentialStore::with_tokens(Some(access_token), None),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail with `AccessFailed`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn set_access_calls(&self) -> usize {
        self.set_access_calls.load(Ordering::SeqCst)
    }

    pub fn set_refresh_calls(&self) -> usize {
        self.set_refresh_calls.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), CredentialStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CredentialStoreError::AccessFailed("mock write failure".to_string()));
        }
        Ok(())
    }
}

impl CredentialStore for MockCredentialStore {
    fn access_token(&self) -> Result<Option<String>, CredentialStoreError> {
        self.inner.access_token()
    }

    fn refresh_token(&self) -> Result<Option<String>, CredentialStoreError> {
        self.inner.refresh_token()
    }

    fn set_access_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.set_access_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.inner.set_access_token(token)
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.set_refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.inner.set_refresh_token(token)
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_clears() {
        let store = MockCredentialStore::signed_in("a", "r");
        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.clear_calls(), 2);
        assert_eq!(store.credentials().unwrap(), None);
    }

    #[test]
    fn test_failing_writes_keep_state() {
        let store = MockCredentialStore::access_only("a");
        store.fail_writes(true);

        assert!(store.set_access_token("b").is_err());
        assert_eq!(store.access_token().unwrap().as_deref(), Some("a"));
        assert_eq!(store.refresh_token().unwrap(), None);
        assert_eq!(store.set_access_calls(), 1);
    }
}
