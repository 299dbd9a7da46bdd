//! Testing utilities and helpers
//!
//! This module provides:
//! - **[`fixtures`]**: Token fixtures (unsigned JWTs with a chosen `exp`)
//! - **[`mocks`]**: Mock implementations of the credential store
//!
//! ## Usage
//!
//! ```rust
//! use fincontrol_common::auth::CredentialStore;
//! use fincontrol_common::testing::{fixtures, MockCredentialStore};
//!
//! let store = MockCredentialStore::signed_in(&fixtures::expired_jwt(), "refresh");
//! store.clear().unwrap();
//! assert_eq!(store.clear_calls(), 1);
//! ```

pub mod fixtures;
pub mod mocks;

pub use mocks::MockCredentialStore;
