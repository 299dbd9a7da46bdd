//! Modular common utilities shared across FinControl crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: validation, token claim decoding
//! - `platform`: credential stores (keychain, in-memory)
//! - `observability`: optional tracing (not included by default)
//! - `test-utils`: mocks and token fixtures for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", all(test, feature = "platform")))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{
    CredentialStore, CredentialStoreError, Credentials, KeyringCredentialStore,
    MemoryCredentialStore,
};
#[cfg(feature = "foundation")]
pub use validation::{
    EmailValidator, FieldValidator, RangeValidator, StringValidator, UrlValidator,
    ValidationError, ValidationResult, Validator,
};
