//! Session credential infrastructure
//!
//! Holds the access/refresh token pair of a signed-in user and the stores
//! that persist it.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────┐
//! │  CredentialStore       │  get/set/clear, synchronous
//! └───────────┬────────────┘
//!             ├──► KeyringCredentialStore   (platform keychain)
//!             └──► MemoryCredentialStore    (in-process)
//!
//! decode_claims / is_token_valid              (JWT `exp` inspection)
//! ```
//!
//! # Usage Example
//!
//! ```
//! use fincontrol_common::auth::{CredentialStore, Credentials, MemoryCredentialStore};
//!
//! let store = MemoryCredentialStore::new();
//! store.store(&Credentials::new("access", Some("refresh".to_string())))?;
//! assert_eq!(store.refresh_token()?.as_deref(), Some("refresh"));
//! # Ok::<(), fincontrol_common::auth::CredentialStoreError>(())
//! ```

pub mod keychain;
pub mod memory;
pub mod traits;
pub mod types;

pub use keychain::KeyringCredentialStore;
pub use memory::MemoryCredentialStore;
pub use traits::{CredentialStore, CredentialStoreError};
pub use types::{
    decode_claims, is_token_valid, token_expiration, Credentials, TokenClaims, TokenError,
};
