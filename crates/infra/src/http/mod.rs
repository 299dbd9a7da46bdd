//! HTTP client with bearer authentication and token refresh
//!
//! # Architecture
//!
//! ```text
//! AuthenticatedHttpClient
//!   ├── CredentialStore      read token / persist refreshed pair / clear
//!   ├── RefreshCoordinator   single-flight Idle | Refreshing state
//!   ├── RefreshEndpoint      POST /auth/refresh on a plain client
//!   └── SessionHandler       redirect to login when the session is gone
//! ```

pub mod client;
pub mod endpoint;
pub mod errors;
pub mod refresh;
pub mod session;

pub use client::{ApiRequest, AuthenticatedHttpClient, AuthenticatedHttpClientBuilder};
pub use endpoint::{HttpRefreshEndpoint, RefreshEndpoint};
pub use errors::{ApiError, ApiErrorCategory, RefreshError};
pub use refresh::{RefreshCoordinator, RefreshGuard, RefreshOutcome, RefreshTicket};
pub use session::{SessionHandler, WatchSessionHandler};
