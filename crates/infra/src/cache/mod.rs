//! Client-side query cache
//!
//! Services cache read queries under hierarchical keys and invalidate key
//! prefixes after mutations. [`ClearCacheOnExpiry`] drops everything when
//! the session expires.

pub mod query_cache;
pub mod session;

use std::time::Duration;

pub use query_cache::{QueryCache, QueryKey, DEFAULT_RETRY_DELAY};
pub use session::ClearCacheOnExpiry;

/// Stale time of the dashboard balance
pub const SALDO_STALE_TIME: Duration = Duration::from_secs(120);

/// Stale time of the monthly evolution series
pub const EVOLUCAO_STALE_TIME: Duration = Duration::from_secs(600);

/// Stale time of month-over-month comparisons
pub const COMPARATIVO_STALE_TIME: Duration = Duration::from_secs(600);

/// Stale time of system parameters
pub const PARAMETROS_STALE_TIME: Duration = Duration::from_secs(600);

/// Stale time of category lists
pub const CATEGORIAS_STALE_TIME: Duration = Duration::from_secs(600);
