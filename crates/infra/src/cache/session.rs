//! Drop cached queries together with the session they belong to

use std::sync::Arc;

use tracing::debug;

use super::QueryCache;
use crate::http::SessionHandler;

/// [`SessionHandler`] that clears a [`QueryCache`] before passing the
/// expiry signal on
///
/// Install it on the client that serves the same cache so no query of an
/// expired session outlives the redirect:
///
/// ```ignore
/// let cache = QueryCache::new(&config.cache);
/// let session = Arc::new(WatchSessionHandler::new());
/// let client = AuthenticatedHttpClient::builder()
///     .credentials(store)
///     .session_handler(Arc::new(ClearCacheOnExpiry::new(cache.clone(), session)))
///     .build()?;
/// ```
pub struct ClearCacheOnExpiry {
    cache: QueryCache,
    inner: Arc<dyn SessionHandler>,
}

impl ClearCacheOnExpiry {
    pub fn new(cache: QueryCache, inner: Arc<dyn SessionHandler>) -> Self {
        Self { cache, inner }
    }
}

impl SessionHandler for ClearCacheOnExpiry {
    fn on_session_expired(&self, login_path: &str) {
        debug!("Clearing cached queries of the expired session");
        self.cache.clear();
        self.inner.on_session_expired(login_path);
    }

    fn on_session_started(&self) {
        self.inner.on_session_started();
    }
}
