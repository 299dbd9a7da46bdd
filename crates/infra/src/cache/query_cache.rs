//! Query cache backed by `moka::future::Cache`
//!
//! Entries are keyed by [`QueryKey`] and expire after their own stale time.
//! Concurrent lookups of the same missing key share one fetch. A fetch that
//! was still running when its key was invalidated is fetched again instead
//! of being served.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use fincontrol_domain::CacheConfig;
use moka::future::Cache;
use moka::Expiry;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::http::ApiError;

/// Delay before the single retry of a failed fetch
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Hierarchical cache key, e.g. `["despesas", "list", "0", "20"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Append a segment
    #[must_use]
    pub fn push(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    /// Whether every segment of `prefix` matches the start of this key
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[derive(Clone)]
struct CachedValue {
    value: Arc<dyn Any + Send + Sync>,
    stale_after: Duration,
    /// Invalidation epoch observed before the value was fetched
    epoch: u64,
}

/// Latest invalidation epoch per key prefix
///
/// An empty prefix matches every key and is what [`QueryCache::clear`]
/// records.
#[derive(Debug, Default)]
struct InvalidationLog {
    epoch: u64,
    prefixes: HashMap<QueryKey, u64>,
}

impl InvalidationLog {
    fn record(&mut self, prefix: QueryKey) {
        self.epoch += 1;
        if prefix.0.is_empty() {
            self.prefixes.clear();
        }
        self.prefixes.insert(prefix, self.epoch);
    }

    /// Whether `key` was invalidated after `epoch`
    fn invalidated_since(&self, key: &QueryKey, epoch: u64) -> bool {
        self.prefixes.iter().any(|(prefix, &at)| at > epoch && key.starts_with(prefix))
    }
}

struct StaleTimeExpiry;

impl Expiry<QueryKey, CachedValue> for StaleTimeExpiry {
    fn expire_after_create(
        &self,
        _key: &QueryKey,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.stale_after)
    }

    // A value written over an existing entry starts a fresh stale window
    fn expire_after_update(
        &self,
        _key: &QueryKey,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.stale_after)
    }
}

/// Cache of decoded query results
///
/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<QueryKey, CachedValue>,
    default_stale: Duration,
    retry_delay: Duration,
    invalidations: Arc<Mutex<InvalidationLog>>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .field("default_stale", &self.default_stale)
            .finish_non_exhaustive()
    }
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(StaleTimeExpiry)
            .support_invalidation_closures()
            .build();

        Self {
            entries,
            default_stale: Duration::from_secs(config.stale_time_secs),
            retry_delay: DEFAULT_RETRY_DELAY,
            invalidations: Arc::default(),
        }
    }

    /// Override the delay before retrying a failed fetch
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn default_stale_time(&self) -> Duration {
        self.default_stale
    }

    /// Return the cached value for `key` or run `fetch`
    ///
    /// A fetch failing with a retryable error (server, rate limit, network)
    /// is retried once. Errors are never cached. An entry stored under the
    /// same key with a different type counts as a miss, and so does a value
    /// whose key was invalidated while it was being fetched.
    ///
    /// # Errors
    /// The error of the last fetch attempt
    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        stale_time: Option<Duration>,
        fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let stale_after = stale_time.unwrap_or(self.default_stale);
        let init = async {
            let epoch = self.current_epoch();
            let value = self.fetch_with_retry(&key, &fetch).await?;
            Ok::<_, ApiError>(CachedValue { value: Arc::new(value), stale_after, epoch })
        };

        let cached = self.entries.try_get_with(key.clone(), init).await.map_err(|e| (*e).clone())?;

        if self.is_outdated(&key, &cached) {
            debug!(key = %key, "Query was invalidated while fetching, refetching");
        } else if let Some(value) = cached.value.downcast_ref::<T>() {
            return Ok(value.clone());
        } else {
            warn!(key = %key, "Cached entry has a different type, refetching");
        }

        self.entries.invalidate(&key).await;
        self.refetch(key, stale_after, &fetch).await
    }

    /// Fetch outside the coalescing path and cache the result unless the key
    /// is invalidated again meanwhile
    async fn refetch<T, F, Fut>(
        &self,
        key: QueryKey,
        stale_after: Duration,
        fetch: &F,
    ) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let epoch = self.current_epoch();
        let value = self.fetch_with_retry(&key, fetch).await?;
        if self.invalidations.lock().invalidated_since(&key, epoch) {
            debug!(key = %key, "Query was invalidated again, not caching");
        } else {
            self.entries
                .insert(key, CachedValue { value: Arc::new(value.clone()), stale_after, epoch })
                .await;
        }
        Ok(value)
    }

    fn current_epoch(&self) -> u64 {
        self.invalidations.lock().epoch
    }

    fn is_outdated(&self, key: &QueryKey, cached: &CachedValue) -> bool {
        self.invalidations.lock().invalidated_since(key, cached.epoch)
    }

    async fn fetch_with_retry<T, F, Fut>(&self, key: &QueryKey, fetch: &F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match fetch().await {
            Err(error) if error.should_retry() => {
                debug!(key = %key, error = %error, "Query failed, retrying once");
                tokio::time::sleep(self.retry_delay).await;
                fetch().await
            }
            other => other,
        }
    }

    /// Cached value for `key`, if present, fresh and of type `T`
    pub async fn get<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let cached = self.entries.get(key).await?;
        if self.is_outdated(key, &cached) {
            return None;
        }
        cached.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key` without fetching
    pub async fn set<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        value: T,
        stale_time: Option<Duration>,
    ) {
        let stale_after = stale_time.unwrap_or(self.default_stale);
        let epoch = self.current_epoch();
        self.entries.insert(key, CachedValue { value: Arc::new(value), stale_after, epoch }).await;
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        self.invalidations.lock().record(key.clone());
        self.entries.invalidate(key).await;
    }

    /// Drop every entry whose key starts with `prefix`
    ///
    /// Fetches of matching keys that are still running are refetched when
    /// they finish.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let prefix = prefix.clone();
        debug!(prefix = %prefix, "Invalidating queries");
        self.invalidations.lock().record(prefix.clone());
        if let Err(e) = self.entries.invalidate_entries_if(move |key, _| key.starts_with(&prefix)) {
            warn!(error = %e, "Failed to invalidate cached queries");
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.invalidations.lock().record(QueryKey(Vec::new()));
        self.entries.invalidate_all();
    }

    /// Process pending maintenance; entry counts are approximate until then
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}
