//! Typed services for the finance backend
//!
//! Every service is a thin mapping from methods to endpoints on top of
//! [`AuthenticatedHttpClient`]. Reads go through the optional
//! [`QueryCache`]; mutations invalidate the prefixes of the resource they
//! touch plus the dashboard aggregates.
//!
//! # Architecture
//!
//! ```text
//! AuthService, CategoriaService, DespesaService, ReceitaService,
//! MetaService, ParametroService, DashboardService
//!         │
//!         ▼
//! ServiceContext ──► AuthenticatedHttpClient
//!         └────────► QueryCache (optional)
//! ```

pub mod auth;
pub mod categorias;
pub mod dashboard;
pub mod despesas;
pub mod forms;
pub mod metas;
pub mod parametros;
pub mod receitas;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{QueryCache, QueryKey};
use crate::http::{ApiError, ApiRequest, AuthenticatedHttpClient};

pub use auth::AuthService;
pub use categorias::CategoriaService;
pub use dashboard::DashboardService;
pub use despesas::DespesaService;
pub use metas::MetaService;
pub use parametros::ParametroService;
pub use receitas::ReceitaService;

/// Client and cache shared by the services
#[derive(Clone)]
pub struct ServiceContext {
    client: Arc<AuthenticatedHttpClient>,
    cache: Option<QueryCache>,
}

impl ServiceContext {
    /// Context without caching; every read hits the backend
    pub fn new(client: Arc<AuthenticatedHttpClient>) -> Self {
        Self { client, cache: None }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn client(&self) -> &AuthenticatedHttpClient {
        &self.client
    }

    pub fn cache(&self) -> Option<&QueryCache> {
        self.cache.as_ref()
    }

    /// Send a read query, served from the cache when one is configured
    pub(crate) async fn query<T>(
        &self,
        key: QueryKey,
        stale_time: Option<Duration>,
        request: ApiRequest,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        match &self.cache {
            Some(cache) => {
                let client = &self.client;
                cache.fetch(key, stale_time, || client.send::<T>(request.clone())).await
            }
            None => self.client.send(request).await,
        }
    }

    /// Plain-text variant of [`ServiceContext::query`]
    pub(crate) async fn query_text(
        &self,
        key: QueryKey,
        stale_time: Option<Duration>,
        request: ApiRequest,
    ) -> Result<String, ApiError> {
        match &self.cache {
            Some(cache) => {
                let client = &self.client;
                cache.fetch(key, stale_time, || client.send_text(request.clone())).await
            }
            None => self.client.send_text(request).await,
        }
    }

    /// Send a mutation and invalidate `prefixes` once it succeeded
    pub(crate) async fn mutate<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        prefixes: &[&str],
    ) -> Result<T, ApiError> {
        let response = self.client.send(request).await?;
        self.invalidate(prefixes);
        Ok(response)
    }

    /// [`ServiceContext::mutate`] for endpoints whose body is ignored
    pub(crate) async fn mutate_discarding(
        &self,
        request: ApiRequest,
        prefixes: &[&str],
    ) -> Result<(), ApiError> {
        self.client.send_discarding(request).await?;
        self.invalidate(prefixes);
        Ok(())
    }

    pub(crate) fn invalidate(&self, prefixes: &[&str]) {
        let Some(cache) = &self.cache else {
            return;
        };
        debug!(?prefixes, "Invalidating after mutation");
        for prefix in prefixes {
            cache.invalidate_prefix(&QueryKey::new([*prefix]));
        }
    }

    pub(crate) fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// `inicio`/`fim` query pairs of an optional period
pub(crate) fn period_pairs(
    periodo: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
) -> Vec<(&'static str, String)> {
    periodo
        .map(|(inicio, fim)| vec![("inicio", inicio.to_string()), ("fim", fim.to_string())])
        .unwrap_or_default()
}

/// Encode a user-supplied path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
