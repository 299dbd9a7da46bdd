#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fincontrol_common::testing::MockCredentialStore;
use fincontrol_domain::CacheConfig;
use fincontrol_infra::api::ServiceContext;
use fincontrol_infra::cache::{ClearCacheOnExpiry, QueryCache};
use fincontrol_infra::http::{AuthenticatedHttpClient, SessionHandler};
use parking_lot::Mutex;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Session handler that records every expiry and start signal
#[derive(Debug, Default)]
pub struct RecordingSessionHandler {
    calls: AtomicUsize,
    started: AtomicUsize,
    last_path: Mutex<Option<String>>,
}

impl RecordingSessionHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn last_path(&self) -> Option<String> {
        self.last_path.lock().clone()
    }
}

impl SessionHandler for RecordingSessionHandler {
    fn on_session_expired(&self, login_path: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_path.lock() = Some(login_path.to_string());
    }

    fn on_session_started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }
}

/// Client wired to a mock backend with inspectable collaborators
pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MockCredentialStore>,
    pub session: Arc<RecordingSessionHandler>,
    pub client: Arc<AuthenticatedHttpClient>,
    pub cache: QueryCache,
}

impl Harness {
    pub async fn new(store: MockCredentialStore) -> Self {
        Self::build(store, false).await
    }

    /// Client whose session handler also clears [`Harness::cache`] on expiry
    pub async fn clearing_cache_on_expiry(store: MockCredentialStore) -> Self {
        Self::build(store, true).await
    }

    async fn build(store: MockCredentialStore, clear_on_expiry: bool) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let session = Arc::new(RecordingSessionHandler::default());
        let cache = QueryCache::new(&CacheConfig::default()).with_retry_delay(Duration::ZERO);

        let handler: Arc<dyn SessionHandler> = if clear_on_expiry {
            Arc::new(ClearCacheOnExpiry::new(cache.clone(), session.clone()))
        } else {
            session.clone()
        };
        let client = AuthenticatedHttpClient::builder()
            .base_url(server.uri())
            .credentials(store.clone())
            .session_handler(handler)
            .build()
            .expect("client should build");

        Self { server, store, session, client: Arc::new(client), cache }
    }

    pub async fn signed_in(access_token: &str, refresh_token: &str) -> Self {
        Self::new(MockCredentialStore::signed_in(access_token, refresh_token)).await
    }

    /// Service context without cache
    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(self.client.clone())
    }

    /// Service context backed by the harness cache, which never waits
    /// between retries
    pub fn cached_context(&self) -> ServiceContext {
        ServiceContext::new(self.client.clone()).with_cache(self.cache.clone())
    }
}

pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "nome": "Maria Silva",
        "email": "maria@example.com",
        "tipoUsuario": "USER",
        "ativo": true
    })
}

pub fn auth_response_json(token: &str, refresh_token: &str) -> Value {
    json!({
        "token": token,
        "refreshToken": refresh_token,
        "tipo": "Bearer",
        "usuario": user_json(1)
    })
}

pub fn categoria_json(id: i64, nome: &str) -> Value {
    json!({
        "id": id,
        "usuarioId": 1,
        "usuarioNome": "Maria Silva",
        "nome": nome,
        "tipo": "DESPESA",
        "ativa": true
    })
}

pub fn despesa_json(id: i64, descricao: &str) -> Value {
    json!({
        "id": id,
        "usuarioId": 1,
        "usuarioNome": "Maria Silva",
        "data": "2024-03-10",
        "descricao": descricao,
        "valor": 150.0,
        "status": "PENDENTE",
        "parcelaAtual": 1,
        "parcelaTotal": 1
    })
}

pub fn page_json(content: Vec<Value>) -> Value {
    let len = content.len();
    json!({
        "content": content,
        "totalElements": len,
        "totalPages": 1,
        "size": 20,
        "number": 0,
        "first": true,
        "last": true,
        "empty": len == 0
    })
}
