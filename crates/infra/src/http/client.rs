//! Authenticated HTTP client
//!
//! Attaches the stored access token to every request and recovers from
//! `401 Unauthorized` by refreshing the token once and replaying the request.
//! Concurrent 401s share a single refresh through [`RefreshCoordinator`].
//!
//! Replay rules:
//! - a request is replayed at most once; a 401 on the replay is returned
//! - 403 and every other non-success status pass through untouched
//! - when the session cannot be recovered the credential store is cleared
//!   and the [`SessionHandler`] is told to redirect to the login path

use std::sync::Arc;
use std::time::Duration;

use fincontrol_common::auth::{CredentialStore, Credentials};
use fincontrol_domain::{ApiConfig, RefreshResponse};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::endpoint::{HttpRefreshEndpoint, RefreshEndpoint};
use super::errors::{ApiError, RefreshError};
use super::refresh::{RefreshCoordinator, RefreshGuard, RefreshTicket};
use super::session::{SessionHandler, WatchSessionHandler};

/// A request description that can be sent again after a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters, keeping their order
    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Attach a JSON body
    ///
    /// # Errors
    /// Returns `ApiError::Decode` if the body cannot be serialized
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }
}

/// HTTP client with bearer authentication and single-flight token refresh
///
/// Cheap to share behind an `Arc`; every clone of that `Arc` uses the same
/// refresh coordinator.
pub struct AuthenticatedHttpClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    credentials: Arc<dyn CredentialStore>,
    session: Arc<dyn SessionHandler>,
    refresh_endpoint: Arc<dyn RefreshEndpoint>,
    coordinator: Arc<RefreshCoordinator>,
}

impl AuthenticatedHttpClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> AuthenticatedHttpClientBuilder {
        AuthenticatedHttpClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store the client reads tokens from and writes refreshed tokens to
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// Handler told when a session ends or starts
    pub fn session_handler(&self) -> &Arc<dyn SessionHandler> {
        &self.session
    }

    /// GET `path` and decode the JSON response
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// POST `body` as JSON to `path`
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// PUT `body` as JSON to `path`
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// PATCH `path` without a body
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn patch<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(ApiRequest::patch(path)).await
    }

    /// DELETE `path`, ignoring any response body
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_discarding(ApiRequest::delete(path)).await
    }

    /// Execute `request` and decode the JSON response
    ///
    /// Empty bodies (204, 205 or zero-length) decode as JSON `null`, so
    /// `()` and `Option<T>` work for endpoints without content.
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]; additionally
    /// `ApiError::Decode` when the body does not match `R`.
    pub async fn send<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(&request).await?;
        decode_json(response).await
    }

    /// Execute `request` and return the body as text
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn send_text(&self, request: ApiRequest) -> Result<String, ApiError> {
        let response = self.execute(&request).await?;
        Ok(response.text().await?)
    }

    /// Execute `request` and drop the response body
    ///
    /// # Errors
    /// See [`AuthenticatedHttpClient::execute`]
    pub async fn send_discarding(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(&request).await.map(drop)
    }

    /// Execute `request`, refreshing the session once on `401`
    ///
    /// # Errors
    /// - `ApiError::Status` for any non-success response, including a 401 on
    ///   the replayed request and the original 401 when no refresh token is
    ///   stored
    /// - `ApiError::RefreshFailed` when the refresh this request depended on
    ///   failed
    /// - `ApiError::Network` for transport failures
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let sent_token = self.stored_access_token();
        let response = self.dispatch(request, sent_token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(response).await;
        }

        debug!("Received 401, recovering session");
        let token = self.recover(sent_token.as_deref(), response).await?;

        // Replayed once; a second 401 is handed back to the caller
        let replayed = self.dispatch(request, Some(&token)).await?;
        ensure_success(replayed).await
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(url = %url, authenticated = token.is_some(), "Sending request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    async fn recover(
        &self,
        sent_token: Option<&str>,
        unauthorized: Response,
    ) -> Result<String, ApiError> {
        let ticket = self.coordinator.begin(|| self.rotated_token(sent_token));

        match ticket {
            RefreshTicket::Rotated(token) => {
                debug!("Token was rotated while the request was in flight, replaying");
                Ok(token)
            }
            RefreshTicket::Follower(rx) => match rx.await {
                Ok(outcome) => outcome.map_err(ApiError::RefreshFailed),
                Err(_) => Err(ApiError::RefreshFailed(RefreshError::Abandoned)),
            },
            RefreshTicket::Leader(guard) => {
                self.lead_refresh(guard, sent_token, unauthorized).await
            }
        }
    }

    async fn lead_refresh(
        &self,
        guard: RefreshGuard<'_>,
        sent_token: Option<&str>,
        unauthorized: Response,
    ) -> Result<String, ApiError> {
        let refresh_token = match self.credentials.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) if sent_token.is_some() && self.session_already_ended() => {
                debug!("Session ended while the request was in flight");
                guard.fail(RefreshError::MissingRefreshToken);
                return Err(RefreshError::MissingRefreshToken.into());
            }
            Ok(None) => {
                warn!("No refresh token stored, ending session");
                self.end_session();
                guard.fail(RefreshError::MissingRefreshToken);
                let status = unauthorized.status();
                let body = unauthorized.text().await.unwrap_or_default();
                return Err(ApiError::status(status, body));
            }
            Err(e) => {
                let error = RefreshError::Store(e.to_string());
                warn!(error = %error, "Could not read refresh token, ending session");
                self.end_session();
                guard.fail(error.clone());
                return Err(error.into());
            }
        };
        drop(unauthorized);

        let outcome = match self.refresh_endpoint.refresh(&refresh_token).await {
            Ok(refreshed) => self.persist(&refreshed).map(|()| refreshed.token),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(token) => {
                info!("Access token refreshed");
                guard.complete(token.clone());
                Ok(token)
            }
            Err(error) => {
                warn!(error = %error, "Token refresh failed, ending session");
                self.end_session();
                guard.fail(error.clone());
                Err(error.into())
            }
        }
    }

    fn persist(&self, refreshed: &RefreshResponse) -> Result<(), RefreshError> {
        let credentials =
            Credentials::new(refreshed.token.clone(), refreshed.refresh_token.clone());
        self.credentials.store(&credentials).map_err(|e| RefreshError::Store(e.to_string()))
    }

    fn end_session(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear stored credentials");
        }
        self.session.on_session_expired(&self.login_path);
    }

    fn stored_access_token(&self) -> Option<String> {
        self.credentials.access_token().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read access token, sending request unauthenticated");
            None
        })
    }

    /// Whether the credentials were cleared, e.g. by a concurrent failed refresh
    fn session_already_ended(&self) -> bool {
        matches!(self.credentials.access_token(), Ok(None))
    }

    /// Stored token when it differs from the one a failed request carried
    fn rotated_token(&self, sent_token: Option<&str>) -> Option<String> {
        match self.credentials.access_token() {
            Ok(Some(current)) if sent_token != Some(current.as_str()) => Some(current),
            _ => None,
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(%status, "Request failed");
    Err(ApiError::status(status, body))
}

async fn decode_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if bytes.is_empty() || status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Builder for [`AuthenticatedHttpClient`]
#[derive(Default)]
pub struct AuthenticatedHttpClientBuilder {
    config: Option<ApiConfig>,
    http: Option<reqwest::Client>,
    credentials: Option<Arc<dyn CredentialStore>>,
    session: Option<Arc<dyn SessionHandler>>,
    refresh_endpoint: Option<Arc<dyn RefreshEndpoint>>,
    coordinator: Option<Arc<RefreshCoordinator>>,
}

impl AuthenticatedHttpClientBuilder {
    /// Set the API configuration (defaults to [`ApiConfig::default`])
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Shorthand for overriding only the base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.base_url = base_url.into();
        self.config = Some(config);
        self
    }

    /// Use a preconfigured reqwest client instead of building one
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the credential store (required)
    #[must_use]
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the session handler (defaults to a [`WatchSessionHandler`])
    #[must_use]
    pub fn session_handler(mut self, session: Arc<dyn SessionHandler>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the refresh endpoint (defaults to [`HttpRefreshEndpoint`])
    #[must_use]
    pub fn refresh_endpoint(mut self, endpoint: Arc<dyn RefreshEndpoint>) -> Self {
        self.refresh_endpoint = Some(endpoint);
        self
    }

    /// Share a coordinator between clients talking to the same backend
    #[must_use]
    pub fn coordinator(mut self, coordinator: Arc<RefreshCoordinator>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `ApiError::Config` if no credential store was set or the
    /// reqwest client cannot be created
    pub fn build(self) -> Result<AuthenticatedHttpClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("Credential store not set".to_string()))?;

        let http = match self.http {
            Some(http) => http,
            None => build_http_client(&config)?,
        };
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let refresh_endpoint = self.refresh_endpoint.unwrap_or_else(|| {
            Arc::new(HttpRefreshEndpoint::new(http.clone(), &base_url)) as Arc<dyn RefreshEndpoint>
        });
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(WatchSessionHandler::new()) as Arc<dyn SessionHandler>);

        Ok(AuthenticatedHttpClient {
            http,
            base_url,
            login_path: config.login_path,
            credentials,
            session,
            refresh_endpoint,
            coordinator: self.coordinator.unwrap_or_default(),
        })
    }
}

fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    builder.build().map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))
}
