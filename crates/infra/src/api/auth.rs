//! Session lifecycle: login, registration, profile and logout
//!
//! Successful logins store the returned token pair in the client's
//! credential store, which is where [`AuthenticatedHttpClient`] reads the
//! bearer token from on every request. Starting a session drops every
//! cached query of the previous one.
//!
//! [`AuthenticatedHttpClient`]: crate::http::AuthenticatedHttpClient

use fincontrol_common::auth::{is_token_valid, Credentials};
use fincontrol_domain::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
};
use tracing::{debug, info, instrument, warn};

use super::{forms, ServiceContext};
use crate::cache::QueryKey;
use crate::http::{ApiError, ApiRequest};

/// Authentication endpoints (`/auth`, `/usuarios`)
#[derive(Clone)]
pub struct AuthService {
    ctx: ServiceContext,
}

impl AuthService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn user_key() -> QueryKey {
        QueryKey::new(["auth", "user"])
    }

    /// Sign in and persist the returned credentials
    ///
    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request or of the credential store
    #[instrument(skip_all)]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        forms::validate_login(request)?;
        let response: AuthResponse = self.ctx.client().post("/auth/login", request).await?;
        self.start_session(&response).await?;
        info!(user_id = response.usuario.id, "Signed in");
        Ok(response)
    }

    /// Create an account; the new user is signed in immediately
    ///
    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request or of the credential store
    #[instrument(skip_all)]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        forms::validate_register(request)?;
        let response: AuthResponse = self.ctx.client().post("/auth/register", request).await?;
        self.start_session(&response).await?;
        info!(user_id = response.usuario.id, "Registered and signed in");
        Ok(response)
    }

    /// Currently signed-in user
    ///
    /// # Errors
    /// Any error of the request
    pub async fn me(&self) -> Result<User, ApiError> {
        self.ctx.query(Self::user_key(), None, ApiRequest::get("/auth/me")).await
    }

    /// Sign out
    ///
    /// Local credentials and every cached query are dropped even when the
    /// backend call fails; that failure is only logged.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        if let Err(e) = self.ctx.client().send_discarding(ApiRequest::post("/auth/logout")).await {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.end_session();
        info!("Signed out");
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip_all)]
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        forms::validate_profile(request)?;
        let user: User = self.ctx.client().put("/usuarios/perfil", request).await?;
        if let Some(cache) = self.ctx.cache() {
            cache.set(Self::user_key(), user.clone(), None).await;
        }
        Ok(user)
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip_all)]
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        forms::validate_change_password(request)?;
        self.ctx.client().send_discarding(ApiRequest::put("/usuarios/senha").json(request)?).await
    }

    /// Restore the session from stored credentials
    ///
    /// Returns `None` and clears local state when no token is stored, the
    /// stored token is expired or `/auth/me` fails.
    #[instrument(skip_all)]
    pub async fn check_session(&self) -> Option<User> {
        let token = match self.ctx.client().credentials().access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored token");
                None
            }
        };

        if !token.as_deref().is_some_and(is_token_valid) {
            debug!("No valid stored token");
            self.end_session();
            return None;
        }

        match self.ctx.client().get::<User>("/auth/me").await {
            Ok(user) => {
                if let Some(cache) = self.ctx.cache() {
                    cache.set(Self::user_key(), user.clone(), None).await;
                }
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "Stored session rejected");
                self.end_session();
                None
            }
        }
    }

    async fn start_session(&self, response: &AuthResponse) -> Result<(), ApiError> {
        let credentials = Credentials::new(&response.token, Some(response.refresh_token.clone()));
        self.ctx
            .client()
            .credentials()
            .store(&credentials)
            .map_err(|e| ApiError::Config(format!("Failed to store credentials: {e}")))?;

        self.ctx.clear_cache();
        if let Some(cache) = self.ctx.cache() {
            cache.set(Self::user_key(), response.usuario.clone(), None).await;
        }
        self.ctx.client().session_handler().on_session_started();
        Ok(())
    }

    fn end_session(&self) {
        if let Err(e) = self.ctx.client().credentials().clear() {
            warn!(error = %e, "Failed to clear stored credentials");
        }
        self.ctx.clear_cache();
    }
}
