//! Refresh endpoint
//!
//! The refresh call goes through a plain reqwest client rather than the
//! authenticated one, so a failing refresh can never trigger another refresh.

use async_trait::async_trait;
use fincontrol_domain::constants::REFRESH_PATH;
use fincontrol_domain::{RefreshRequest, RefreshResponse};
use tracing::{debug, instrument};

use super::errors::RefreshError;

/// Exchanges a refresh token for a new access token
#[async_trait]
pub trait RefreshEndpoint: Send + Sync {
    /// Call the backend refresh endpoint
    ///
    /// Any non-success status, transport failure or undecodable body is a
    /// [`RefreshError`].
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, RefreshError>;
}

/// `POST {base_url}/auth/refresh` with `{"refreshToken": ..}`
#[derive(Debug, Clone)]
pub struct HttpRefreshEndpoint {
    http: reqwest::Client,
    url: String,
}

impl HttpRefreshEndpoint {
    /// Create an endpoint rooted at the API base URL
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, url: format!("{}{}", base_url.trim_end_matches('/'), REFRESH_PATH) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RefreshEndpoint for HttpRefreshEndpoint {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, RefreshError> {
        debug!("Requesting new access token");

        let response = self
            .http
            .post(&self.url)
            .json(&RefreshRequest { refresh_token: refresh_token.to_string() })
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefreshError::Rejected { status: status.as_u16(), body });
        }

        response.json().await.map_err(|e| RefreshError::InvalidResponse(e.to_string()))
    }
}
