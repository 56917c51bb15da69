use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        AdminLogin, BaseCandidate, CandidateData, CandidateLogin, CandidatePreview,
        CreateCandidate, CreateCandidateResponse, NewCandidateResponse,
    },
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub mod state;

pub use state::{CandidateState, Store};

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("invalid portal url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("portal rejected the request: {0}")]
    Api(#[from] ApiException),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PortalError {
    /// Error code the portal attached, if the failure came from the portal.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(exception) => Some(exception.code),
            _ => None,
        }
    }
}

/// Candidate-facing portal operations. UI layers take this seam so tests can
/// substitute a double for the live client.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    async fn login(&self, credentials: CandidateLogin) -> Result<(), PortalError>;
    async fn logout(&self) -> Result<(), PortalError>;
    async fn whoami(&self) -> Result<NewCandidateResponse, PortalError>;
    async fn get_details(&self) -> Result<CandidateData, PortalError>;
    async fn post_details(&self, details: CandidateData) -> Result<CandidateData, PortalError>;
}

/// HTTP client for the admissions portal. Sessions ride on the portal's
/// `id`/`key` cookies, so the underlying client keeps a cookie store. Every
/// successful read-back refreshes the shared [`CandidateState`].
pub struct PortalClient {
    http: Client,
    server_url: String,
    state: Arc<CandidateState>,
}

impl PortalClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, PortalError> {
        Self::with_state(server_url, Arc::new(CandidateState::default()))
    }

    pub fn with_state(
        server_url: impl Into<String>,
        state: Arc<CandidateState>,
    ) -> Result<Self, PortalError> {
        let server_url = server_url.into();
        Url::parse(&server_url)?;
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
            state,
        })
    }

    pub fn state(&self) -> Arc<CandidateState> {
        Arc::clone(&self.state)
    }

    pub async fn login(&self, credentials: CandidateLogin) -> Result<(), PortalError> {
        let response = self
            .http
            .post(format!("{}/candidate/login", self.server_url))
            .json(&credentials)
            .send()
            .await?;
        check(response).await?;
        info!(
            application_id = credentials.application_id.0,
            "candidate login accepted"
        );
        Ok(())
    }

    /// Ends the session and returns the shared state to its defaults.
    pub async fn logout(&self) -> Result<(), PortalError> {
        let response = self
            .http
            .post(format!("{}/candidate/logout", self.server_url))
            .send()
            .await?;
        check(response).await?;
        self.state.reset();
        info!("candidate session ended");
        Ok(())
    }

    pub async fn whoami(&self) -> Result<NewCandidateResponse, PortalError> {
        let response = self
            .http
            .get(format!("{}/candidate/whoami", self.server_url))
            .send()
            .await?;
        let whoami: NewCandidateResponse = check(response).await?.json().await?;
        self.state.base.set(whoami.base.clone());
        Ok(whoami)
    }

    pub async fn get_details(&self) -> Result<CandidateData, PortalError> {
        let response = self
            .http
            .get(format!("{}/candidate/details", self.server_url))
            .send()
            .await?;
        let details: CandidateData = check(response).await?.json().await?;
        self.state.details.set(details.clone());
        Ok(details)
    }

    /// Submits the form. The portal echoes the stored record back; the echo,
    /// not the submission, is what lands in the shared state.
    pub async fn post_details(&self, details: CandidateData) -> Result<CandidateData, PortalError> {
        let response = self
            .http
            .post(format!("{}/candidate/details", self.server_url))
            .json(&details)
            .send()
            .await?;
        let echoed: CandidateData = check(response).await?.json().await?;
        self.state.details.set(echoed.clone());
        info!(
            parents = echoed.parents.len(),
            "application details submitted"
        );
        Ok(echoed)
    }

    pub async fn admin_login(&self, credentials: AdminLogin) -> Result<(), PortalError> {
        let response = self
            .http
            .post(format!("{}/admin/login", self.server_url))
            .json(&credentials)
            .send()
            .await?;
        check(response).await?;
        info!(admin_id = credentials.admin_id.0, "admin login accepted");
        Ok(())
    }

    pub async fn create_candidate(
        &self,
        request: CreateCandidate,
    ) -> Result<CreateCandidateResponse, PortalError> {
        let response = self
            .http
            .post(format!("{}/admin/create", self.server_url))
            .json(&request)
            .send()
            .await?;
        let created: CreateCandidateResponse = check(response).await?.json().await?;
        info!(
            application_id = created.application_id.0,
            field_of_study = %created.field_of_study,
            "candidate record created"
        );
        Ok(created)
    }

    pub async fn list_candidates(
        &self,
        field: Option<&str>,
        page: Option<u32>,
        sort: Option<&str>,
    ) -> Result<Vec<CandidatePreview>, PortalError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(field) = field {
            query.push(("field", field.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(sort) = sort {
            query.push(("sort", sort.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/admin/candidates", self.server_url))
            .query(&query)
            .send()
            .await?;
        let rows: Vec<CandidatePreview> = check(response).await?.json().await?;
        Ok(rows)
    }
}

#[async_trait]
impl CandidateApi for PortalClient {
    async fn login(&self, credentials: CandidateLogin) -> Result<(), PortalError> {
        PortalClient::login(self, credentials).await
    }

    async fn logout(&self) -> Result<(), PortalError> {
        PortalClient::logout(self).await
    }

    async fn whoami(&self) -> Result<NewCandidateResponse, PortalError> {
        PortalClient::whoami(self).await
    }

    async fn get_details(&self) -> Result<CandidateData, PortalError> {
        PortalClient::get_details(self).await
    }

    async fn post_details(&self, details: CandidateData) -> Result<CandidateData, PortalError> {
        PortalClient::post_details(self, details).await
    }
}

/// Maps a non-2xx response to [`PortalError::Api`], preferring the portal's
/// own error body when it parses.
async fn check(response: Response) -> Result<Response, PortalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(api) = serde_json::from_str::<ApiError>(&body) {
        return Err(ApiException::new(api.code, api.message).into());
    }

    warn!(status = %status, "portal error response without parseable body");
    let code = match status {
        StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
        StatusCode::FORBIDDEN => ErrorCode::Forbidden,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::Validation,
        StatusCode::LOCKED => ErrorCode::Locked,
        _ => ErrorCode::Internal,
    };
    let message = if body.is_empty() {
        status.to_string()
    } else {
        body
    };
    Err(ApiException::new(code, message).into())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;
