//! JSON-over-HTTP client for the portfolio backend
//!
//! Wraps the transport with base-URL handling, JSON headers, and the error
//! mapping of the backend contract: 401/403 on auth-required calls become
//! [`ApiError::Unauthorized`], any other non-2xx becomes
//! [`ApiError::Status`] carrying the status code and text. Session cookies
//! set by the login endpoint ride along automatically via the transport's
//! cookie store.

use async_trait::async_trait;
use portfolio_core::{ContributionsGateway, ProjectIndexWriter, ProjectsGateway};
use portfolio_domain::constants::DEFAULT_API_BASE_URL;
use portfolio_domain::{
    AuthStatus, Contribution, Credentials, LoginResponse, Project, ProjectDraft, ProjectUpdate,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the backend (e.g., `http://localhost:8080/api/v1`).
    pub base_url: String,
    /// Optional User-Agent header value.
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), user_agent: None }
    }
}

impl From<&portfolio_domain::ApiConfig> for ApiClientConfig {
    fn from(config: &portfolio_domain::ApiConfig) -> Self {
        Self { base_url: config.base_url.clone(), user_agent: config.user_agent.clone() }
    }
}

/// REST client for the portfolio backend.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(agent) = config.user_agent {
            builder = builder.user_agent(agent);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HttpClient: {err}")))?;

        Ok(Self { http, base_url: config.base_url })
    }

    /// List publicly visible projects.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.fetch(Method::GET, "/projects", false).await
    }

    /// List all projects including hidden ones. Requires a session.
    #[instrument(skip(self))]
    pub async fn list_all_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.fetch(Method::GET, "/admin/projects", true).await
    }

    /// Create a project. The server assigns the uuid.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ApiError> {
        self.execute(Method::POST, "/projects", Some(draft), true).await
    }

    /// Full project update.
    #[instrument(skip(self, update))]
    pub async fn update_project(
        &self,
        uuid: Uuid,
        update: &ProjectUpdate,
    ) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/projects/{uuid}"), Some(update), true).await
    }

    /// Update only the display-order index.
    #[instrument(skip(self))]
    pub async fn update_project_index(&self, uuid: Uuid, index: u32) -> Result<(), ApiError> {
        let body = serde_json::json!({ "index": index });
        self.execute(Method::PATCH, &format!("/projects/{uuid}/index"), Some(&body), true).await
    }

    /// Toggle the visibility flag.
    #[instrument(skip(self))]
    pub async fn toggle_project_visibility(&self, uuid: Uuid) -> Result<(), ApiError> {
        self.execute::<()>(Method::PATCH, &format!("/projects/{uuid}/visibility"), None, true)
            .await
    }

    /// Remove a project.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, uuid: Uuid) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, &format!("/projects/{uuid}"), None, true).await
    }

    /// List contributions not linked to any project.
    #[instrument(skip(self))]
    pub async fn unassigned_contributions(&self) -> Result<Vec<Contribution>, ApiError> {
        self.fetch(Method::GET, "/contributions/unassigned", false).await
    }

    /// Log in; on success the server sets the session cookie picked up by
    /// the cookie store.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let response =
            self.send(Method::POST, "/auth/login", Some(credentials), false).await?;
        response.json().await.map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// End the current session.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute::<()>(Method::POST, "/auth/logout", None, true).await
    }

    /// Query the current session state.
    #[instrument(skip(self))]
    pub async fn auth_status(&self) -> Result<AuthStatus, ApiError> {
        self.fetch(Method::GET, "/auth/status", false).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        require_auth: bool,
    ) -> Result<T, ApiError> {
        let response = self.send::<()>(method, path, None, require_auth).await?;
        response.json().await.map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn execute<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        require_auth: bool,
    ) -> Result<(), ApiError> {
        self.send(method, path, body, require_auth).await.map(|_| ())
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        require_auth: bool,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let mut request =
            self.http.request(method, &url).header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http.send(request).await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            if require_auth
                && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
            {
                return Err(ApiError::Unauthorized);
            }
            let body = response.text().await.unwrap_or_default();
            let text = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::Status { status: status.as_u16(), text });
        }

        Ok(response)
    }
}

#[async_trait]
impl ProjectsGateway for ApiClient {
    async fn fetch_visible(&self) -> portfolio_domain::Result<Vec<Project>> {
        Ok(self.list_projects().await?)
    }

    async fn fetch_all(&self) -> portfolio_domain::Result<Vec<Project>> {
        Ok(self.list_all_projects().await?)
    }

    async fn create(&self, draft: &ProjectDraft) -> portfolio_domain::Result<()> {
        Ok(self.create_project(draft).await?)
    }

    async fn update(&self, uuid: Uuid, update: &ProjectUpdate) -> portfolio_domain::Result<()> {
        Ok(self.update_project(uuid, update).await?)
    }

    async fn toggle_visibility(&self, uuid: Uuid) -> portfolio_domain::Result<()> {
        Ok(self.toggle_project_visibility(uuid).await?)
    }

    async fn delete(&self, uuid: Uuid) -> portfolio_domain::Result<()> {
        Ok(self.delete_project(uuid).await?)
    }
}

#[async_trait]
impl ContributionsGateway for ApiClient {
    async fn fetch_unassigned(&self) -> portfolio_domain::Result<Vec<Contribution>> {
        Ok(self.unassigned_contributions().await?)
    }
}

#[async_trait]
impl ProjectIndexWriter for ApiClient {
    async fn set_index(&self, uuid: Uuid, index: u32) -> portfolio_domain::Result<()> {
        Ok(self.update_project_index(uuid, index).await?)
    }
}
