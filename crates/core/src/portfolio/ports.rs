//! Port interfaces for the portfolio service
//!
//! These traits define the boundaries between core business logic and the
//! REST client in the infra layer.

use async_trait::async_trait;
use portfolio_domain::{Contribution, Project, ProjectDraft, ProjectUpdate, Result};
use uuid::Uuid;

/// Trait for project CRUD against the backend.
#[async_trait]
pub trait ProjectsGateway: Send + Sync {
    /// List publicly visible projects.
    async fn fetch_visible(&self) -> Result<Vec<Project>>;

    /// List all projects including hidden ones (requires authentication).
    async fn fetch_all(&self) -> Result<Vec<Project>>;

    /// Create a project; the server assigns the uuid.
    async fn create(&self, draft: &ProjectDraft) -> Result<()>;

    /// Full or partial project update.
    async fn update(&self, uuid: Uuid, update: &ProjectUpdate) -> Result<()>;

    /// Toggle the visibility flag.
    async fn toggle_visibility(&self, uuid: Uuid) -> Result<()>;

    /// Remove a project.
    async fn delete(&self, uuid: Uuid) -> Result<()>;
}

/// Trait for fetching contribution records.
#[async_trait]
pub trait ContributionsGateway: Send + Sync {
    /// List contributions not linked to any project.
    async fn fetch_unassigned(&self) -> Result<Vec<Contribution>>;
}
