//! Portfolio service - core business logic

use std::sync::Arc;

use portfolio_domain::{PortfolioError, Project, ProjectDraft, ProjectUpdate, Result};
use tracing::debug;
use uuid::Uuid;

use super::ports::{ContributionsGateway, ProjectsGateway};
use crate::ordering::ports::ProjectIndexWriter;
use crate::ordering::{OrderingSynchronizer, ReorderReport};
use crate::store::{PortfolioStore, StoreEvent};

/// Orchestrates fetches and mutations against the shared store.
///
/// Every network call is a suspend point. Sequential flows (create, then
/// refetch) await completion; the post-mutation refetches of projects and
/// contributions run concurrently and are unordered relative to each other.
/// There is no cancellation and no retry: whichever call completes last
/// writes last.
pub struct PortfolioService {
    store: Arc<PortfolioStore>,
    projects: Arc<dyn ProjectsGateway>,
    contributions: Arc<dyn ContributionsGateway>,
    ordering: OrderingSynchronizer,
}

impl PortfolioService {
    /// Create a new service over the shared store and gateways.
    pub fn new(
        store: Arc<PortfolioStore>,
        projects: Arc<dyn ProjectsGateway>,
        contributions: Arc<dyn ContributionsGateway>,
        index_writer: Arc<dyn ProjectIndexWriter>,
    ) -> Self {
        let ordering = OrderingSynchronizer::new(Arc::clone(&store), index_writer);
        Self { store, projects, contributions, ordering }
    }

    /// The shared store this service mutates.
    #[must_use]
    pub fn store(&self) -> &Arc<PortfolioStore> {
        &self.store
    }

    /// Refetch the project list, replacing the stored collection on success.
    ///
    /// With `include_hidden` the authenticated admin listing is used.
    pub async fn refresh_projects(&self, include_hidden: bool) -> Result<()> {
        self.store.dispatch(StoreEvent::ProjectsFetchStarted);
        let result = if include_hidden {
            self.projects.fetch_all().await
        } else {
            self.projects.fetch_visible().await
        };
        match result {
            Ok(projects) => {
                debug!(count = projects.len(), "projects fetched");
                self.store.dispatch(StoreEvent::ProjectsFetchSucceeded(projects));
                Ok(())
            }
            Err(error) => {
                self.store.dispatch(StoreEvent::ProjectsFetchFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Refetch unassigned contributions.
    pub async fn refresh_contributions(&self) -> Result<()> {
        self.store.dispatch(StoreEvent::ContributionsFetchStarted);
        match self.contributions.fetch_unassigned().await {
            Ok(contributions) => {
                debug!(count = contributions.len(), "unassigned contributions fetched");
                self.store.dispatch(StoreEvent::ContributionsFetchSucceeded(contributions));
                Ok(())
            }
            Err(error) => {
                self.store.dispatch(StoreEvent::ContributionsFetchFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Create a project, then refetch projects and unassigned contributions.
    ///
    /// The refetch is deliberate: creating a project can make the server
    /// reassign previously unassigned contributions, so both collections
    /// are reloaded together.
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<()> {
        if let Err(error) = self.projects.create(&draft).await {
            self.store.dispatch(StoreEvent::ProjectMutationFailed(error.to_string()));
            return Err(error);
        }
        self.refetch_after_mutation().await
    }

    /// Persist a full or partial update and patch the stored project.
    pub async fn update_project(&self, uuid: Uuid, update: ProjectUpdate) -> Result<()> {
        match self.projects.update(uuid, &update).await {
            Ok(()) => {
                self.store.dispatch(StoreEvent::ProjectPatched { uuid, update });
                Ok(())
            }
            Err(error) => {
                self.store.dispatch(StoreEvent::ProjectMutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Toggle a project's visibility flag.
    pub async fn toggle_visibility(&self, uuid: Uuid) -> Result<()> {
        match self.projects.toggle_visibility(uuid).await {
            Ok(()) => {
                self.store.dispatch(StoreEvent::ProjectVisibilityToggled(uuid));
                Ok(())
            }
            Err(error) => {
                self.store.dispatch(StoreEvent::ProjectMutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Delete a project and drop it from the stored collection.
    pub async fn delete_project(&self, uuid: Uuid) -> Result<()> {
        match self.projects.delete(uuid).await {
            Ok(()) => {
                self.store.dispatch(StoreEvent::ProjectRemoved(uuid));
                Ok(())
            }
            Err(error) => {
                self.store.dispatch(StoreEvent::ProjectMutationFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Link a repository to a project, then reload both collections.
    ///
    /// Sends the complete project payload since the backend expects a full
    /// update on this endpoint.
    pub async fn assign_repository(&self, uuid: Uuid, repository_url: String) -> Result<()> {
        let project = self
            .store
            .projects()
            .into_iter()
            .find(|project| project.uuid == uuid)
            .ok_or_else(|| PortfolioError::NotFound(format!("project {uuid}")))?;

        let mut repositories = project.repositories;
        repositories.push(repository_url);

        let update = ProjectUpdate {
            name: Some(project.name),
            description: project.description,
            additional_information: Some(project.additional_information),
            repositories: Some(repositories),
            index: Some(project.index),
            ..ProjectUpdate::default()
        };

        if let Err(error) = self.projects.update(uuid, &update).await {
            self.store.dispatch(StoreEvent::ProjectMutationFailed(error.to_string()));
            return Err(error);
        }
        self.refetch_after_mutation().await
    }

    /// Apply a drag-and-drop permutation; see [`OrderingSynchronizer`].
    pub async fn reorder_projects(&self, new_order: Vec<Project>) -> ReorderReport {
        self.ordering.reorder(new_order).await
    }

    /// Refetch projects and unassigned contributions concurrently.
    ///
    /// Both refetches always run to completion; the first error is
    /// propagated after both have settled.
    async fn refetch_after_mutation(&self) -> Result<()> {
        let (projects, contributions) =
            futures::join!(self.refresh_projects(false), self.refresh_contributions());
        projects?;
        contributions?;
        Ok(())
    }
}
