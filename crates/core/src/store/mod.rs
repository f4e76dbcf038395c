//! Remote data store
//!
//! In-memory cache of the last-fetched projects and contributions, mutated
//! exclusively through [`PortfolioStore::dispatch`]. The transition function
//! makes two invariants explicit:
//!
//! - a failed refetch records the error but retains the previous data;
//! - the project list is sorted ascending by `index` after every successful
//!   fetch, while an optimistic reorder keeps the permutation exactly as
//!   applied until the next fetch.

use std::sync::{PoisonError, RwLock};

use portfolio_domain::{Contribution, Project, ProjectUpdate};
use uuid::Uuid;

/// Observable fetch status of a resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// A fetched collection together with its fetch status and last error.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

// Manual impl: the derive would demand `T: Default`, but item types like
// `Contribution` have no meaningful default value.
impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new(), status: LoadStatus::default(), error: None }
    }
}

impl<T> Collection<T> {
    fn fetch_started(&mut self) {
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    fn fetch_succeeded(&mut self, items: Vec<T>) {
        self.status = LoadStatus::Loaded;
        self.items = items;
        self.error = None;
    }

    /// Record the failure; `items` keeps the last-known-good data.
    fn fetch_failed(&mut self, message: String) {
        self.status = LoadStatus::Error;
        self.error = Some(message);
    }
}

/// Events accepted by the store's transition function.
#[derive(Debug)]
pub enum StoreEvent {
    ProjectsFetchStarted,
    ProjectsFetchSucceeded(Vec<Project>),
    ProjectsFetchFailed(String),
    ContributionsFetchStarted,
    ContributionsFetchSucceeded(Vec<Contribution>),
    ContributionsFetchFailed(String),
    /// Optimistic replacement of the project list with a permutation,
    /// applied before any persistence call completes.
    ProjectsReordered(Vec<Project>),
    /// A single index-update call succeeded; patch the stored field.
    ProjectIndexConfirmed { uuid: Uuid, index: u32 },
    /// A full or partial update was persisted; patch the stored project.
    ProjectPatched { uuid: Uuid, update: ProjectUpdate },
    ProjectVisibilityToggled(Uuid),
    ProjectRemoved(Uuid),
    /// A mutation failed; record it without touching the collection.
    ProjectMutationFailed(String),
}

/// Snapshot of both collections.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub projects: Collection<Project>,
    pub contributions: Collection<Contribution>,
}

impl StoreState {
    /// Apply one event. This is the single place where state changes.
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::ProjectsFetchStarted => self.projects.fetch_started(),
            StoreEvent::ProjectsFetchSucceeded(mut projects) => {
                // Display invariant: ascending by index
                projects.sort_by_key(|project| project.index);
                self.projects.fetch_succeeded(projects);
            }
            StoreEvent::ProjectsFetchFailed(message) => self.projects.fetch_failed(message),
            StoreEvent::ContributionsFetchStarted => self.contributions.fetch_started(),
            StoreEvent::ContributionsFetchSucceeded(contributions) => {
                self.contributions.fetch_succeeded(contributions);
            }
            StoreEvent::ContributionsFetchFailed(message) => {
                self.contributions.fetch_failed(message);
            }
            StoreEvent::ProjectsReordered(projects) => {
                // Not re-sorted: the permutation is the displayed order
                // until the next fetch.
                self.projects.items = projects;
            }
            StoreEvent::ProjectIndexConfirmed { uuid, index } => {
                if let Some(project) = self.project_mut(uuid) {
                    project.index = index;
                }
            }
            StoreEvent::ProjectPatched { uuid, update } => {
                if let Some(project) = self.project_mut(uuid) {
                    project.apply_update(&update);
                }
            }
            StoreEvent::ProjectVisibilityToggled(uuid) => {
                if let Some(project) = self.project_mut(uuid) {
                    project.is_visible = !project.is_visible;
                }
            }
            StoreEvent::ProjectRemoved(uuid) => {
                self.projects.items.retain(|project| project.uuid != uuid);
            }
            StoreEvent::ProjectMutationFailed(message) => {
                self.projects.error = Some(message);
            }
        }
    }

    fn project_mut(&mut self, uuid: Uuid) -> Option<&mut Project> {
        self.projects.items.iter_mut().find(|project| project.uuid == uuid)
    }
}

/// Thread-safe state container with a single dispatch entry point.
#[derive(Debug, Default)]
pub struct PortfolioStore {
    state: RwLock<StoreState>,
}

impl PortfolioStore {
    /// Create an empty store (both collections idle).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event to the state.
    pub fn dispatch(&self, event: StoreEvent) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.apply(event);
    }

    /// Clone the full current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current project list in display order.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).projects.items.clone()
    }

    /// Current unassigned contribution list.
    #[must_use]
    pub fn contributions(&self) -> Vec<Contribution> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).contributions.items.clone()
    }
}
