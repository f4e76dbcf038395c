//! Project ordering synchronizer
//!
//! Applies a drag-and-drop permutation to the store immediately, then
//! persists one index per project through the [`ProjectIndexWriter`] port.
//! All persistence calls are issued concurrently; each success patches the
//! stored index field, each failure is logged and left alone.
//!
//! A failed call is neither retried nor rolled back, so the displayed order
//! can diverge from the persisted order until the next full refetch. That
//! inconsistency window is accepted; callers get a [`ReorderReport`] naming
//! the divergent projects.

pub mod ports;

use std::sync::Arc;

use futures::future::join_all;
use portfolio_domain::{PortfolioError, Project};
use tracing::{debug, warn};
use uuid::Uuid;

use self::ports::ProjectIndexWriter;
use crate::store::{PortfolioStore, StoreEvent};

/// Outcome of one reorder pass.
#[derive(Debug, Default)]
pub struct ReorderReport {
    /// Projects whose new index was persisted, as `(uuid, index)`.
    pub confirmed: Vec<(Uuid, u32)>,
    /// Projects whose index update failed; the optimistic order stands.
    pub failed: Vec<(Uuid, PortfolioError)>,
}

impl ReorderReport {
    /// Whether every index update was persisted.
    #[must_use]
    pub fn fully_confirmed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Keeps the locally displayed project order in sync with the backend.
pub struct OrderingSynchronizer {
    store: Arc<PortfolioStore>,
    writer: Arc<dyn ProjectIndexWriter>,
}

impl OrderingSynchronizer {
    /// Create a new synchronizer over the shared store.
    pub fn new(store: Arc<PortfolioStore>, writer: Arc<dyn ProjectIndexWriter>) -> Self {
        Self { store, writer }
    }

    /// Apply a permutation of the project list.
    ///
    /// The store is updated with the permutation before any persistence
    /// call is issued, so readers see the new order immediately. One
    /// `set_index` call per project is then driven concurrently; the 0-based
    /// position in `new_order` becomes the persisted index.
    pub async fn reorder(&self, new_order: Vec<Project>) -> ReorderReport {
        let targets: Vec<(Uuid, u32)> =
            new_order.iter().zip(0u32..).map(|(project, index)| (project.uuid, index)).collect();

        // Optimistic update: visible before any network confirmation
        self.store.dispatch(StoreEvent::ProjectsReordered(new_order));

        let calls = targets.into_iter().map(|(uuid, index)| {
            let writer = Arc::clone(&self.writer);
            let store = Arc::clone(&self.store);
            async move {
                match writer.set_index(uuid, index).await {
                    Ok(()) => {
                        debug!(%uuid, index, "project index persisted");
                        store.dispatch(StoreEvent::ProjectIndexConfirmed { uuid, index });
                        Ok((uuid, index))
                    }
                    Err(error) => {
                        // No rollback and no retry: the optimistic order
                        // stands until the next full refetch.
                        warn!(%uuid, index, %error, "project index update failed");
                        Err((uuid, error))
                    }
                }
            }
        });

        let mut report = ReorderReport::default();
        for result in join_all(calls).await {
            match result {
                Ok(confirmed) => report.confirmed.push(confirmed),
                Err(failed) => report.failed.push(failed),
            }
        }
        report
    }
}
