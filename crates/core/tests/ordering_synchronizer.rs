//! Integration tests for the ordering synchronizer: optimistic visibility,
//! confirmation patching, and the no-rollback partial-failure policy.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use portfolio_core::{OrderingSynchronizer, PortfolioStore, ProjectIndexWriter, StoreEvent};
use portfolio_domain::{PortfolioError, Project, Result};
use tokio::sync::Semaphore;
use uuid::Uuid;

fn project(name: &str, index: u32) -> Project {
    Project { uuid: Uuid::new_v4(), name: name.to_string(), index, ..Project::default() }
}

fn display_names(store: &PortfolioStore) -> Vec<String> {
    store.projects().into_iter().map(|p| p.name).collect()
}

fn stored_index(store: &PortfolioStore, uuid: Uuid) -> Option<u32> {
    store.projects().into_iter().find(|p| p.uuid == uuid).map(|p| p.index)
}

/// Writer whose calls block until the test releases permits, so the test
/// can observe store state while every request is still in flight.
struct GatedWriter {
    permits: Arc<Semaphore>,
    calls: Mutex<Vec<(Uuid, u32)>>,
}

impl GatedWriter {
    fn new(permits: Arc<Semaphore>) -> Self {
        Self { permits, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<(Uuid, u32)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ProjectIndexWriter for GatedWriter {
    async fn set_index(&self, uuid: Uuid, index: u32) -> Result<()> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|err| PortfolioError::Internal(err.to_string()))?;
        permit.forget();
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push((uuid, index));
        Ok(())
    }
}

/// Writer that fails for one specific project and succeeds for the rest.
struct FlakyWriter {
    fail_for: Uuid,
    calls: Mutex<Vec<(Uuid, u32)>>,
}

#[async_trait]
impl ProjectIndexWriter for FlakyWriter {
    async fn set_index(&self, uuid: Uuid, index: u32) -> Result<()> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push((uuid, index));
        if uuid == self.fail_for {
            return Err(PortfolioError::Api { status: 500, text: "Internal Server Error".into() });
        }
        Ok(())
    }
}

#[tokio::test]
async fn optimistic_order_is_visible_before_any_confirmation() {
    let store = Arc::new(PortfolioStore::new());
    let a = project("A", 0);
    let b = project("B", 1);
    let c = project("C", 2);
    store.dispatch(StoreEvent::ProjectsFetchSucceeded(vec![a.clone(), b.clone(), c.clone()]));

    let permits = Arc::new(Semaphore::new(0));
    let writer = Arc::new(GatedWriter::new(Arc::clone(&permits)));
    let synchronizer = OrderingSynchronizer::new(Arc::clone(&store), writer.clone());

    let new_order = vec![c.clone(), a.clone(), b.clone()];
    let reorder = tokio::spawn({
        let new_order = new_order.clone();
        async move { synchronizer.reorder(new_order).await }
    });

    // Drive the synchronizer up to its suspended network calls
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }

    // The permutation is already displayed even though no request finished
    assert_eq!(display_names(&store), ["C", "A", "B"]);
    // No confirmation yet: the index fields still carry the old values
    assert_eq!(stored_index(&store, c.uuid), Some(2));
    assert!(writer.calls().is_empty());

    // Release all three in-flight requests
    permits.add_permits(3);
    let report = reorder.await.expect("reorder task");

    assert!(report.fully_confirmed());
    assert_eq!(display_names(&store), ["C", "A", "B"]);
    assert_eq!(stored_index(&store, c.uuid), Some(0));
    assert_eq!(stored_index(&store, a.uuid), Some(1));
    assert_eq!(stored_index(&store, b.uuid), Some(2));
}

#[tokio::test]
async fn issues_one_positional_index_update_per_project() {
    let store = Arc::new(PortfolioStore::new());
    let a = project("A", 0);
    let b = project("B", 1);
    let c = project("C", 2);
    store.dispatch(StoreEvent::ProjectsFetchSucceeded(vec![a.clone(), b.clone(), c.clone()]));

    let permits = Arc::new(Semaphore::new(3));
    let writer = Arc::new(GatedWriter::new(permits));
    let synchronizer = OrderingSynchronizer::new(Arc::clone(&store), writer.clone());

    synchronizer.reorder(vec![c.clone(), a.clone(), b.clone()]).await;

    let mut calls = writer.calls();
    calls.sort_by_key(|(_, index)| *index);
    assert_eq!(calls, vec![(c.uuid, 0), (a.uuid, 1), (b.uuid, 2)]);
}

#[tokio::test]
async fn partial_failure_keeps_optimistic_order_without_rollback() {
    let store = Arc::new(PortfolioStore::new());
    let a = project("A", 0);
    let b = project("B", 1);
    let c = project("C", 2);
    store.dispatch(StoreEvent::ProjectsFetchSucceeded(vec![a.clone(), b.clone(), c.clone()]));

    let writer = Arc::new(FlakyWriter { fail_for: a.uuid, calls: Mutex::new(Vec::new()) });
    let synchronizer = OrderingSynchronizer::new(Arc::clone(&store), writer);

    let report = synchronizer.reorder(vec![c.clone(), a.clone(), b.clone()]).await;

    // Displayed order is untouched by the failure
    assert_eq!(display_names(&store), ["C", "A", "B"]);

    // Only C and B were confirmed; A keeps its stale index
    let mut confirmed = report.confirmed.clone();
    confirmed.sort_by_key(|(_, index)| *index);
    assert_eq!(confirmed, vec![(c.uuid, 0), (b.uuid, 2)]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, a.uuid);
    assert!(!report.fully_confirmed());

    assert_eq!(stored_index(&store, c.uuid), Some(0));
    assert_eq!(stored_index(&store, a.uuid), Some(0), "failed update must not patch the index");
    assert_eq!(stored_index(&store, b.uuid), Some(2));
}
