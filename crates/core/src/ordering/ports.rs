//! Port interfaces for display-order persistence
//!
//! These traits define the boundary between the ordering synchronizer and
//! the infrastructure implementation that talks to the backend.

use async_trait::async_trait;
use portfolio_domain::Result;
use uuid::Uuid;

/// Trait for persisting a project's display-order index.
#[async_trait]
pub trait ProjectIndexWriter: Send + Sync {
    /// Persist the 0-based display index for a single project.
    async fn set_index(&self, uuid: Uuid, index: u32) -> Result<()>;
}
