//! # Portfolio Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Contribution aggregation (per-repository summaries)
//! - The remote-data state store and its transition function
//! - The project ordering synchronizer (optimistic reorder + persistence)
//! - Port/adapter interfaces (traits) implemented by the infra layer
//!
//! ## Architecture Principles
//! - Only depends on `portfolio-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod aggregation;
pub mod ordering;
pub mod portfolio;
pub mod store;

// Re-export specific items to avoid ambiguity
pub use aggregation::{
    aggregate_by_repository, format_date_range, repository_name, DateRange, RepositoryAggregate,
};
pub use ordering::ports::ProjectIndexWriter;
pub use ordering::{OrderingSynchronizer, ReorderReport};
pub use portfolio::ports::{ContributionsGateway, ProjectsGateway};
pub use portfolio::PortfolioService;
pub use store::{Collection, LoadStatus, PortfolioStore, StoreEvent, StoreState};
