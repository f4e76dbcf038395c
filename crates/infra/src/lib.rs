//! # Portfolio Infra
//!
//! Infrastructure layer: HTTP transport, the backend REST API client, and
//! configuration loading.
//!
//! This crate implements the port traits defined in `portfolio-core`
//! (`ProjectsGateway`, `ContributionsGateway`, `ProjectIndexWriter`) on top
//! of a reqwest-based JSON client with cookie-session authentication.

pub mod api;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError};
pub use http::HttpClient;
