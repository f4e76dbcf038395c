//! # Portfolio Domain
//!
//! Business domain types and models for the portfolio client.
//!
//! This crate contains:
//! - Domain data types (Project, Contribution, auth payloads)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure text utilities (localized description resolution)
//!
//! ## Architecture
//! - No dependencies on other portfolio crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export the localized description resolver
pub use utils::localization::localized_description;
