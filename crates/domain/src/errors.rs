//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the portfolio client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PortfolioError {
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected an auth-required call (HTTP 401/403).
    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error: {status} {text}")]
    Api { status: u16, text: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;
