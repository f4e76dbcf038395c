//! API-specific error types
//!
//! Classifies failures of backend calls along the lines the UI cares about:
//! auth rejection, other non-2xx responses (with status code and text), and
//! transport problems.

use portfolio_domain::PortfolioError;
use thiserror::Error;

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401/403 on a call that requires authentication.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("API error: {status} {text}")]
    Status { status: u16, text: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::Unauthorized => Self::Unauthorized,
            PortfolioError::Api { status, text } => Self::Status { status, text },
            PortfolioError::Config(msg) => Self::Config(msg),
            PortfolioError::Network(msg) => Self::Network(msg),
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<ApiError> for PortfolioError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::Status { status, text } => Self::Api { status, text },
            ApiError::Network(msg) => Self::Network(msg),
            ApiError::Decode(msg) => Self::Internal(msg),
            ApiError::Config(msg) => Self::Config(msg),
        }
    }
}
