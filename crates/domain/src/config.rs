//! Configuration structures
//!
//! Loaded by `portfolio-infra::config` from environment variables or files.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_BASE_URL;

/// Configuration for the application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the backend (e.g., `http://localhost:8080/api/v1`).
    pub base_url: String,
    /// Optional User-Agent header value.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), user_agent: None }
    }
}
