//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Default backend base URL when no configuration is provided.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Host prefix stripped when deriving an `owner/repo` repository name.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Environment variable overriding the backend base URL.
pub const ENV_API_BASE_URL: &str = "PORTFOLIO_API_BASE_URL";
