//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Falls back to built-in defaults when neither source is present
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PORTFOLIO_API_BASE_URL`: Backend base URL
//! - `PORTFOLIO_USER_AGENT`: Optional User-Agent header value
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./portfolio.json` or `./portfolio.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use portfolio_domain::constants::ENV_API_BASE_URL;
use portfolio_domain::{ApiConfig, Config, PortfolioError, Result};

/// Environment variable overriding the User-Agent header.
const ENV_USER_AGENT: &str = "PORTFOLIO_USER_AGENT";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// not set in the environment, falls back to a config file, and finally
/// to built-in defaults. This function never fails: a client can always
/// be constructed against the default local backend.
#[must_use]
pub fn load() -> Config {
    match load_from_env() {
        Some(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        None => match load_from_file(None) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = ?e, "No usable config file, using defaults");
                Config::default()
            }
        },
    }
}

/// Load configuration from environment variables
///
/// Returns `None` when the base URL variable is not set. The User-Agent
/// variable is optional.
#[must_use]
pub fn load_from_env() -> Option<Config> {
    let base_url = std::env::var(ENV_API_BASE_URL).ok()?;
    let user_agent = std::env::var(ENV_USER_AGENT).ok();

    Some(Config { api: ApiConfig { base_url, user_agent } })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `PortfolioError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PortfolioError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PortfolioError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PortfolioError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `PortfolioError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PortfolioError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PortfolioError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PortfolioError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./portfolio.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("portfolio.json"),
            cwd.join("portfolio.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("portfolio.json"),
                exe_dir.join("portfolio.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_load_from_env_with_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var(ENV_API_BASE_URL, "https://api.example.com/api/v1");
        std::env::set_var(ENV_USER_AGENT, "portfolio-admin/1.0");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.api.base_url, "https://api.example.com/api/v1");
        assert_eq!(config.api.user_agent, Some("portfolio-admin/1.0".to_string()));

        // Cleanup
        std::env::remove_var(ENV_API_BASE_URL);
        std::env::remove_var(ENV_USER_AGENT);
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::remove_var(ENV_API_BASE_URL);

        assert!(load_from_env().is_none(), "Should be None without base URL");
    }

    #[test]
    fn test_load_defaults_when_nothing_is_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::remove_var(ENV_API_BASE_URL);
        std::env::remove_var(ENV_USER_AGENT);

        let config = load();
        assert_eq!(config.api.base_url, portfolio_domain::constants::DEFAULT_API_BASE_URL);
        assert_eq!(config.api.user_agent, None);
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api": {
                "base_url": "https://json.example.com/api/v1",
                "user_agent": "portfolio-admin/2.0"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from JSON file");

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://json.example.com/api/v1");
        assert_eq!(config.api.user_agent, Some("portfolio-admin/2.0".to_string()));

        // Cleanup
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[api]
base_url = "https://toml.example.com/api/v1"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from TOML file");

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://toml.example.com/api/v1");
        assert_eq!(config.api.user_agent, None);

        // Cleanup
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(result.is_err(), "Should fail when file not found");

        let err = result.unwrap_err();
        assert!(matches!(err, PortfolioError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let invalid_json = r#"{ "this is": "not valid json" "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_json.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        // Cleanup
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let content = "some content";
        let path = PathBuf::from("test.yaml");
        let result = parse_config(content, &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
