//! Application configuration for SiteScout.
//!
//! User config lives at `~/.sitescout/sitescout.toml`.
//! CLI flags override config file values, which override defaults.
//! Credentials are never stored in the file, only the names of the
//! environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteScoutError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sitescout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sitescout";

// ---------------------------------------------------------------------------
// Config structs (matching sitescout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Google Custom Search settings.
    #[serde(default)]
    pub google: GoogleConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Search provider: "google" or "duckduckgo".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Similarity threshold for duplicate clustering, on a 0–1 scale.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Maximum queries submitted to the provider per organization.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,

    /// Concurrent URL verification requests.
    #[serde(default = "default_verify_concurrency")]
    pub verify_concurrency: usize,

    /// Per-request verification timeout in seconds.
    #[serde(default = "default_verify_timeout_secs")]
    pub verify_timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            similarity_threshold: default_similarity_threshold(),
            max_queries: default_max_queries(),
            verify_concurrency: default_verify_concurrency(),
            verify_timeout_secs: default_verify_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    "google".into()
}
fn default_similarity_threshold() -> f64 {
    0.85
}
fn default_max_queries() -> usize {
    3
}
fn default_verify_concurrency() -> usize {
    10
}
fn default_verify_timeout_secs() -> u64 {
    10
}

/// `[google]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Name of the env var holding the API key (never the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the Custom Search Engine id.
    #[serde(default = "default_cse_id_env")]
    pub cse_id_env: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            cse_id_env: default_cse_id_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".into()
}
fn default_cse_id_env() -> String {
    "GOOGLE_CSE_ID".into()
}

// ---------------------------------------------------------------------------
// Runtime views (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime verification settings.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Bounded worker-pool width.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl From<&AppConfig> for VerifyConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            concurrency: config.defaults.verify_concurrency,
            timeout_secs: config.defaults.verify_timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sitescout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SiteScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sitescout/sitescout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteScoutError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SiteScoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SiteScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SiteScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SiteScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve Google credentials from the configured env vars.
/// Errors with an actionable message when either is missing.
pub fn google_credentials(config: &AppConfig) -> Result<(String, String)> {
    let key = require_env(&config.google.api_key_env)?;
    let cse_id = require_env(&config.google.cse_id_env)?;
    Ok((key, cse_id))
}

fn require_env(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(SiteScoutError::config(format!(
            "Google credentials not found. Set the {var_name} environment variable, \
             or run with --provider duckduckgo / --offline."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("similarity_threshold"));
        assert!(toml_str.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.similarity_threshold, 0.85);
        assert_eq!(parsed.defaults.verify_concurrency, 10);
        assert_eq!(parsed.google.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
provider = "duckduckgo"
verify_concurrency = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.provider, "duckduckgo");
        assert_eq!(config.defaults.verify_concurrency, 4);
        // Untouched fields keep their defaults.
        assert_eq!(config.defaults.max_queries, 3);
        assert_eq!(config.defaults.verify_timeout_secs, 10);
    }

    #[test]
    fn verify_config_from_app_config() {
        let app = AppConfig::default();
        let verify = VerifyConfig::from(&app);
        assert_eq!(verify.concurrency, 10);
        assert_eq!(verify.timeout_secs, 10);
    }

    #[test]
    fn missing_credentials_error() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.google.api_key_env = "SITESCOUT_TEST_NONEXISTENT_KEY_12345".into();
        let result = google_credentials(&config);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("credentials not found")
        );
    }
}
