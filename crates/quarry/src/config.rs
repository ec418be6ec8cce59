//! Configuration management for Quarry
//!
//! Configuration is read from JSON. Every field has a default, so an empty
//! object (or no file at all) yields a usable setup pointed at a local
//! backend.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Largest result count the search backend accepts
pub const MAX_TOP_K: u32 = 50;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "QUARRY_CONFIG";
/// Environment variable overriding `client.base_url`
pub const BASE_URL_ENV: &str = "QUARRY_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub client: ClientConfig,
  #[serde(default)]
  pub session: SessionConfig,
}

/// Where and how the search backend is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
  /// Base URL of the backend (e.g., "http://localhost:8000")
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Route of the search endpoint, appended to `base_url`
  #[serde(default = "default_search_path")]
  pub search_path: String,
  /// Request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
  /// Number of results requested per search
  #[serde(default = "default_top_k")]
  pub top_k: u32,
}

fn default_base_url() -> String {
  "http://localhost:8000".to_string()
}
fn default_search_path() -> String {
  "/api/search".to_string()
}
fn default_timeout_secs() -> u64 {
  30
}
fn default_top_k() -> u32 {
  5
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      search_path: default_search_path(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl ClientConfig {
  /// Full URL of the search route
  pub fn endpoint(&self) -> String {
    let base = self.base_url.trim_end_matches('/');
    let path = self.search_path.trim_start_matches('/');
    format!("{base}/{path}")
  }
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self { top_k: default_top_k() }
  }
}

/// Check that a result count is one the backend will accept
pub fn validate_top_k(top_k: u32) -> Result<u32, ConfigError> {
  if top_k == 0 || top_k > MAX_TOP_K {
    return Err(ConfigError::invalid(format!(
      "top_k must be between 1 and {MAX_TOP_K}, got {top_k}"
    )));
  }
  Ok(top_k)
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: display.clone(), source })?;
    let config: Config = serde_json::from_str(&content)
      .map_err(|source| ConfigError::Parse { path: display, source })?;
    Ok(config)
  }

  /// Load configuration from the first file found, falling back to defaults,
  /// then apply environment overrides and validate the result.
  pub fn load() -> Result<Self, ConfigError> {
    let mut config = match Self::find_config_file() {
      Some(path) => {
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::load_from_file(path)?
      }
      None => Config::default(),
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
  }

  /// Candidate config files in lookup order
  pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
      paths.push(PathBuf::from(explicit));
    }
    paths.push(PathBuf::from("quarry.json"));
    paths.push(PathBuf::from(".quarry").join("config.json"));
    if let Some(config_dir) = dirs::config_dir() {
      paths.push(config_dir.join("quarry").join("config.json"));
    }
    paths
  }

  fn find_config_file() -> Option<PathBuf> {
    Self::search_paths().into_iter().find(|path| path.is_file())
  }

  pub fn apply_env_overrides(&mut self) {
    if let Ok(base_url) = env::var(BASE_URL_ENV) {
      if !base_url.trim().is_empty() {
        self.client.base_url = base_url.trim().to_string();
      }
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let base_url = &self.client.base_url;
    let url = url::Url::parse(base_url)
      .map_err(|e| ConfigError::invalid(format!("base_url '{base_url}' is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
      let scheme = url.scheme();
      return Err(ConfigError::invalid(format!("base_url must use http or https, got '{scheme}'")));
    }
    if self.client.timeout_secs == 0 {
      return Err(ConfigError::invalid("timeout_secs must be greater than zero"));
    }
    validate_top_k(self.session.top_k)?;
    Ok(())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(self)
      .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })?;
    std::fs::write(path, content)
      .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })
  }
}
