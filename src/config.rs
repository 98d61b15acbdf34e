//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\subaba\config.toml
//! - macOS: ~/Library/Application Support/subaba/config.toml
//! - Linux: ~/.config/subaba/config.toml
//!
//! Command-line flags and the `OPENSUBTITLES_API_KEY` / `USER_BEARER_TOKEN`
//! environment variables take precedence over values from the file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default API root for the subtitle service.
pub const DEFAULT_BASE_URL: &str = "https://api.opensubtitles.com/api/v1";

/// User agent registered with the subtitle service.
pub const DEFAULT_USER_AGENT: &str = "Subaba v1.0.0";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// API endpoint settings
    pub api: ApiConfig,

    /// Search and download defaults
    pub search: SearchConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Subtitle service API key (sent as `Api-Key`)
    pub api_key: Option<String>,

    /// User bearer token, required for downloads only
    pub bearer_token: Option<String>,
}

/// API endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Search and download defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Language codes used when none are given on the command line
    pub languages: Vec<String>,

    /// Where downloaded subtitles are saved (empty = current directory)
    pub download_dir: Option<PathBuf>,
}

impl Config {
    /// Apply command-line / environment overrides on top of file values.
    pub fn with_overrides(mut self, api_key: Option<&str>, bearer_token: Option<&str>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.credentials.api_key = Some(key.to_string());
        }
        if let Some(token) = bearer_token.filter(|t| !t.is_empty()) {
            self.credentials.bearer_token = Some(token.to_string());
        }
        self
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("subaba"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir)
}

/// Save configuration into `dir/config.toml`
pub fn save_to(config: &Config, dir: &std::path::Path) -> Result<PathBuf, ConfigError> {
    let path = dir.join("config.toml");

    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
