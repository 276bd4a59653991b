//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub views: ViewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Auction API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Host that server-relative image paths resolve against
    #[serde(default = "default_asset_host")]
    pub asset_host: String,

    /// Bearer token attached to every request, if set
    #[serde(default)]
    pub auth_token: Option<String>,

    /// No timeout unless configured
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_asset_host() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_host: default_asset_host(),
            auth_token: None,
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// What a resource keeps after a failed refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// Keep the previous value and flag it stale
    #[default]
    Retain,
    /// Drop the previous value
    Clear,
}

/// Resource view behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Quiet window before a filter change triggers a list fetch
    #[serde(default = "default_filter_debounce")]
    pub filter_debounce_ms: u64,

    #[serde(default)]
    pub on_fetch_error: FetchErrorPolicy,

    /// Share fetched auctions across views
    #[serde(default = "default_shared_cache")]
    pub shared_cache: bool,
}

fn default_filter_debounce() -> u64 {
    300
}

fn default_shared_cache() -> bool {
    true
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filter_debounce_ms: default_filter_debounce(),
            on_fetch_error: FetchErrorPolicy::default(),
            shared_cache: default_shared_cache(),
        }
    }
}

impl ViewConfig {
    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("gavel").join("config.toml")),
            Some(PathBuf::from("/etc/gavel/config.toml")),
            Some(PathBuf::from("./gavel.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("GAVEL_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(host) = std::env::var("GAVEL_ASSET_HOST") {
            self.api.asset_host = host;
        }
        if let Ok(token) = std::env::var("GAVEL_AUTH_TOKEN") {
            self.api.auth_token = Some(token).filter(|t| !t.is_empty());
        }

        if let Ok(ms) = std::env::var("GAVEL_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.views.filter_debounce_ms = ms;
            }
        }

        if let Ok(level) = std::env::var("GAVEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GAVEL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Gavel Configuration
#
# Environment variables override these settings:
# - GAVEL_API_URL
# - GAVEL_ASSET_HOST
# - GAVEL_AUTH_TOKEN
# - GAVEL_DEBOUNCE_MS
# - GAVEL_LOG_LEVEL
# - GAVEL_LOG_FORMAT

[api]
# Auction REST API base URL
base_url = "http://localhost:3000/api"

# Host that auction image paths are resolved against
asset_host = "http://localhost:3000"

# Bearer token sent with every request
# auth_token = ""

# Request timeout in seconds (no timeout when unset)
# request_timeout_secs = 30

[views]
# Quiet window before a filter change refetches the auction list (ms)
filter_debounce_ms = 300

# What a view keeps when a refresh fails: "retain" (marked stale) or "clear"
on_fetch_error = "retain"

# Share fetched auctions between views
shared_cache = true

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
