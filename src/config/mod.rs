//! Configuration management for the reader.
//!
//! Configuration is read from `~/.config/mattelevizion/config.toml` at startup,
//! then overridden from the environment. If the file doesn't exist, a default
//! configuration with comments is created.

pub mod client;

pub use client::ClientConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_GHOST_URL: &str = "GHOST_URL";
pub const ENV_GHOST_KEY: &str = "GHOST_CONTENT_API_KEY";
pub const ENV_GHOST_VERSION: &str = "GHOST_API_VERSION";
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_ANON_KEY";

pub const DEFAULT_GHOST_URL: &str = "https://your-ghost-site.com";
pub const DEFAULT_API_VERSION: &str = "v6.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ghost: GhostConfig,
    pub push: PushConfig,
}

/// Content backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Site URL, also used to recognise web links to articles
    pub url: String,

    /// Content API key (empty disables the content client)
    pub key: String,

    /// Value sent as `Accept-Version`
    pub version: String,

    /// Request timeout in seconds (default: 10, 0 means default)
    pub timeout_secs: u64,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GHOST_URL.to_string(),
            key: String::new(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GhostConfig {
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

/// Push token persistence settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Platform label stored alongside each token
    pub platform: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            platform: "expo".to_string(),
        }
    }
}

impl PushConfig {
    pub fn is_configured(&self) -> bool {
        !self.supabase_url.trim().is_empty() && !self.supabase_anon_key.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from the default path, then apply environment overrides.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load an explicit config file, then apply environment overrides.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path without touching the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Override file values with any variables `lookup` returns.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_GHOST_URL) {
            self.ghost.url = url;
        }
        if let Some(key) = lookup(ENV_GHOST_KEY) {
            self.ghost.key = key;
        }
        if let Some(version) = lookup(ENV_GHOST_VERSION) {
            self.ghost.version = version;
        }
        if let Some(url) = lookup(ENV_SUPABASE_URL) {
            self.push.supabase_url = url;
        }
        if let Some(key) = lookup(ENV_SUPABASE_KEY) {
            self.push.supabase_anon_key = key;
        }
    }

    /// The immutable view handed to the content client and link resolver.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.ghost.url, &self.ghost.key, &self.ghost.version)
    }

    /// Get the default config file path: `~/.config/mattelevizion/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("mattelevizion").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Mattelevizion reader configuration
#
# Every value here can be overridden from the environment:
#   GHOST_URL, GHOST_CONTENT_API_KEY, GHOST_API_VERSION,
#   SUPABASE_URL, SUPABASE_ANON_KEY

[ghost]
# Your Ghost site. Links to this host open as articles.
url = "https://your-ghost-site.com"

# Ghost Admin -> Settings -> Integrations -> Add custom integration -> Content API key.
# Leave empty to run with the content client disabled.
key = ""

version = "v6.0"

# Request timeout in seconds
timeout_secs = 10

[push]
# Where push tokens are stored. Leave empty to skip token registration.
supabase_url = ""
supabase_anon_key = ""
platform = "expo"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
