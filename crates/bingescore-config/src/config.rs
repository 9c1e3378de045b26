use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Value written into freshly generated config files
pub const PLACEHOLDER_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    /// Override for the API root (proxies, tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Override for the poster image prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraktConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout applied by every provider client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on each fan-out branch of an aggregation
    #[serde(default = "default_aggregate_timeout_secs")]
    pub aggregate_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    MissingKey(&'static str),
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("server.port must be greater than zero")]
    ZeroPort,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_aggregate_timeout_secs() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            aggregate_timeout_secs: default_aggregate_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn aggregate_timeout(&self) -> Duration {
        Duration::from_secs(self.aggregate_timeout_secs)
    }
}

fn is_unset(key: &str) -> bool {
    key.trim().is_empty() || key == PLACEHOLDER_KEY
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists (defaults otherwise), then apply environment overrides
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config with placeholder keys, written by `config init`
    pub fn template() -> Self {
        let mut config = Self::default();
        config.tmdb.api_key = PLACEHOLDER_KEY.to_string();
        config.omdb.api_key = PLACEHOLDER_KEY.to_string();
        config.trakt.client_id = PLACEHOLDER_KEY.to_string();
        config
    }

    /// Apply `TMDB_API_KEY`, `OMDB_API_KEY`, `TRAKT_CLIENT_ID` and `PORT`
    ///
    /// Takes the lookup as a closure so tests do not have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("TMDB_API_KEY").filter(|v| !v.is_empty()) {
            self.tmdb.api_key = key;
        }
        if let Some(key) = lookup("OMDB_API_KEY").filter(|v| !v.is_empty()) {
            self.omdb.api_key = key;
        }
        if let Some(id) = lookup("TRAKT_CLIENT_ID").filter(|v| !v.is_empty()) {
            self.trakt.client_id = id;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_unset(&self.tmdb.api_key) {
            return Err(ConfigError::MissingKey("tmdb.api_key"));
        }
        if is_unset(&self.omdb.api_key) {
            return Err(ConfigError::MissingKey("omdb.api_key"));
        }
        if is_unset(&self.trakt.client_id) {
            return Err(ConfigError::MissingKey("trakt.client_id"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("http.request_timeout_secs"));
        }
        if self.http.aggregate_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("http.aggregate_timeout_secs"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(())
    }

    /// Get list of providers that have credentials set
    pub fn get_configured_providers(&self) -> Vec<String> {
        let mut providers = Vec::new();
        if !is_unset(&self.tmdb.api_key) {
            providers.push("tmdb".to_string());
        }
        if !is_unset(&self.omdb.api_key) {
            providers.push("omdb".to_string());
        }
        if !is_unset(&self.trakt.client_id) {
            providers.push("trakt".to_string());
        }
        providers
    }
}
