use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("BINGESCORE_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("bingescore");

        Ok(Self { config_dir })
    }

    pub fn from_docker_env() -> Self {
        Self {
            config_dir: container_base_path(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Config file location; `BINGESCORE_CONFIG` wins over the platform default
    pub fn config_file(&self) -> PathBuf {
        std::env::var("BINGESCORE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.config_dir.join("config.toml"))
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container image creates the base directory, so its presence means we run in Docker
        if container_base_path().exists() {
            return Self::from_docker_env();
        }

        // Otherwise, use platform-specific paths (e.g., ~/.config/bingescore on Linux)
        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}
