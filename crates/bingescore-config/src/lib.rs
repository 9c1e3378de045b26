pub mod config;
pub mod paths;

pub use config::{Config, ConfigError, HttpConfig, LoggingConfig, OmdbConfig, ServerConfig, TmdbConfig, TraktConfig, PLACEHOLDER_KEY};
pub use paths::{PathManager, container_base_path};
