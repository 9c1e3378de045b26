pub mod aggregate;
pub mod config;
pub mod search;
pub mod serve;

use bingescore_config::{Config, PathManager};
use bingescore_core::RatingsAggregator;
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Config file (or defaults) with environment overrides applied
pub fn load_config() -> Result<Config> {
    let path = PathManager::default().config_file();
    Config::load(&path).map_err(|e| eyre!("{:#}", e))
}

pub fn build_aggregator(config: &Config) -> Result<RatingsAggregator> {
    RatingsAggregator::from_config(config).map_err(|e| {
        eyre!(
            "{:#}\nSet the keys in {} or via TMDB_API_KEY, OMDB_API_KEY and TRAKT_CLIENT_ID",
            e,
            PathManager::default().config_file().display()
        )
    })
}

/// Score with one decimal, or a dash when the provider had none
pub fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}
