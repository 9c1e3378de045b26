//! Builds the three provider adapters from configuration.

use anyhow::{Context, Result};
use bingescore_config::Config;
use std::sync::Arc;
use tracing::debug;

use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::trakt::TraktClient;
use crate::traits::{CatalogProvider, RatingsProvider, SocialProvider};

/// The provider adapters one aggregation needs
#[derive(Clone)]
pub struct ProviderSet {
    pub catalog: Arc<dyn CatalogProvider>,
    pub ratings: Arc<dyn RatingsProvider>,
    pub social: Arc<dyn SocialProvider>,
}

impl ProviderSet {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        ratings: Arc<dyn RatingsProvider>,
        social: Arc<dyn SocialProvider>,
    ) -> Self {
        Self { catalog, ratings, social }
    }

    /// Validate credentials and build every adapter with the configured timeout and base URLs
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().context("Invalid provider configuration")?;

        let timeout = config.http.request_timeout();

        let mut tmdb = TmdbClient::new(config.tmdb.api_key.clone(), timeout);
        if let Some(url) = &config.tmdb.base_url {
            tmdb = tmdb.with_base_url(url.as_str());
        }
        if let Some(url) = &config.tmdb.image_base_url {
            tmdb = tmdb.with_image_base_url(url.as_str());
        }

        let mut omdb = OmdbClient::new(config.omdb.api_key.clone(), timeout);
        if let Some(url) = &config.omdb.base_url {
            omdb = omdb.with_base_url(url.as_str());
        }

        let mut trakt = TraktClient::new(config.trakt.client_id.clone(), timeout);
        if let Some(url) = &config.trakt.base_url {
            trakt = trakt.with_base_url(url.as_str());
        }

        debug!(
            "Built providers {:?} with {:?} request timeout",
            config.get_configured_providers(),
            timeout
        );

        Ok(Self::new(Arc::new(tmdb), Arc::new(omdb), Arc::new(trakt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_keys() {
        let err = ProviderSet::from_config(&Config::template()).err().unwrap();
        assert!(format!("{:#}", err).contains("tmdb.api_key"));
    }

    #[test]
    fn test_from_config_builds_all_providers() {
        let mut config = Config::default();
        config.tmdb.api_key = "a".to_string();
        config.omdb.api_key = "b".to_string();
        config.trakt.client_id = "c".to_string();
        config.tmdb.image_base_url = Some("https://img.test/w300".to_string());

        let providers = ProviderSet::from_config(&config).unwrap();
        assert_eq!(providers.catalog.provider_name(), "tmdb");
        assert_eq!(providers.ratings.provider_name(), "omdb");
        assert_eq!(providers.social.provider_name(), "trakt");
        assert_eq!(providers.catalog.image_url("/p.jpg"), "https://img.test/w300/p.jpg");
    }
}
