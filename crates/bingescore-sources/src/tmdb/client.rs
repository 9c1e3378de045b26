use async_trait::async_trait;
use bingescore_models::{
    EpisodeRatingEntry, ExternalIds, MediaDetails, MediaType, OverallRating, RatingSource,
    SearchResult,
};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::http::create_client;
use crate::tmdb::{api, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use crate::traits::CatalogProvider;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(create_client(timeout)),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    fn provider_name(&self) -> &'static str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        api::search_multi(
            &self.client,
            &self.base_url,
            &self.image_base_url,
            &self.api_key,
            query,
        )
        .await
    }

    async fn get_details(&self, tmdb_id: u64, media_type: MediaType) -> Result<MediaDetails, SourceError> {
        api::get_media_details(&self.client, &self.base_url, &self.api_key, tmdb_id, media_type).await
    }

    async fn get_external_ids(&self, tmdb_id: u64, media_type: MediaType) -> Result<ExternalIds, SourceError> {
        api::get_external_ids(&self.client, &self.base_url, &self.api_key, tmdb_id, media_type).await
    }

    async fn get_overall_rating(&self, tmdb_id: u64, media_type: MediaType) -> OverallRating {
        match self.get_details(tmdb_id, media_type).await {
            // A zero average or count means TMDB has no votes yet
            Ok(details) => OverallRating::new(
                RatingSource::Tmdb,
                details.vote_average.filter(|score| *score > 0.0),
                details.vote_count.filter(|votes| *votes > 0),
            ),
            Err(e) => {
                warn!("TMDB rating for {} {} unavailable: {}", media_type, tmdb_id, e);
                OverallRating::unavailable(RatingSource::Tmdb)
            }
        }
    }

    async fn get_episode_ratings(&self, tmdb_id: u64) -> Vec<EpisodeRatingEntry> {
        let season_count = match self.get_details(tmdb_id, MediaType::Series).await {
            Ok(details) => details.number_of_seasons.unwrap_or(0),
            Err(e) => {
                warn!("TMDB series {} unavailable for episode ratings: {}", tmdb_id, e);
                return Vec::new();
            }
        };
        debug!("Fetching {} TMDB seasons for series {}", season_count, tmdb_id);

        let fetches = (1..=season_count).map(|season| async move {
            match api::get_season_episodes(&self.client, &self.base_url, &self.api_key, tmdb_id, season).await {
                Ok(episodes) => episodes,
                Err(e) => {
                    warn!("TMDB season {} of series {} skipped: {}", season, tmdb_id, e);
                    Vec::new()
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.image_base_url, path)
    }
}
