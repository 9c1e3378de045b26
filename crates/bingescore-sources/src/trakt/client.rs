use crate::http::create_client;
use crate::trakt::{api, DEFAULT_BASE_URL};
use crate::traits::SocialProvider;
use async_trait::async_trait;
use bingescore_models::{EpisodeRatingEntry, MediaType, OverallRating};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TraktClient {
    client: Arc<Client>,
    client_id: String,
    base_url: String,
}

impl TraktClient {
    pub fn new(client_id: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(create_client(timeout)),
            client_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SocialProvider for TraktClient {
    fn provider_name(&self) -> &'static str {
        "trakt"
    }

    async fn resolve_id(&self, tmdb_id: u64, media_type: MediaType) -> Option<String> {
        match api::resolve_trakt_id(&self.client, &self.base_url, &self.client_id, tmdb_id, media_type).await {
            Ok(Some(id)) => {
                debug!("Resolved TMDB {} {} to Trakt {}", media_type, tmdb_id, id);
                Some(id)
            }
            Ok(None) => {
                debug!("No Trakt match for TMDB {} {}", media_type, tmdb_id);
                None
            }
            Err(e) => {
                warn!("Trakt lookup for TMDB {} {} failed: {}", media_type, tmdb_id, e);
                None
            }
        }
    }

    async fn get_overall_rating(&self, social_id: &str, media_type: MediaType) -> Option<OverallRating> {
        api::get_ratings(&self.client, &self.base_url, &self.client_id, social_id, media_type)
            .await
            .unwrap_or_else(|e| {
                warn!("Trakt rating for {} unavailable: {}", social_id, e);
                None
            })
    }

    async fn get_episode_ratings(&self, social_id: &str) -> Vec<EpisodeRatingEntry> {
        api::get_episode_ratings(&self.client, &self.base_url, &self.client_id, social_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Trakt episode ratings for {} unavailable: {}", social_id, e);
                Vec::new()
            })
    }
}
