use async_trait::async_trait;
use bingescore_models::OverallRating;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::http::create_client;
use crate::omdb::{api, DEFAULT_BASE_URL};
use crate::traits::RatingsProvider;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(create_client(timeout)),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl RatingsProvider for OmdbClient {
    fn provider_name(&self) -> &'static str {
        "omdb"
    }

    async fn get_overall_rating_by_imdb_id(&self, imdb_id: &str) -> Option<OverallRating> {
        match api::get_rating_by_imdb_id(&self.client, &self.base_url, &self.api_key, imdb_id).await {
            Ok(rating) => rating,
            Err(e) => {
                warn!("OMDb rating for {} unavailable: {}", imdb_id, e);
                None
            }
        }
    }
}
