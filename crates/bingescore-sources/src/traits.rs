use async_trait::async_trait;
use bingescore_models::{
    EpisodeRatingEntry, ExternalIds, MediaDetails, MediaType, OverallRating, SearchResult,
};
use crate::error::SourceError;

/// Primary metadata source (TMDB): search, details, ID mapping, its own ratings
///
/// `search`, `get_details` and `get_external_ids` are required data and return
/// errors. Ratings and episodes are optional and absorb failures themselves.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    async fn get_details(&self, tmdb_id: u64, media_type: MediaType) -> Result<MediaDetails, SourceError>;

    async fn get_external_ids(&self, tmdb_id: u64, media_type: MediaType) -> Result<ExternalIds, SourceError>;

    /// Never fails; an unreachable provider yields a rating with a null score
    async fn get_overall_rating(&self, tmdb_id: u64, media_type: MediaType) -> OverallRating;

    /// Episodes of every season; empty when the series cannot be read
    async fn get_episode_ratings(&self, tmdb_id: u64) -> Vec<EpisodeRatingEntry>;

    /// Absolute URL for an image path returned in the provider's payloads
    fn image_url(&self, path: &str) -> String;
}

/// Secondary ratings source keyed by IMDb ID (OMDb)
#[async_trait]
pub trait RatingsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// `None` when the title is unknown upstream, the score is unparseable, or the call failed
    async fn get_overall_rating_by_imdb_id(&self, imdb_id: &str) -> Option<OverallRating>;
}

/// Social ratings source (Trakt) with its own identifier space
#[async_trait]
pub trait SocialProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Map a TMDB ID to the provider's slug (or numeric ID); `None` when there is no match
    async fn resolve_id(&self, tmdb_id: u64, media_type: MediaType) -> Option<String>;

    async fn get_overall_rating(&self, social_id: &str, media_type: MediaType) -> Option<OverallRating>;

    async fn get_episode_ratings(&self, social_id: &str) -> Vec<EpisodeRatingEntry>;
}
