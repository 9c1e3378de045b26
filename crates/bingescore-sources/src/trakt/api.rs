use bingescore_models::{normalize_score, EpisodeRatingEntry, MediaType, OverallRating, RatingSource};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;
use crate::http::{get_json, non_empty};

const PROVIDER: &str = "trakt";

#[derive(Debug, Deserialize)]
pub struct TraktIds {
    pub trakt: Option<u64>,
    pub slug: Option<String>,
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
}

impl TraktIds {
    /// Identifier to use in later calls: slug first, numeric ID otherwise
    pub fn preferred_id(&self) -> Option<String> {
        non_empty(self.slug.clone()).or_else(|| self.trakt.map(|id| id.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TraktMedia {
    ids: TraktIds,
}

#[derive(Debug, Deserialize)]
struct TraktSearchResult {
    movie: Option<TraktMedia>,
    show: Option<TraktMedia>,
}

#[derive(Debug, Deserialize)]
struct TraktRatings {
    rating: Option<serde_json::Value>,
    votes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TraktSeason {
    number: u32,
    episodes: Option<Vec<TraktSeasonEpisode>>,
}

#[derive(Debug, Deserialize)]
struct TraktSeasonEpisode {
    number: u32,
    title: Option<String>,
    rating: Option<f64>,
}

fn with_headers(request: RequestBuilder, client_id: &str) -> RequestBuilder {
    request
        .header("Content-Type", "application/json")
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
}

/// Look up the Trakt identity of a TMDB title
pub async fn resolve_trakt_id(
    client: &Client,
    base_url: &str,
    client_id: &str,
    tmdb_id: u64,
    media_type: MediaType,
) -> Result<Option<String>, SourceError> {
    let url = format!(
        "{}/search/tmdb/{}?type={}",
        base_url,
        tmdb_id,
        media_type.social_type()
    );
    debug!("Trakt search: {}", url);

    let results: Vec<TraktSearchResult> = get_json(PROVIDER, with_headers(client.get(&url), client_id)).await?;

    Ok(results
        .into_iter()
        .next()
        .and_then(|item| item.movie.or(item.show))
        .and_then(|media| media.ids.preferred_id()))
}

/// Community rating; `Ok(None)` when Trakt reports something other than a number
pub async fn get_ratings(
    client: &Client,
    base_url: &str,
    client_id: &str,
    trakt_id: &str,
    media_type: MediaType,
) -> Result<Option<OverallRating>, SourceError> {
    let url = format!(
        "{}/{}/{}/ratings",
        base_url,
        media_type.social_collection(),
        urlencoding::encode(trakt_id)
    );
    debug!("Trakt ratings: {}", url);

    let ratings: TraktRatings = get_json(PROVIDER, with_headers(client.get(&url), client_id)).await?;

    let Some(score) = ratings.rating.as_ref().and_then(|r| r.as_f64()) else {
        return Ok(None);
    };

    Ok(Some(OverallRating::new(
        RatingSource::Trakt,
        Some(score),
        ratings.votes.filter(|votes| *votes > 0),
    )))
}

/// Every episode of every season, specials included, with its community rating
pub async fn get_episode_ratings(
    client: &Client,
    base_url: &str,
    client_id: &str,
    trakt_id: &str,
) -> Result<Vec<EpisodeRatingEntry>, SourceError> {
    // `full` is what makes Trakt include per-episode ratings
    let url = format!(
        "{}/shows/{}/seasons?extended=full,episodes",
        base_url,
        urlencoding::encode(trakt_id)
    );
    debug!("Trakt seasons: {}", url);

    let seasons: Vec<TraktSeason> = get_json(PROVIDER, with_headers(client.get(&url), client_id)).await?;

    let mut episodes = Vec::new();
    for season in seasons {
        let season_number = season.number;
        for episode in season.episodes.unwrap_or_default() {
            if episode.number == 0 {
                continue;
            }
            episodes.push(EpisodeRatingEntry {
                season_number,
                episode_number: episode.number,
                title: non_empty(episode.title),
                tmdb_score: None,
                trakt_score: episode
                    .rating
                    .filter(|score| *score > 0.0)
                    .and_then(normalize_score),
            });
        }
    }

    Ok(episodes)
}
