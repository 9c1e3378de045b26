use bingescore_models::{
    normalize_score, release_year, EpisodeRatingEntry, ExternalIds, MediaDetails, MediaType, SearchResult,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;
use crate::http::{get_json, non_empty};

const PROVIDER: &str = "tmdb";

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchItem {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetails {
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    number_of_seasons: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TmdbExternalIds {
    imdb_id: Option<String>,
    tvdb_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TmdbSeason {
    #[serde(default)]
    episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Deserialize)]
struct TmdbEpisode {
    season_number: u32,
    episode_number: u32,
    name: Option<String>,
    vote_average: Option<f64>,
}

impl From<TmdbDetails> for MediaDetails {
    fn from(details: TmdbDetails) -> Self {
        MediaDetails {
            title: non_empty(details.title),
            name: non_empty(details.name),
            overview: non_empty(details.overview),
            poster_path: non_empty(details.poster_path),
            release_date: non_empty(details.release_date),
            first_air_date: non_empty(details.first_air_date),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            number_of_seasons: details.number_of_seasons,
        }
    }
}

impl From<TmdbEpisode> for EpisodeRatingEntry {
    fn from(episode: TmdbEpisode) -> Self {
        EpisodeRatingEntry {
            season_number: episode.season_number,
            episode_number: episode.episode_number,
            title: non_empty(episode.name),
            tmdb_score: episode
                .vote_average
                .filter(|score| *score > 0.0)
                .and_then(normalize_score),
            trakt_score: None,
        }
    }
}

fn image_url(image_base_url: &str, path: Option<String>) -> Option<String> {
    non_empty(path).map(|p| format!("{}{}", image_base_url, p))
}

/// Convert a multi-search hit; people and titleless entries are skipped
fn convert_search_item(item: TmdbSearchItem, image_base_url: &str) -> Option<SearchResult> {
    let media_type = match item.media_type.as_deref() {
        Some("movie") => MediaType::Movie,
        Some("tv") => MediaType::Series,
        _ => return None,
    };

    let title = non_empty(item.title).or_else(|| non_empty(item.name))?;
    let year = non_empty(item.release_date)
        .or_else(|| non_empty(item.first_air_date))
        .and_then(|date| release_year(&date));

    Some(SearchResult {
        provider: PROVIDER.to_string(),
        tmdb_id: item.id,
        imdb_id: None,
        media_type,
        title,
        original_title: non_empty(item.original_title).or_else(|| non_empty(item.original_name)),
        year,
        overview: non_empty(item.overview),
        poster_url: image_url(image_base_url, item.poster_path),
        backdrop_url: image_url(image_base_url, item.backdrop_path),
    })
}

/// Search movies and series in one call
pub async fn search_multi(
    client: &Client,
    base_url: &str,
    image_base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let url = format!(
        "{}/search/multi?query={}&include_adult=false&language=en-US&page=1",
        base_url,
        urlencoding::encode(query)
    );
    debug!("TMDB search: {}", url);

    let response: TmdbSearchResponse =
        get_json(PROVIDER, client.get(&url).query(&[("api_key", api_key)])).await?;

    Ok(response
        .results
        .into_iter()
        .filter_map(|item| convert_search_item(item, image_base_url))
        .collect())
}

pub async fn get_media_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    tmdb_id: u64,
    media_type: MediaType,
) -> Result<MediaDetails, SourceError> {
    let url = format!("{}/{}/{}", base_url, media_type.catalog_segment(), tmdb_id);
    debug!("TMDB details: {}", url);

    let details: TmdbDetails = get_json(
        PROVIDER,
        client.get(&url).query(&[("api_key", api_key), ("language", "en-US")]),
    )
    .await?;

    Ok(details.into())
}

pub async fn get_external_ids(
    client: &Client,
    base_url: &str,
    api_key: &str,
    tmdb_id: u64,
    media_type: MediaType,
) -> Result<ExternalIds, SourceError> {
    let url = format!(
        "{}/{}/{}/external_ids",
        base_url,
        media_type.catalog_segment(),
        tmdb_id
    );
    debug!("TMDB external ids: {}", url);

    let ids: TmdbExternalIds =
        get_json(PROVIDER, client.get(&url).query(&[("api_key", api_key)])).await?;

    Ok(ExternalIds {
        imdb_id: non_empty(ids.imdb_id),
        tvdb_id: ids.tvdb_id,
    })
}

/// Episodes of one season; entries numbered 0 are dropped
pub async fn get_season_episodes(
    client: &Client,
    base_url: &str,
    api_key: &str,
    tmdb_id: u64,
    season_number: u32,
) -> Result<Vec<EpisodeRatingEntry>, SourceError> {
    let url = format!("{}/tv/{}/season/{}", base_url, tmdb_id, season_number);
    debug!("TMDB season: {}", url);

    let season: TmdbSeason = get_json(
        PROVIDER,
        client.get(&url).query(&[("api_key", api_key), ("language", "en-US")]),
    )
    .await?;

    Ok(season
        .episodes
        .into_iter()
        .filter(|ep| ep.episode_number > 0)
        .map(EpisodeRatingEntry::from)
        .collect())
}
