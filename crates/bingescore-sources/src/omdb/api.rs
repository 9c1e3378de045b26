use bingescore_models::{OverallRating, RatingSource};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::http::get_json;

const PROVIDER: &str = "omdb";

#[derive(Debug, Deserialize)]
struct OmdbTitle {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
}

/// Parse OMDb's vote count ("1,234,567"); a missing count reads as zero
pub(crate) fn parse_votes(raw: Option<&str>) -> Option<u64> {
    let cleaned: String = raw.unwrap_or_default().chars().filter(|c| *c != ',').collect();
    if cleaned.trim().is_empty() {
        return Some(0);
    }
    cleaned.trim().parse().ok()
}

pub(crate) fn parse_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|score| score.is_finite())
}

/// IMDb rating for a `tt` ID; `Ok(None)` when OMDb has no usable score
pub async fn get_rating_by_imdb_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<Option<OverallRating>, SourceError> {
    let url = format!("{}/", base_url);
    debug!("OMDb lookup: {}?i={}", url, imdb_id);

    let title: OmdbTitle = get_json(
        PROVIDER,
        client.get(&url).query(&[("i", imdb_id), ("apikey", api_key)]),
    )
    .await?;

    if title.response.eq_ignore_ascii_case("false") {
        warn!(
            "OMDb has no entry for {}: {}",
            imdb_id,
            title.error.as_deref().unwrap_or("unknown error")
        );
        return Ok(None);
    }

    let Some(score) = parse_rating(title.imdb_rating.as_deref()) else {
        debug!("OMDb rating for {} is not a number", imdb_id);
        return Ok(None);
    };

    Ok(Some(OverallRating::new(
        RatingSource::Imdb,
        Some(score),
        parse_votes(title.imdb_votes.as_deref()),
    )))
}
