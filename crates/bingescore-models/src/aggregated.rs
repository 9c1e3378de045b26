use serde::{Deserialize, Serialize};
use crate::{EpisodesBySeason, MediaType, OverallRatings, UnifiedMediaId};

/// Unified view of one title's ratings across all providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRatings {
    pub ids: UnifiedMediaId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub overall: OverallRatings,
    /// Only present for series when at least one provider returned episodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes_by_season: Option<EpisodesBySeason>,
}

impl AggregatedRatings {
    /// Total number of merged episodes across all seasons
    pub fn episode_count(&self) -> usize {
        self.episodes_by_season
            .as_ref()
            .map(|seasons| seasons.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpisodeRatingEntry, OverallRating, RatingSource};
    use std::collections::BTreeMap;

    fn sample(episodes: Option<EpisodesBySeason>) -> AggregatedRatings {
        AggregatedRatings {
            ids: UnifiedMediaId::new(MediaType::Series, 1396),
            title: "Breaking Bad".to_string(),
            year: Some(2008),
            media_type: MediaType::Series,
            overview: None,
            poster_url: None,
            overall: OverallRatings {
                tmdb: Some(OverallRating::new(RatingSource::Tmdb, Some(8.9), Some(14000))),
                imdb: None,
                trakt: None,
            },
            episodes_by_season: episodes,
        }
    }

    #[test]
    fn test_wire_shape() {
        let mut seasons = BTreeMap::new();
        seasons.insert(
            1,
            vec![EpisodeRatingEntry {
                season_number: 1,
                episode_number: 1,
                title: Some("Pilot".to_string()),
                tmdb_score: Some(8.5),
                trakt_score: None,
            }],
        );
        let json = serde_json::to_value(sample(Some(seasons))).unwrap();

        assert_eq!(json["mediaType"], "tv");
        assert!(json["posterUrl"].is_null());
        assert!(json.get("overview").is_none());
        assert!(json["overall"]["imdb"].is_null());
        assert_eq!(json["episodesBySeason"]["1"][0]["title"], "Pilot");
        assert_eq!(json["episodesBySeason"]["1"][0]["tmdbScore"], 8.5);
    }

    #[test]
    fn test_episodes_omitted_when_absent() {
        let ratings = sample(None);
        let json = serde_json::to_value(&ratings).unwrap();
        assert!(json.get("episodesBySeason").is_none());
        assert_eq!(ratings.episode_count(), 0);
    }
}
