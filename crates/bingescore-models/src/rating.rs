use serde::{Deserialize, Serialize};
use std::fmt;
use crate::validation::normalize_score;

/// Provider that produced a headline score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RatingSource {
    Tmdb,  // 0-10 vote average
    Imdb,  // 1-10 with one decimal, served by OMDb
    Trakt, // 0-10 community average
}

impl RatingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingSource::Tmdb => "tmdb",
            RatingSource::Imdb => "imdb",
            RatingSource::Trakt => "trakt",
        }
    }
}

impl fmt::Display for RatingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider's headline score for a title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallRating {
    pub source: RatingSource,
    pub score: Option<f64>,
    pub votes: Option<u64>,
}

impl OverallRating {
    /// Build a rating, dropping scores that fall outside 0-10
    pub fn new(source: RatingSource, score: Option<f64>, votes: Option<u64>) -> Self {
        Self {
            source,
            score: score.and_then(normalize_score),
            votes,
        }
    }

    /// Rating record for a provider that answered but had no score
    pub fn unavailable(source: RatingSource) -> Self {
        Self {
            source,
            score: None,
            votes: None,
        }
    }
}

/// Headline scores keyed by provider
///
/// Every key is always serialized; a provider that was down or had no data is `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallRatings {
    pub tmdb: Option<OverallRating>,
    pub imdb: Option<OverallRating>,
    pub trakt: Option<OverallRating>,
}

impl OverallRatings {
    pub fn get(&self, source: RatingSource) -> Option<&OverallRating> {
        match source {
            RatingSource::Tmdb => self.tmdb.as_ref(),
            RatingSource::Imdb => self.imdb.as_ref(),
            RatingSource::Trakt => self.trakt.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatingSource, Option<&OverallRating>)> {
        [RatingSource::Tmdb, RatingSource::Imdb, RatingSource::Trakt]
            .into_iter()
            .map(move |source| (source, self.get(source)))
    }
}
