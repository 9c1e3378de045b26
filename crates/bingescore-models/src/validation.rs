//! Invariant checks for the domain types.
//!
//! Scores live in [0, 10], votes are non-negative, IMDb IDs look like `tt123`,
//! years fall in 1800..=2100 and each season lists its episodes in strictly
//! ascending order.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::{
    AggregatedRatings, EpisodeRatingEntry, OverallRating, SearchResult, UnifiedMediaId,
};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} score {value} is outside 0-10")]
    ScoreOutOfRange { field: &'static str, value: f64 },
    #[error("invalid IMDb ID '{0}'")]
    InvalidImdbId(String),
    #[error("at least one ID must be present")]
    MissingIds,
    #[error("episode S{season}E{episode} has a non-positive episode number")]
    InvalidEpisodeNumber { season: u32, episode: u32 },
    #[error("season {season} is not strictly ascending at episode {episode}")]
    UnorderedSeason { season: u32, episode: u32 },
    #[error("episode S{season}E{episode} is filed under season {filed_under}")]
    MisfiledEpisode { season: u32, episode: u32, filed_under: u32 },
    #[error("year {0} is outside 1800-2100")]
    YearOutOfRange(i32),
    #[error("title must not be empty")]
    EmptyTitle,
}

fn imdb_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^tt\d+$").expect("static IMDb ID pattern"))
}

/// Check that an identifier has the IMDb shape (`tt` followed by digits)
pub fn is_valid_imdb_id(id: &str) -> bool {
    imdb_id_pattern().is_match(id)
}

/// Keep a score only if it is finite and within 0-10
pub fn normalize_score(score: f64) -> Option<f64> {
    if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Some(score)
    } else {
        None
    }
}

/// Calendar year of an ISO-8601 date (`YYYY-MM-DD`, optionally followed by a time)
pub fn release_year(date: &str) -> Option<i32> {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

fn check_score(field: &'static str, score: Option<f64>) -> Result<(), ValidationError> {
    match score {
        Some(value) if normalize_score(value).is_none() => {
            Err(ValidationError::ScoreOutOfRange { field, value })
        }
        _ => Ok(()),
    }
}

fn check_year(year: Option<i32>) -> Result<(), ValidationError> {
    match year {
        Some(y) if !(MIN_YEAR..=MAX_YEAR).contains(&y) => Err(ValidationError::YearOutOfRange(y)),
        _ => Ok(()),
    }
}

impl UnifiedMediaId {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::MissingIds);
        }
        if let Some(imdb_id) = &self.imdb_id {
            if !is_valid_imdb_id(imdb_id) {
                return Err(ValidationError::InvalidImdbId(imdb_id.clone()));
            }
        }
        Ok(())
    }
}

impl OverallRating {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_score(self.source.as_str(), self.score)
    }
}

impl EpisodeRatingEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.episode_number == 0 {
            return Err(ValidationError::InvalidEpisodeNumber {
                season: self.season_number,
                episode: self.episode_number,
            });
        }
        check_score("tmdbScore", self.tmdb_score)?;
        check_score("traktScore", self.trakt_score)
    }
}

impl SearchResult {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        check_year(self.year)
    }
}

impl AggregatedRatings {
    /// Check every invariant of the unified response, stopping at the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ids.validate()?;
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        check_year(self.year)?;

        for (_, rating) in self.overall.iter() {
            if let Some(rating) = rating {
                rating.validate()?;
            }
        }

        if let Some(seasons) = &self.episodes_by_season {
            for (season, episodes) in seasons {
                let mut previous: Option<u32> = None;
                for episode in episodes {
                    episode.validate()?;
                    if episode.season_number != *season {
                        return Err(ValidationError::MisfiledEpisode {
                            season: episode.season_number,
                            episode: episode.episode_number,
                            filed_under: *season,
                        });
                    }
                    if previous.map_or(false, |p| p >= episode.episode_number) {
                        return Err(ValidationError::UnorderedSeason {
                            season: *season,
                            episode: episode.episode_number,
                        });
                    }
                    previous = Some(episode.episode_number);
                }
            }
        }

        Ok(())
    }
}
