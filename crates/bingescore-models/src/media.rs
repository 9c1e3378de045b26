use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a title belongs to.
///
/// Serialized as `"movie"` / `"tv"`; `"series"` and `"show"` are accepted on input
/// so callers can use whichever vocabulary their provider speaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    #[serde(rename = "tv", alias = "series", alias = "show")]
    Series,
}

impl MediaType {
    /// Path segment used by the catalog (TMDB) API
    pub fn catalog_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }

    /// Singular type name used by the social (Trakt) search API
    pub fn social_type(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "show",
        }
    }

    /// Plural collection name used by the social (Trakt) API paths
    pub fn social_collection(&self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Series => "shows",
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self, MediaType::Series)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_segment())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" | "series" | "show" => Ok(MediaType::Series),
            other => Err(format!("Invalid media type: {}. Use 'movie' or 'tv'", other)),
        }
    }
}

/// A single hit from the catalog's multi-search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Always "tmdb" - search is served by the catalog provider only
    pub provider: String,
    pub tmdb_id: u64,
    pub imdb_id: Option<String>,
    pub media_type: MediaType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// Primary record for a title as reported by the catalog provider
///
/// Movie-style and series-style fields are kept apart; the aggregator decides
/// which one wins when building the display title and year.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaDetails {
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub number_of_seasons: Option<u32>,
}

impl MediaDetails {
    /// Display title: movie title, then series name, then "Unknown"
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Unknown")
            .to_string()
    }

    /// Release year taken from whichever release-date field is present
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
            .and_then(crate::validation::release_year)
    }
}

/// Cross-provider identifiers reported by the catalog provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
}
