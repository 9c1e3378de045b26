use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season number → episodes of that season, ascending by episode number
pub type EpisodesBySeason = BTreeMap<u32, Vec<EpisodeRatingEntry>>;

/// Rating data for a single episode
///
/// Each episode-capable provider fills in its own score field; the merge step
/// combines a catalog entry and a social entry that share a (season, episode) key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRatingEntry {
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub tmdb_score: Option<f64>,
    pub trakt_score: Option<f64>,
}

impl EpisodeRatingEntry {
    /// Composite key used to line up episodes across providers
    pub fn key(&self) -> (u32, u32) {
        (self.season_number, self.episode_number)
    }

    /// True when the title is missing or empty
    pub fn lacks_title(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
    }
}
