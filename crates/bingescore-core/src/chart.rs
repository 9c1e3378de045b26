use bingescore_models::EpisodeRatingEntry;
use serde::Serialize;

/// One point of a per-season rating series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeChartPoint {
    pub episode: u32,
    pub title: String,
    pub tmdb: Option<f64>,
    pub trakt: Option<f64>,
}

/// Turn one season's episodes into a series numbered from 1
///
/// Upstream numbering can be absolute across seasons, so episodes are sorted and
/// renumbered; missing titles become "Episode {n}" using the new number.
pub fn season_chart_points(episodes: &[EpisodeRatingEntry]) -> Vec<EpisodeChartPoint> {
    let mut sorted: Vec<&EpisodeRatingEntry> = episodes.iter().collect();
    sorted.sort_by_key(|e| e.episode_number);

    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(entry, episode)| EpisodeChartPoint {
            episode,
            title: entry
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| format!("Episode {}", episode)),
            tmdb: entry.tmdb_score,
            trakt: entry.trakt_score,
        })
        .collect()
}
