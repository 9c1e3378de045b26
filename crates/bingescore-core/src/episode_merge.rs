use bingescore_models::{EpisodeRatingEntry, EpisodesBySeason};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Merge catalog episodes (`primary`) with social episodes (`secondary`) into a season map
///
/// Entries sharing a (season, episode) key are combined: the social score always
/// comes from `secondary`, the title only when `primary` has none and `secondary` has one. Episodes that
/// only `secondary` knows are kept as they are, with or without a title. Each
/// season is sorted by episode number.
pub fn merge_episode_ratings(
    primary: Vec<EpisodeRatingEntry>,
    secondary: Vec<EpisodeRatingEntry>,
) -> EpisodesBySeason {
    let mut merged: HashMap<(u32, u32), EpisodeRatingEntry> =
        HashMap::with_capacity(primary.len() + secondary.len());

    for entry in primary {
        merged.insert(entry.key(), entry);
    }

    for entry in secondary {
        match merged.entry(entry.key()) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.trakt_score = entry.trakt_score;
                if existing.lacks_title() && entry.title.is_some() {
                    existing.title = entry.title;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    let mut by_season = EpisodesBySeason::new();
    for entry in merged.into_values() {
        by_season.entry(entry.season_number).or_default().push(entry);
    }
    for episodes in by_season.values_mut() {
        episodes.sort_by_key(|e| e.episode_number);
    }

    by_season
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmdb(season: u32, episode: u32, title: Option<&str>, score: Option<f64>) -> EpisodeRatingEntry {
        EpisodeRatingEntry {
            season_number: season,
            episode_number: episode,
            title: title.map(str::to_string),
            tmdb_score: score,
            trakt_score: None,
        }
    }

    fn trakt(season: u32, episode: u32, title: Option<&str>, score: Option<f64>) -> EpisodeRatingEntry {
        EpisodeRatingEntry {
            season_number: season,
            episode_number: episode,
            title: title.map(str::to_string),
            tmdb_score: None,
            trakt_score: score,
        }
    }

    #[test]
    fn test_merge_shared_and_secondary_only() {
        let merged = merge_episode_ratings(
            vec![tmdb(1, 1, Some("Pilot"), Some(8.5))],
            vec![trakt(1, 1, None, Some(8.2)), trakt(1, 2, Some("X"), Some(7.9))],
        );

        assert_eq!(merged.len(), 1);
        let season = &merged[&1];
        assert_eq!(season.len(), 2);
        assert_eq!(season[0], EpisodeRatingEntry {
            season_number: 1,
            episode_number: 1,
            title: Some("Pilot".to_string()),
            tmdb_score: Some(8.5),
            trakt_score: Some(8.2),
        });
        assert_eq!(season[1].episode_number, 2);
        assert_eq!(season[1].title.as_deref(), Some("X"));
        assert_eq!(season[1].tmdb_score, None);
        assert_eq!(season[1].trakt_score, Some(7.9));
    }

    #[test]
    fn test_title_filled_only_when_missing() {
        let merged = merge_episode_ratings(
            vec![tmdb(2, 1, Some(""), Some(7.0)), tmdb(2, 2, Some("Kept"), Some(7.5))],
            vec![trakt(2, 1, Some("From Trakt"), Some(6.9)), trakt(2, 2, Some("Ignored"), None)],
        );

        let season = &merged[&2];
        assert_eq!(season[0].title.as_deref(), Some("From Trakt"));
        assert_eq!(season[1].title.as_deref(), Some("Kept"));
        // The social score is taken even when it is null
        assert_eq!(season[1].trakt_score, None);
        assert_eq!(season[1].tmdb_score, Some(7.5));
    }

    #[test]
    fn test_missing_secondary_title_keeps_primary() {
        let merged = merge_episode_ratings(
            vec![tmdb(1, 1, Some(""), Some(7.0))],
            vec![trakt(1, 1, None, Some(7.3))],
        );

        let entry = &merged[&1][0];
        assert_eq!(entry.title.as_deref(), Some(""));
        assert_eq!(entry.trakt_score, Some(7.3));
    }

    #[test]
    fn test_merge_with_empty_secondary_groups_and_sorts() {
        let merged = merge_episode_ratings(
            vec![
                tmdb(2, 3, Some("c"), None),
                tmdb(1, 2, Some("b"), None),
                tmdb(2, 1, Some("a"), None),
                tmdb(1, 1, Some("a"), None),
            ],
            Vec::new(),
        );

        let seasons: Vec<u32> = merged.keys().copied().collect();
        assert_eq!(seasons, vec![1, 2]);
        let numbers: Vec<u32> = merged[&2].iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_later_primary_duplicate_wins() {
        let merged = merge_episode_ratings(
            vec![tmdb(1, 1, Some("First"), Some(5.0)), tmdb(1, 1, Some("Second"), Some(6.0))],
            Vec::new(),
        );

        assert_eq!(merged[&1].len(), 1);
        assert_eq!(merged[&1][0].title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_secondary_only_untitled_entry_is_kept() {
        let merged = merge_episode_ratings(Vec::new(), vec![trakt(3, 4, None, Some(8.0))]);
        let entry = &merged[&3][0];
        assert_eq!(entry.title, None);
        assert_eq!(entry.trakt_score, Some(8.0));
    }

    #[test]
    fn test_no_duplicates_and_strictly_ascending() {
        let primary: Vec<_> = (1..=10).rev().map(|n| tmdb(1, n, None, Some(7.0))).collect();
        let secondary: Vec<_> = (5..=14).map(|n| trakt(1, n, Some("t"), Some(8.0))).collect();
        let merged = merge_episode_ratings(primary, secondary);

        let season = &merged[&1];
        assert_eq!(season.len(), 14);
        assert!(season.windows(2).all(|w| w[0].episode_number < w[1].episode_number));
    }
}
