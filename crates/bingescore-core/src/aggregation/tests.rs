use super::*;
use async_trait::async_trait;
use bingescore_models::{
    EpisodeRatingEntry, ExternalIds, MediaDetails, OverallRating, RatingSource,
};
use bingescore_sources::{CatalogProvider, RatingsProvider, SocialProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const LIMIT: Duration = Duration::from_millis(200);

#[derive(Default)]
struct FakeCatalog {
    details: Option<MediaDetails>,
    details_status: Option<u16>,
    details_delay: Option<Duration>,
    ids_status: Option<u16>,
    imdb_id: Option<String>,
    score: Option<f64>,
    episodes: Vec<EpisodeRatingEntry>,
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    fn provider_name(&self) -> &'static str {
        "tmdb"
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SourceError> {
        Ok(Vec::new())
    }

    async fn get_details(&self, _tmdb_id: u64, _media_type: MediaType) -> Result<MediaDetails, SourceError> {
        if let Some(delay) = self.details_delay {
            tokio::time::sleep(delay).await;
        }
        match (&self.details, self.details_status) {
            (Some(details), None) => Ok(details.clone()),
            (_, status) => Err(SourceError::Status {
                provider: "tmdb",
                status: status.unwrap_or(404),
                message: "fake".to_string(),
            }),
        }
    }

    async fn get_external_ids(&self, _tmdb_id: u64, _media_type: MediaType) -> Result<ExternalIds, SourceError> {
        if let Some(status) = self.ids_status {
            return Err(SourceError::Status {
                provider: "tmdb",
                status,
                message: "fake".to_string(),
            });
        }
        Ok(ExternalIds {
            imdb_id: self.imdb_id.clone(),
            tvdb_id: None,
        })
    }

    async fn get_overall_rating(&self, _tmdb_id: u64, _media_type: MediaType) -> OverallRating {
        OverallRating::new(RatingSource::Tmdb, self.score, self.score.map(|_| 1200))
    }

    async fn get_episode_ratings(&self, _tmdb_id: u64) -> Vec<EpisodeRatingEntry> {
        self.episodes.clone()
    }

    fn image_url(&self, path: &str) -> String {
        format!("https://img.test/w500{}", path)
    }
}

#[derive(Default)]
struct FakeRatings {
    rating: Option<OverallRating>,
    calls: AtomicUsize,
}

#[async_trait]
impl RatingsProvider for FakeRatings {
    fn provider_name(&self) -> &'static str {
        "omdb"
    }

    async fn get_overall_rating_by_imdb_id(&self, _imdb_id: &str) -> Option<OverallRating> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rating.clone()
    }
}

#[derive(Default)]
struct FakeSocial {
    trakt_id: Option<String>,
    rating: Option<OverallRating>,
    episodes: Vec<EpisodeRatingEntry>,
    episode_delay: Option<Duration>,
}

#[async_trait]
impl SocialProvider for FakeSocial {
    fn provider_name(&self) -> &'static str {
        "trakt"
    }

    async fn resolve_id(&self, _tmdb_id: u64, _media_type: MediaType) -> Option<String> {
        self.trakt_id.clone()
    }

    async fn get_overall_rating(&self, _social_id: &str, _media_type: MediaType) -> Option<OverallRating> {
        self.rating.clone()
    }

    async fn get_episode_ratings(&self, _social_id: &str) -> Vec<EpisodeRatingEntry> {
        if let Some(delay) = self.episode_delay {
            tokio::time::sleep(delay).await;
        }
        self.episodes.clone()
    }
}

fn aggregator(catalog: FakeCatalog, ratings: Arc<FakeRatings>, social: FakeSocial) -> RatingsAggregator {
    RatingsAggregator::new(
        ProviderSet::new(Arc::new(catalog), ratings, Arc::new(social)),
        LIMIT,
    )
}

fn movie_details() -> MediaDetails {
    MediaDetails {
        title: Some("The Matrix".to_string()),
        overview: Some("A hacker learns the truth.".to_string()),
        poster_path: Some("/matrix.jpg".to_string()),
        release_date: Some("1999-03-30".to_string()),
        vote_average: Some(8.2),
        vote_count: Some(25000),
        ..Default::default()
    }
}

fn series_details() -> MediaDetails {
    MediaDetails {
        name: Some("Breaking Bad".to_string()),
        first_air_date: Some("2008-01-20".to_string()),
        overview: Some(String::new()),
        number_of_seasons: Some(1),
        ..Default::default()
    }
}

fn episode(episode: u32, title: Option<&str>, tmdb: Option<f64>, trakt: Option<f64>) -> EpisodeRatingEntry {
    EpisodeRatingEntry {
        season_number: 1,
        episode_number: episode,
        title: title.map(str::to_string),
        tmdb_score: tmdb,
        trakt_score: trakt,
    }
}

#[tokio::test]
async fn test_movie_with_all_providers() {
    let ratings = Arc::new(FakeRatings {
        rating: Some(OverallRating::new(RatingSource::Imdb, Some(8.7), Some(2_000_000))),
        ..Default::default()
    });
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            imdb_id: Some("tt0133093".to_string()),
            score: Some(8.2),
            ..Default::default()
        },
        ratings.clone(),
        FakeSocial {
            trakt_id: Some("the-matrix-1999".to_string()),
            rating: Some(OverallRating::new(RatingSource::Trakt, Some(8.5), Some(60000))),
            episodes: vec![episode(1, Some("never used"), None, Some(9.0))],
            ..Default::default()
        },
    );

    let result = aggregator.aggregate(603, MediaType::Movie).await.unwrap();

    assert_eq!(result.title, "The Matrix");
    assert_eq!(result.year, Some(1999));
    assert_eq!(result.poster_url.as_deref(), Some("https://img.test/w500/matrix.jpg"));
    assert_eq!(result.ids.imdb_id.as_deref(), Some("tt0133093"));
    assert_eq!(result.ids.trakt_id.as_deref(), Some("the-matrix-1999"));
    assert_eq!(result.overall.tmdb.as_ref().and_then(|r| r.score), Some(8.2));
    assert_eq!(result.overall.imdb.as_ref().and_then(|r| r.votes), Some(2_000_000));
    assert_eq!(result.overall.trakt.as_ref().and_then(|r| r.score), Some(8.5));
    assert!(result.episodes_by_season.is_none());
    assert_eq!(ratings.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_series_merges_episodes() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(series_details()),
            imdb_id: Some("tt0903747".to_string()),
            episodes: vec![episode(1, Some("Pilot"), Some(8.5), None)],
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial {
            trakt_id: Some("breaking-bad".to_string()),
            episodes: vec![episode(1, None, None, Some(8.2)), episode(2, Some("X"), None, Some(7.9))],
            ..Default::default()
        },
    );

    let result = aggregator.aggregate(1396, MediaType::Series).await.unwrap();

    assert_eq!(result.title, "Breaking Bad");
    assert_eq!(result.year, Some(2008));
    assert_eq!(result.overview, None);
    assert_eq!(result.poster_url, None);
    assert_eq!(result.overall.imdb, None);
    assert_eq!(result.overall.trakt, None);

    let seasons = result.episodes_by_season.as_ref().unwrap();
    assert_eq!(seasons[&1], vec![
        episode(1, Some("Pilot"), Some(8.5), Some(8.2)),
        episode(2, Some("X"), None, Some(7.9)),
    ]);
    assert_eq!(result.episode_count(), 2);
}

#[tokio::test]
async fn test_details_not_found() {
    let aggregator = aggregator(
        FakeCatalog::default(),
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let err = aggregator.aggregate(999_999, MediaType::Movie).await.unwrap_err();
    assert!(matches!(err, AggregationError::NotFound { tmdb_id: 999_999, .. }));
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_details_upstream_failure() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            details_status: Some(503),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let err = aggregator.aggregate(603, MediaType::Movie).await.unwrap_err();
    assert!(matches!(err, AggregationError::Provider(_)));
    assert_eq!(err.code(), "AGGREGATION_ERROR");
    assert_eq!(err.http_status(), 502);
}

#[tokio::test]
async fn test_external_ids_not_found() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            ids_status: Some(404),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let err = aggregator.aggregate(603, MediaType::Movie).await.unwrap_err();
    assert!(matches!(err, AggregationError::NotFound { tmdb_id: 603, media_type: MediaType::Movie }));
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_external_ids_upstream_failure() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            ids_status: Some(503),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let err = aggregator.aggregate(603, MediaType::Movie).await.unwrap_err();
    assert!(matches!(err, AggregationError::Provider(SourceError::Status { status: 503, .. })));
    assert_eq!(err.code(), "AGGREGATION_ERROR");
    assert_eq!(err.http_status(), 502);
}

#[tokio::test]
async fn test_slow_details_is_a_provider_failure() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            details_delay: Some(Duration::from_secs(10)),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let err = aggregator.aggregate(603, MediaType::Movie).await.unwrap_err();
    assert!(matches!(err, AggregationError::Provider(SourceError::Timeout { provider: "tmdb" })));
    assert_eq!(err.code(), "AGGREGATION_ERROR");
}

#[tokio::test]
async fn test_social_specials_survive_merge() {
    let special = EpisodeRatingEntry {
        season_number: 0,
        episode_number: 1,
        title: Some("Good Cop Bad Cop".to_string()),
        tmdb_score: None,
        trakt_score: Some(7.1),
    };
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(series_details()),
            episodes: vec![episode(1, Some("Pilot"), Some(8.5), None)],
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial {
            trakt_id: Some("breaking-bad".to_string()),
            episodes: vec![special.clone(), episode(1, None, None, Some(8.2))],
            ..Default::default()
        },
    );

    let result = aggregator.aggregate(1396, MediaType::Series).await.unwrap();
    let seasons = result.episodes_by_season.as_ref().unwrap();
    assert_eq!(seasons.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(seasons[&0], vec![special]);
    assert!(result.validate().is_ok());
}

#[tokio::test]
async fn test_malformed_imdb_id_skips_ratings_provider() {
    let ratings = Arc::new(FakeRatings {
        rating: Some(OverallRating::new(RatingSource::Imdb, Some(7.0), None)),
        ..Default::default()
    });
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(movie_details()),
            imdb_id: Some("0133093".to_string()),
            ..Default::default()
        },
        ratings.clone(),
        FakeSocial::default(),
    );

    let result = aggregator.aggregate(603, MediaType::Movie).await.unwrap();
    assert_eq!(result.ids.imdb_id, None);
    assert_eq!(result.overall.imdb, None);
    assert_eq!(ratings.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_series_without_trakt_id_has_no_episodes() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(series_details()),
            episodes: vec![episode(1, Some("Pilot"), Some(8.5), None)],
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let result = aggregator.aggregate(1396, MediaType::Series).await.unwrap();
    assert!(result.episodes_by_season.is_none());
    assert!(result.ids.trakt_id.is_none());
}

#[tokio::test]
async fn test_series_with_no_episodes_anywhere() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(series_details()),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial {
            trakt_id: Some("breaking-bad".to_string()),
            ..Default::default()
        },
    );

    let result = aggregator.aggregate(1396, MediaType::Series).await.unwrap();
    assert!(result.episodes_by_season.is_none());
    assert_eq!(result.ids.trakt_id.as_deref(), Some("breaking-bad"));
}

#[tokio::test]
async fn test_slow_branch_is_dropped() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(series_details()),
            episodes: vec![episode(1, Some("Pilot"), Some(8.5), None)],
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial {
            trakt_id: Some("breaking-bad".to_string()),
            episodes: vec![episode(1, None, None, Some(8.2))],
            episode_delay: Some(Duration::from_secs(10)),
            ..Default::default()
        },
    );

    let result = aggregator.aggregate(1396, MediaType::Series).await.unwrap();
    let seasons = result.episodes_by_season.unwrap();
    assert_eq!(seasons[&1], vec![episode(1, Some("Pilot"), Some(8.5), None)]);
}

#[tokio::test]
async fn test_untitled_media_is_unknown() {
    let aggregator = aggregator(
        FakeCatalog {
            details: Some(MediaDetails::default()),
            ..Default::default()
        },
        Arc::new(FakeRatings::default()),
        FakeSocial::default(),
    );

    let result = aggregator.aggregate(1, MediaType::Movie).await.unwrap();
    assert_eq!(result.title, "Unknown");
    assert_eq!(result.year, None);
    assert_eq!(result.overall.tmdb.as_ref().and_then(|r| r.score), None);
}
