use anyhow::Result;
use bingescore_config::Config;
use bingescore_models::{
    is_valid_imdb_id, AggregatedRatings, MediaType, OverallRatings, SearchResult, UnifiedMediaId,
};
use bingescore_sources::{ProviderSet, SourceError};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::episode_merge::merge_episode_ratings;
use crate::error::AggregationError;
use crate::outcome::{bounded, Outcome};

/// Fans out to every provider and assembles one [`AggregatedRatings`]
///
/// Only the catalog's details and external-ID calls can fail an aggregation.
/// Every other branch is optional: a failure or timeout leaves its slot null.
pub struct RatingsAggregator {
    providers: ProviderSet,
    branch_timeout: Duration,
}

impl RatingsAggregator {
    pub fn new(providers: ProviderSet, branch_timeout: Duration) -> Self {
        Self {
            providers,
            branch_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let providers = ProviderSet::from_config(config)?;
        Ok(Self::new(providers, config.http.aggregate_timeout()))
    }

    /// Bound a required catalog call; running out of time is a provider failure
    async fn required<T, F>(&self, future: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        tokio::time::timeout(self.branch_timeout, future)
            .await
            .unwrap_or_else(|_| Err(SourceError::timeout(self.providers.catalog.provider_name())))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let results = self.required(self.providers.catalog.search(query)).await?;
        for result in &results {
            if let Err(e) = result.validate() {
                warn!("Search result {} violates model invariants: {}", result.tmdb_id, e);
            }
        }
        Ok(results)
    }

    #[instrument(skip(self))]
    pub async fn aggregate(
        &self,
        tmdb_id: u64,
        media_type: MediaType,
    ) -> Result<AggregatedRatings, AggregationError> {
        let catalog = &self.providers.catalog;
        let ratings = &self.providers.ratings;
        let social = &self.providers.social;
        let limit = self.branch_timeout;

        let (details, external_ids) = futures::try_join!(
            self.required(catalog.get_details(tmdb_id, media_type)),
            self.required(catalog.get_external_ids(tmdb_id, media_type)),
        )
        .map_err(|e| AggregationError::from_primary(e, tmdb_id, media_type))?;

        let imdb_id = external_ids.imdb_id.filter(|id| {
            let valid = is_valid_imdb_id(id);
            if !valid {
                debug!("Ignoring malformed IMDb ID {:?} for {} {}", id, media_type, tmdb_id);
            }
            valid
        });
        let mut ids = UnifiedMediaId::new(media_type, tmdb_id).with_imdb_id(imdb_id);

        let tmdb_branch = bounded("TMDB rating", limit, catalog.get_overall_rating(tmdb_id, media_type));

        let imdb_branch = async {
            match ids.imdb_id.as_deref() {
                Some(imdb_id) => bounded("OMDb rating", limit, ratings.get_overall_rating_by_imdb_id(imdb_id))
                    .await
                    .flatten(),
                None => Outcome::Absent,
            }
        };

        let trakt_branch = async {
            let resolved = bounded("Trakt lookup", limit, social.resolve_id(tmdb_id, media_type))
                .await
                .flatten();
            let Outcome::Present(trakt_id) = resolved else {
                return (None, Outcome::Absent);
            };
            let rating = bounded("Trakt rating", limit, social.get_overall_rating(&trakt_id, media_type))
                .await
                .flatten();
            (Some(trakt_id), rating)
        };

        let (tmdb_rating, imdb_rating, (trakt_id, trakt_rating)) =
            futures::join!(tmdb_branch, imdb_branch, trakt_branch);

        let overall = OverallRatings {
            tmdb: tmdb_rating.into_option(),
            imdb: imdb_rating.into_option(),
            trakt: trakt_rating.into_option(),
        };

        let episodes_by_season = match (&trakt_id, media_type.is_series()) {
            (Some(trakt_id), true) => {
                let (tmdb_episodes, trakt_episodes) = futures::join!(
                    bounded("TMDB episodes", limit, catalog.get_episode_ratings(tmdb_id)),
                    bounded("Trakt episodes", limit, social.get_episode_ratings(trakt_id)),
                );
                let tmdb_episodes = tmdb_episodes.unwrap_or(Vec::new());
                let trakt_episodes = trakt_episodes.unwrap_or(Vec::new());
                debug!(
                    "Merging {} TMDB and {} Trakt episodes",
                    tmdb_episodes.len(),
                    trakt_episodes.len()
                );

                if tmdb_episodes.is_empty() && trakt_episodes.is_empty() {
                    None
                } else {
                    Some(merge_episode_ratings(tmdb_episodes, trakt_episodes))
                }
            }
            _ => None,
        };

        if let Some(trakt_id) = trakt_id {
            ids.set_trakt_id(trakt_id);
        }

        let aggregated = AggregatedRatings {
            ids,
            title: details.display_title(),
            year: details.year(),
            media_type,
            overview: details.overview.filter(|o| !o.trim().is_empty()),
            poster_url: details.poster_path.as_deref().map(|path| catalog.image_url(path)),
            overall,
            episodes_by_season,
        };

        if let Err(e) = aggregated.validate() {
            warn!("Aggregated {} {} violates model invariants: {}", media_type, tmdb_id, e);
        }

        info!(
            "Aggregated {} {} ({}): {} episodes",
            media_type,
            tmdb_id,
            aggregated.title,
            aggregated.episode_count()
        );

        Ok(aggregated)
    }
}

#[cfg(test)]
mod tests;
