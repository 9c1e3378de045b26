use axum::extract::{Query, State};
use axum::Json;
use bingescore_models::{AggregatedRatings, MediaType, SearchResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateParams {
    pub tmdb_id: Option<String>,
    pub media_type: Option<String>,
}

impl AggregateParams {
    fn parse(&self) -> Result<(u64, MediaType), ApiError> {
        let tmdb_id = self
            .tmdb_id
            .as_deref()
            .ok_or_else(|| ApiError::Validation("tmdbId is required".into()))?
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ApiError::Validation("tmdbId must be a positive integer".into()))?;

        let media_type = match self.media_type.as_deref().map(str::trim) {
            Some("movie") => MediaType::Movie,
            Some("tv") => MediaType::Series,
            Some(_) => return Err(ApiError::Validation("mediaType must be one of: movie, tv".into())),
            None => return Err(ApiError::Validation("mediaType is required".into())),
        };

        Ok((tmdb_id, media_type))
    }
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/search: multi search against the catalog
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::Validation(format!(
            "q must be at least {} characters",
            MIN_QUERY_CHARS
        )));
    }

    let results = state.aggregator.search(query).await?;
    Ok(Json(results))
}

/// GET /api/media/aggregate: ratings from every provider for one title
pub async fn aggregate(
    State(state): State<AppState>,
    Query(params): Query<AggregateParams>,
) -> Result<Json<AggregatedRatings>, ApiError> {
    let (tmdb_id, media_type) = params.parse()?;
    let aggregated = state.aggregator.aggregate(tmdb_id, media_type).await?;
    Ok(Json(aggregated))
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
