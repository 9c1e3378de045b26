use bingescore_models::MediaType;
use bingescore_sources::SourceError;
use thiserror::Error;

/// Why an aggregation produced no response
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("{media_type} {tmdb_id} was not found")]
    NotFound { tmdb_id: u64, media_type: MediaType },
    #[error("failed to aggregate ratings: {0}")]
    Provider(#[source] SourceError),
}

impl AggregationError {
    /// Classify a failure of the primary (catalog) fetch
    pub fn from_primary(err: SourceError, tmdb_id: u64, media_type: MediaType) -> Self {
        if err.is_not_found() {
            AggregationError::NotFound { tmdb_id, media_type }
        } else {
            AggregationError::Provider(err)
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AggregationError::NotFound { .. } => "NOT_FOUND",
            AggregationError::Provider(_) => "AGGREGATION_ERROR",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            AggregationError::NotFound { .. } => 404,
            AggregationError::Provider(_) => 502,
        }
    }
}
