use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bingescore_core::AggregationError;
use bingescore_sources::SourceError;
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with, mapped onto the error envelope
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Route not found")]
    RouteNotFound,
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Search(#[from] SourceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Aggregation(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Search(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::RouteNotFound => "NOT_FOUND",
            ApiError::Aggregation(e) => e.code(),
            ApiError::Search(_) => "TMDB_ERROR",
        }
    }

    /// Message shown to clients; upstream details stay in the logs
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::RouteNotFound => self.to_string(),
            ApiError::Aggregation(AggregationError::NotFound { .. }) => "Media not found".to_string(),
            ApiError::Aggregation(_) => "Failed to aggregate ratings from providers".to_string(),
            ApiError::Search(_) => "Failed to fetch search results from TMDB".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Upstream failure in API handler");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = json!({
            "data": null,
            "error": {
                "message": self.public_message(),
                "code": self.code(),
            },
        });

        (status, Json(body)).into_response()
    }
}
