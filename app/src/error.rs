//! HTTP error mapping for the API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jobscout_db::DatabaseError;
use jobscout_scheduler::QueueError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Scrape already in progress")]
    Busy,

    #[error("Scrape worker is not running")]
    Unavailable,

    #[error("{0}")]
    Store(#[from] DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Busy => StatusCode::CONFLICT,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(DatabaseError::Duplicate(_)) => StatusCode::CONFLICT,
            ApiError::Store(DatabaseError::Invalid(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Busy => ApiError::Busy,
            QueueError::Closed => ApiError::Unavailable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, "Request failed: {}", self);
        } else {
            tracing::warn!(status = %status, "Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_errors_map_to_status() {
        assert_eq!(ApiError::from(QueueError::Busy).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(QueueError::Closed).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let status = |err: DatabaseError| ApiError::from(err).status();
        assert_eq!(status(DatabaseError::NotFound("role 7".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(DatabaseError::Duplicate("role 'Engineer'".into())), StatusCode::CONFLICT);
        assert_eq!(status(DatabaseError::Invalid("empty keyword".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(DatabaseError::Decode("date_found".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = ApiError::Busy.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
