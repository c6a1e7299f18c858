use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use health_log_domain::services::MeasurementServiceError;

use crate::entities::ErrorResponse;

/// Errors from the JSON endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Measurement not found: {0}")]
    NotFound(i64),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<MeasurementServiceError> for ApiError {
    fn from(err: MeasurementServiceError) -> Self {
        match err {
            MeasurementServiceError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorResponse::measurement_not_found()),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Errors from the HTML endpoints; always rendered as a plain 500 page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Service error: {0}")]
    Service(#[from] MeasurementServiceError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("Page request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!DOCTYPE html><html><body><h1>Internal Server Error</h1><p>The measurement log is unavailable right now.</p></body></html>"),
        )
            .into_response()
    }
}
