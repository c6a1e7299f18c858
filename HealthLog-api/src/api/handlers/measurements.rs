use axum::{
    extract::{Form, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use health_log_domain::entities::MeasurementForm;
use health_log_domain::services::MeasurementServiceError;

use crate::api::error::{ApiError, PageError};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, FlagResponse, MeasurementView};
use crate::views::MAIN_SCRIPT;

/// Query code set when a submitted reading was rejected
pub const INVALID_READING: &str = "invalid_reading";

const INVALID_READING_NOTICE: &str =
    "Systolic and diastolic must be whole numbers. The reading was not saved.";

/// Query parameters of the measurement page
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Code of the problem with the last submission, if any
    pub error: Option<String>,
}

fn notice_for(code: &str) -> Option<&'static str> {
    match code {
        INVALID_READING => Some(INVALID_READING_NOTICE),
        _ => None,
    }
}

/// Measurement page: entry form plus every stored reading, newest first
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, PageError> {
    let measurements: Vec<MeasurementView> = state
        .measurements
        .list_measurements()
        .await?
        .into_iter()
        .map(MeasurementView::from)
        .collect();

    let notice = query.error.as_deref().and_then(notice_for);
    let html = state.templates.render_index(&measurements, notice)?;
    Ok(Html(html))
}

/// Store a reading from the entry form and go back to the page
///
/// Fields are read as raw pairs so a repeated field takes its first value.
#[instrument(skip(state, fields))]
pub async fn add_measurement(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, PageError> {
    let form: MeasurementForm = fields.into_iter().collect();
    match state.measurements.record_measurement(form).await {
        Ok(measurement) => {
            info!("Recorded measurement {}", measurement.id);
            Ok(Redirect::to("/"))
        }
        Err(MeasurementServiceError::Validation(e)) => {
            warn!("Rejected measurement form: {}", e);
            Ok(Redirect::to(&format!("/?error={}", INVALID_READING)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a reading and go back to the page; unknown ids are ignored
#[instrument(skip(state))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    if state.measurements.delete_measurement(id).await? {
        info!("Deleted measurement {}", id);
    }
    Ok(Redirect::to("/"))
}

/// Toggle the flag of a measurement
#[utoipa::path(
    post,
    path = "/api/measurements/{id}/flag",
    params(
        ("id" = i64, Path, description = "Measurement id")
    ),
    responses(
        (status = 200, description = "Flag toggled", body = FlagResponse),
        (status = 404, description = "Measurement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(state))]
pub async fn toggle_flag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FlagResponse>, ApiError> {
    let flagged = state.measurements.toggle_flag(id).await.map_err(|e| {
        if matches!(e, MeasurementServiceError::NotFound(_)) {
            info!("Flag toggle for unknown measurement {}", id);
        }
        ApiError::from(e)
    })?;

    info!("Measurement {} flagged={}", id, flagged);
    Ok(Json(FlagResponse::new(flagged)))
}

/// Script behind the flag buttons
pub async fn main_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        MAIN_SCRIPT,
    )
}
