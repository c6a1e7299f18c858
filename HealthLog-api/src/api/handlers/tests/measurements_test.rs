use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use health_log_domain::services::MeasurementServiceTrait;
use health_log_domain::testing::{MockHealthService, MockMeasurementService};

use super::{body_string, state_with, stored};
use crate::api::handlers::measurements::{
    add_measurement, delete_measurement, index, main_script, toggle_flag, IndexQuery,
};
use crate::entities::{ErrorResponse, FlagResponse};

fn form(systolic: &str, diastolic: &str) -> Vec<(String, String)> {
    vec![
        ("systolic".to_string(), systolic.to_string()),
        ("diastolic".to_string(), diastolic.to_string()),
    ]
}

#[tokio::test]
async fn test_index_lists_newest_first() {
    let state = state_with(
        MockMeasurementService::with_measurements(vec![
            stored(1, "2024-01-01T09:00:00.000000"),
            stored(2, "2024-01-02T09:00:00.000000"),
        ]),
        MockHealthService::new(),
    );

    let response = index(State(state), Query(IndexQuery::default())).await.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response.into_body()).await;
    let newer = html.find(r#"data-id="2""#).unwrap();
    let older = html.find(r#"data-id="1""#).unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn test_index_shows_notice_for_rejected_reading() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());
    let query = IndexQuery {
        error: Some("invalid_reading".to_string()),
    };

    let response = index(State(state), Query(query)).await.unwrap().into_response();
    let html = body_string(response.into_body()).await;
    assert!(html.contains("The reading was not saved."));
}

#[tokio::test]
async fn test_index_ignores_unknown_error_code() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());
    let query = IndexQuery {
        error: Some("<b>boom</b>".to_string()),
    };

    let response = index(State(state), Query(query)).await.unwrap().into_response();
    let html = body_string(response.into_body()).await;
    assert!(!html.contains("boom"));
    assert!(!html.contains("role=\"alert\""));
}

#[tokio::test]
async fn test_index_storage_failure_is_500() {
    let state = state_with(
        MockMeasurementService::new().with_storage_failure(),
        MockHealthService::new(),
    );

    let response = index(State(state), Query(IndexQuery::default())).await.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_add_valid_reading_redirects_home() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());

    let response = add_measurement(State(state.clone()), Form(form("118", "76")))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let all = state.measurements.list_measurements().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].systolic, 118);
    assert!(!all[0].flagged);
}

#[tokio::test]
async fn test_add_invalid_reading_is_not_stored() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());

    let response = add_measurement(State(state.clone()), Form(form("abc", "80")))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/?error=invalid_reading");
    assert!(state.measurements.list_measurements().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_repeated_field_uses_first_value() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());
    let mut fields = form("120", "80");
    fields.push(("systolic".to_string(), "130".to_string()));

    let response = add_measurement(State(state.clone()), Form(fields))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert_eq!(state.measurements.list_measurements().await.unwrap()[0].systolic, 120);
}

#[tokio::test]
async fn test_add_storage_failure_is_500() {
    let state = state_with(
        MockMeasurementService::new().with_storage_failure(),
        MockHealthService::new(),
    );

    let response = add_measurement(State(state), Form(form("120", "80"))).await.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_delete_redirects_even_for_unknown_id() {
    let state = state_with(
        MockMeasurementService::with_measurements(vec![stored(4, "2024-01-01T09:00:00.000000")]),
        MockHealthService::new(),
    );

    let response = delete_measurement(State(state.clone()), Path(99)).await.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.measurements.list_measurements().await.unwrap().len(), 1);

    let response = delete_measurement(State(state.clone()), Path(4)).await.unwrap().into_response();
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(state.measurements.list_measurements().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_flag_flips_value() {
    let state = state_with(
        MockMeasurementService::with_measurements(vec![stored(5, "2024-01-01T09:00:00.000000")]),
        MockHealthService::new(),
    );

    let first = toggle_flag(State(state.clone()), Path(5)).await.unwrap();
    assert_eq!(first.0, FlagResponse { success: true, flagged: true });

    let second = toggle_flag(State(state), Path(5)).await.unwrap();
    assert_eq!(second.0, FlagResponse { success: true, flagged: false });
}

#[tokio::test]
async fn test_toggle_flag_unknown_id_is_404() {
    let state = state_with(MockMeasurementService::new(), MockHealthService::new());

    let response = toggle_flag(State(state), Path(42)).await.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(body, ErrorResponse::measurement_not_found());
}

#[tokio::test]
async fn test_toggle_flag_storage_failure_is_500() {
    let state = state_with(
        MockMeasurementService::new().with_storage_failure(),
        MockHealthService::new(),
    );

    let response = toggle_flag(State(state), Path(1)).await.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_main_script_is_javascript() {
    let response = main_script().await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));
}
