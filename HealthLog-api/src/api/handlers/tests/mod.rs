mod measurements_test;

use std::sync::Arc;

use axum::body::{to_bytes, Body};

use health_log_domain::entities::Measurement;
use health_log_domain::testing::{MockHealthService, MockMeasurementService};

use crate::api::state::AppState;

/// State over mock services
pub(super) fn state_with(measurements: MockMeasurementService, health: MockHealthService) -> AppState {
    AppState::new(Arc::new(measurements), Arc::new(health)).unwrap()
}

pub(super) fn stored(id: i64, recorded_at: &str) -> Measurement {
    Measurement {
        id,
        patient_name: Some("Ada".to_string()),
        systolic: 120,
        diastolic: 80,
        heart_rate: Some(70),
        notes: None,
        flagged: false,
        recorded_at: recorded_at.to_string(),
    }
}

pub(super) async fn body_string(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
