use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_log_domain::entities::measurement::{Measurement, RECORDED_AT_FORMAT};

/// Display format for the "Recorded" column
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder shown for optional fields that were left empty
const EMPTY_CELL: &str = "-";

/// A measurement prepared for the HTML page
///
/// Optional fields are already rendered to text so the template never has
/// to decide how a missing value looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementView {
    pub id: i64,
    pub patient_name: String,
    pub systolic: i64,
    pub diastolic: i64,
    pub heart_rate: String,
    pub notes: String,
    pub flagged: bool,
    pub recorded_at: String,
}

impl From<Measurement> for MeasurementView {
    fn from(measurement: Measurement) -> Self {
        Self {
            id: measurement.id,
            patient_name: measurement.patient_name.unwrap_or_else(|| EMPTY_CELL.to_string()),
            systolic: measurement.systolic,
            diastolic: measurement.diastolic,
            heart_rate: measurement
                .heart_rate
                .map(|hr| hr.to_string())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            notes: measurement.notes.unwrap_or_default(),
            flagged: measurement.flagged,
            recorded_at: display_recorded_at(&measurement.recorded_at),
        }
    }
}

/// Shorten a stored timestamp for display, keeping it as-is if it does not parse
fn display_recorded_at(recorded_at: &str) -> String {
    match NaiveDateTime::parse_from_str(recorded_at, RECORDED_AT_FORMAT) {
        Ok(at) => format!("{} UTC", at.format(DISPLAY_FORMAT)),
        Err(_) => recorded_at.to_string(),
    }
}

/// Result of toggling a measurement's flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlagResponse {
    /// Always `true`
    pub success: bool,

    /// The flag value after the toggle
    pub flagged: bool,
}

impl FlagResponse {
    pub fn new(flagged: bool) -> Self {
        Self { success: true, flagged }
    }
}
