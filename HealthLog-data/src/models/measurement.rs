use serde::{Deserialize, Serialize};

/// Storage model for a single row of the `measurements` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Row id assigned by SQLite
    pub id: i64,

    /// Optional name of the patient the reading belongs to
    pub patient_name: Option<String>,

    /// Systolic blood pressure (the higher number)
    pub systolic: i64,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: i64,

    /// Optional heart rate in beats per minute
    pub heart_rate: Option<i64>,

    /// Optional free-form notes
    pub notes: Option<String>,

    /// Whether the reading needs attention
    pub flagged: bool,

    /// UTC insertion time, `YYYY-MM-DDTHH:MM:SS.ffffff`
    pub recorded_at: String,
}

/// Input for inserting a new row; id and flag are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeasurement {
    pub patient_name: Option<String>,
    pub systolic: i64,
    pub diastolic: i64,
    pub heart_rate: Option<i64>,
    pub notes: Option<String>,
    pub recorded_at: String,
}
