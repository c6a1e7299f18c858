use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of `recorded_at`: UTC, microsecond precision, no offset suffix
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Domain model for a blood pressure / heart rate measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier assigned by the store
    pub id: i64,

    /// Optional name of the patient
    pub patient_name: Option<String>,

    /// Systolic blood pressure (the higher number)
    pub systolic: i64,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: i64,

    /// Optional heart rate in beats per minute
    pub heart_rate: Option<i64>,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// Whether the reading has been marked for attention
    pub flagged: bool,

    /// When the reading was stored, see [`RECORDED_AT_FORMAT`]
    pub recorded_at: String,
}

/// A measurement whose fields have been parsed, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeasurementRequest {
    pub patient_name: Option<String>,
    pub systolic: i64,
    pub diastolic: i64,
    pub heart_rate: Option<i64>,
    pub notes: Option<String>,
}

/// Raw fields of the entry form, exactly as submitted
///
/// Every field may be missing; missing fields behave like empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementForm {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub systolic: Option<String>,
    #[serde(default)]
    pub diastolic: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Reasons a submitted form cannot become a measurement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementFormError {
    #[error("systolic must be an integer, got {0:?}")]
    InvalidSystolic(String),

    #[error("diastolic must be an integer, got {0:?}")]
    InvalidDiastolic(String),
}

impl MeasurementForm {
    /// Parse the form into a storable request
    ///
    /// Systolic and diastolic are required integers. A heart rate that is
    /// blank or not an integer becomes `None` instead of failing. Blank
    /// patient names and notes become `None`.
    pub fn parse(&self) -> Result<NewMeasurementRequest, MeasurementFormError> {
        let systolic_raw = trimmed(&self.systolic);
        let diastolic_raw = trimmed(&self.diastolic);

        let systolic = systolic_raw
            .parse::<i64>()
            .map_err(|_| MeasurementFormError::InvalidSystolic(systolic_raw.to_string()))?;
        let diastolic = diastolic_raw
            .parse::<i64>()
            .map_err(|_| MeasurementFormError::InvalidDiastolic(diastolic_raw.to_string()))?;

        let heart_rate = trimmed(&self.heart_rate).parse::<i64>().ok();

        Ok(NewMeasurementRequest {
            patient_name: non_blank(&self.patient_name),
            systolic,
            diastolic,
            heart_rate,
            notes: non_blank(&self.notes),
        })
    }
}

impl FromIterator<(String, String)> for MeasurementForm {
    /// Build a form from raw `name=value` pairs
    ///
    /// When a field is submitted more than once the first value wins.
    /// Unknown field names are ignored.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = MeasurementForm::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "patient_name" => &mut form.patient_name,
                "systolic" => &mut form.systolic,
                "diastolic" => &mut form.diastolic,
                "heart_rate" => &mut form.heart_rate,
                "notes" => &mut form.notes,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn non_blank(field: &Option<String>) -> Option<String> {
    let value = trimmed(field);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Format a point in time the way `recorded_at` is stored
pub fn format_recorded_at(at: DateTime<Utc>) -> String {
    at.format(RECORDED_AT_FORMAT).to_string()
}

/// The current UTC time as a `recorded_at` value
pub fn current_timestamp() -> String {
    format_recorded_at(Utc::now())
}
