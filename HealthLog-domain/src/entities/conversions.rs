use crate::entities::measurement::{Measurement, NewMeasurementRequest};
use health_log_data::models::measurement as data;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for a measurement
pub fn convert_to_domain_measurement(data_measurement: data::Measurement) -> Measurement {
    Measurement {
        id: data_measurement.id,
        patient_name: data_measurement.patient_name,
        systolic: data_measurement.systolic,
        diastolic: data_measurement.diastolic,
        heart_rate: data_measurement.heart_rate,
        notes: data_measurement.notes,
        flagged: data_measurement.flagged,
        recorded_at: data_measurement.recorded_at,
    }
}

/// Convert a parsed request into the data model, stamping it with `recorded_at`
pub fn convert_to_data_new_measurement(request: NewMeasurementRequest, recorded_at: String) -> data::NewMeasurement {
    data::NewMeasurement {
        patient_name: request.patient_name,
        systolic: request.systolic,
        diastolic: request.diastolic,
        heart_rate: request.heart_rate,
        notes: request.notes,
        recorded_at,
    }
}
