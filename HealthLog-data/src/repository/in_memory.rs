use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::measurement::{Measurement, NewMeasurement};
use super::errors::RepositoryError;
use super::measurement::MeasurementRepositoryTrait;

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    measurements: Vec<Measurement>,
}

/// In-memory implementation of the measurement repository for tests
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurementRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryMeasurementRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with measurements; their ids are kept as given
    pub fn with_measurements(measurements: Vec<Measurement>) -> Self {
        let next_id = measurements.iter().map(|m| m.id).max().unwrap_or(0);
        Self {
            state: Arc::new(Mutex::new(InMemoryState { next_id, measurements })),
        }
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for InMemoryMeasurementRepository {
    async fn insert(&self, measurement: NewMeasurement) -> Result<Measurement, RepositoryError> {
        let mut state = self.state.lock()?;
        state.next_id += 1;

        let stored = Measurement {
            id: state.next_id,
            patient_name: measurement.patient_name,
            systolic: measurement.systolic,
            diastolic: measurement.diastolic,
            heart_rate: measurement.heart_rate,
            notes: measurement.notes,
            flagged: false,
            recorded_at: measurement.recorded_at,
        };
        state.measurements.push(stored.clone());

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Measurement>, RepositoryError> {
        let state = self.state.lock()?;
        let mut measurements = state.measurements.clone();
        measurements.sort_by(|a, b| {
            b.recorded_at.cmp(&a.recorded_at).then_with(|| b.id.cmp(&a.id))
        });
        Ok(measurements)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock()?;
        let before = state.measurements.len();
        state.measurements.retain(|m| m.id != id);
        Ok(state.measurements.len() != before)
    }

    async fn toggle_flag(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock()?;
        let measurement = state.measurements
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        measurement.flagged = !measurement.flagged;
        Ok(measurement.flagged)
    }
}
