// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;

use async_trait::async_trait;

pub use health_log_data::repository::InMemoryMeasurementRepository;
use health_log_data::models::measurement as data;

use crate::entities::measurement::{Measurement, MeasurementForm};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::measurement::{MeasurementService, MeasurementServiceError, MeasurementServiceTrait};

/// Measurement service over in-memory storage that can be told to fail
pub struct MockMeasurementService {
    inner: MeasurementService<InMemoryMeasurementRepository>,
    should_fail_storage: bool,
}

impl Default for MockMeasurementService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMeasurementService {
    /// Create a new mock service with no measurements
    pub fn new() -> Self {
        Self::with_measurements(Vec::new())
    }

    /// Create a mock service pre-loaded with measurements
    pub fn with_measurements(measurements: Vec<Measurement>) -> Self {
        let stored = measurements.into_iter()
            .map(|m| data::Measurement {
                id: m.id,
                patient_name: m.patient_name,
                systolic: m.systolic,
                diastolic: m.diastolic,
                heart_rate: m.heart_rate,
                notes: m.notes,
                flagged: m.flagged,
                recorded_at: m.recorded_at,
            })
            .collect();

        Self {
            inner: MeasurementService::new(InMemoryMeasurementRepository::with_measurements(stored)),
            should_fail_storage: false,
        }
    }

    /// Configure every operation to fail as if the database were unavailable
    pub fn with_storage_failure(mut self) -> Self {
        self.should_fail_storage = true;
        self
    }

    fn check_storage(&self) -> Result<(), MeasurementServiceError> {
        if self.should_fail_storage {
            Err(MeasurementServiceError::Repository(
                "Storage unavailable - mock is configured to fail".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MeasurementServiceTrait for MockMeasurementService {
    async fn list_measurements(&self) -> Result<Vec<Measurement>, MeasurementServiceError> {
        self.check_storage()?;
        self.inner.list_measurements().await
    }

    async fn record_measurement(&self, form: MeasurementForm) -> Result<Measurement, MeasurementServiceError> {
        self.check_storage()?;
        self.inner.record_measurement(form).await
    }

    async fn delete_measurement(&self, id: i64) -> Result<bool, MeasurementServiceError> {
        self.check_storage()?;
        self.inner.delete_measurement(id).await
    }

    async fn toggle_flag(&self, id: i64) -> Result<bool, MeasurementServiceError> {
        self.check_storage()?;
        self.inner.toggle_flag(id).await
    }
}

/// Health service returning a fixed report
#[derive(Debug)]
pub struct MockHealthService {
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// A healthy database and api
    pub fn new() -> Self {
        let mut components = HashMap::new();
        components.insert("database".to_string(), HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        });
        components.insert("api".to_string(), HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        });
        Self { components }
    }

    /// Override the status of one component
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components.insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        SystemHealth::from_components(self.components.clone())
    }

    async fn check_database_status(&self) -> Result<String, String> {
        match self.components.get("database") {
            Some(HealthComponent { status: ComponentStatus::Unhealthy, details }) => {
                Err(details.clone().unwrap_or_else(|| "Database connection failed".to_string()))
            },
            _ => Ok("mock database".to_string()),
        }
    }
}
