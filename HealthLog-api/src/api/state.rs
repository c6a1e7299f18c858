use std::sync::Arc;

use health_log_data::database::DatabasePool;
use health_log_domain::health::{DatabaseHealthService, HealthServiceTrait};
use health_log_domain::services::{create_measurement_service, MeasurementServiceTrait};

use crate::views::Templates;

/// Measurement service handle shared by the handlers
pub type MeasurementServiceHandle = Arc<dyn MeasurementServiceTrait>;

/// Health service handle shared by the handlers
pub type HealthServiceHandle = Arc<dyn HealthServiceTrait>;

/// Everything a request handler needs, cloned into each request
#[derive(Clone)]
pub struct AppState {
    pub measurements: MeasurementServiceHandle,
    pub health: HealthServiceHandle,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Build state from already constructed services
    pub fn new(
        measurements: MeasurementServiceHandle,
        health: HealthServiceHandle,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            measurements,
            health,
            templates: Arc::new(Templates::new()?),
        })
    }

    /// Build state backed by a SQLite pool
    pub fn from_pool(pool: DatabasePool) -> Result<Self, tera::Error> {
        Self::new(
            Arc::new(create_measurement_service(pool.clone())),
            Arc::new(DatabaseHealthService::new(pool)),
        )
    }
}
