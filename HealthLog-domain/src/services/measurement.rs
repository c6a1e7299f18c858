use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::entities::conversions;
use crate::entities::measurement::{current_timestamp, Measurement, MeasurementForm, MeasurementFormError};
use health_log_data::database::DatabasePool;
use health_log_data::repository::{MeasurementRepository, MeasurementRepositoryTrait, RepositoryError};

/// Measurement service errors
#[derive(Debug, Error)]
pub enum MeasurementServiceError {
    /// The submitted form could not be parsed
    #[error("Validation error: {0}")]
    Validation(#[from] MeasurementFormError),

    /// No measurement with this id
    #[error("Measurement not found: {0}")]
    NotFound(i64),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for measurement service operations
#[async_trait]
pub trait MeasurementServiceTrait: Send + Sync {
    /// All measurements, newest first
    async fn list_measurements(&self) -> Result<Vec<Measurement>, MeasurementServiceError>;

    /// Parse a submitted form and store it, stamped with the current time
    async fn record_measurement(&self, form: MeasurementForm) -> Result<Measurement, MeasurementServiceError>;

    /// Delete a measurement; returns whether anything was removed
    async fn delete_measurement(&self, id: i64) -> Result<bool, MeasurementServiceError>;

    /// Flip the flag of a measurement and return the new value
    async fn toggle_flag(&self, id: i64) -> Result<bool, MeasurementServiceError>;
}

/// Measurement service for domain logic
pub struct MeasurementService<R: MeasurementRepositoryTrait> {
    repository: R,
}

impl<R: MeasurementRepositoryTrait> MeasurementService<R> {
    /// Create a new measurement service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MeasurementServiceError {
        match err {
            RepositoryError::NotFound(id) => MeasurementServiceError::NotFound(id),
            _ => MeasurementServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: MeasurementRepositoryTrait> MeasurementServiceTrait for MeasurementService<R> {
    async fn list_measurements(&self) -> Result<Vec<Measurement>, MeasurementServiceError> {
        let data_measurements = self.repository.list_all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        debug!("Loaded {} measurements", data_measurements.len());

        Ok(data_measurements.into_iter()
            .map(conversions::convert_to_domain_measurement)
            .collect())
    }

    async fn record_measurement(&self, form: MeasurementForm) -> Result<Measurement, MeasurementServiceError> {
        let request = form.parse().map_err(|e| {
            warn!("Rejected measurement form: {}", e);
            MeasurementServiceError::from(e)
        })?;

        let data_request = conversions::convert_to_data_new_measurement(request, current_timestamp());

        let stored = self.repository.insert(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Measurement recorded with ID: {}", stored.id);
        Ok(conversions::convert_to_domain_measurement(stored))
    }

    async fn delete_measurement(&self, id: i64) -> Result<bool, MeasurementServiceError> {
        let removed = self.repository.delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        if removed {
            info!("Measurement deleted: {}", id);
        } else {
            debug!("Delete requested for unknown measurement: {}", id);
        }

        Ok(removed)
    }

    async fn toggle_flag(&self, id: i64) -> Result<bool, MeasurementServiceError> {
        let flagged = self.repository.toggle_flag(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Measurement {} flagged={}", id, flagged);
        Ok(flagged)
    }
}

/// Create a measurement service backed by the SQLite repository
pub fn create_measurement_service(pool: DatabasePool) -> MeasurementService<MeasurementRepository> {
    MeasurementService::new(MeasurementRepository::new(pool))
}
