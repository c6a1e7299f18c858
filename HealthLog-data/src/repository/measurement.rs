use async_trait::async_trait;
use rusqlite::Connection;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::measurement::{Measurement, NewMeasurement};
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for measurements
#[async_trait]
pub trait MeasurementRepositoryTrait: Send + Sync {
    /// Insert a parsed measurement and return it with its id
    async fn insert(&self, measurement: NewMeasurement) -> Result<Measurement, RepositoryError>;

    /// All measurements ordered by `recorded_at`, newest first
    async fn list_all(&self) -> Result<Vec<Measurement>, RepositoryError>;

    /// Delete by id; deleting an unknown id is not an error
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Flip the flag and return its new value, `NotFound` for an unknown id
    async fn toggle_flag(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// SQLite-backed repository for measurements
#[derive(Debug, Clone)]
pub struct MeasurementRepository {
    pool: DatabasePool,
}

impl MeasurementRepository {
    /// Create a new repository on top of a connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run `op` on a blocking thread
    async fn with_connection<T, F>(&self, op: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for MeasurementRepository {
    async fn insert(&self, measurement: NewMeasurement) -> Result<Measurement, RepositoryError> {
        debug!("Inserting measurement: systolic={}, diastolic={}", measurement.systolic, measurement.diastolic);
        self.with_connection(move |conn| DatabaseStorage::insert(conn, &measurement)).await
    }

    async fn list_all(&self) -> Result<Vec<Measurement>, RepositoryError> {
        self.with_connection(|conn| DatabaseStorage::list_all(conn)).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        self.with_connection(move |conn| DatabaseStorage::delete(conn, id)).await
    }

    async fn toggle_flag(&self, id: i64) -> Result<bool, RepositoryError> {
        self.with_connection(move |conn| DatabaseStorage::toggle_flag(conn, id)).await
    }
}
