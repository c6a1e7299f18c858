//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, error};

use health_log_data::database::DatabasePool;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database
    /// Returns a description of the database on success
    async fn check_database_status(&self) -> Result<String, String>;
}

/// Health service that checks the SQLite database
#[derive(Debug, Clone)]
pub struct DatabaseHealthService {
    pool: DatabasePool,
}

impl DatabaseHealthService {
    /// Create a new health service for the given pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthServiceTrait for DatabaseHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let database = match self.check_database_status().await {
            Ok(info) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(info),
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        let api = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };

        SystemHealth::from_components(
            vec![
                ("database".to_string(), database),
                ("api".to_string(), api),
            ].into_iter().collect(),
        )
    }

    async fn check_database_status(&self) -> Result<String, String> {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            pool.ping().map(|_| pool.connection_info())
        }).await;

        match result {
            Ok(Ok(info)) => {
                debug!("Database health check passed: {}", info);
                Ok(info)
            },
            Ok(Err(e)) => {
                error!("Database health check failed: {}", e);
                Err(format!("Database connection error: {}", e))
            },
            Err(e) => {
                error!("Database health check task failed: {}", e);
                Err(format!("Database health check failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_log_data::database::{initialize_database_pool, DatabaseConfig};

    fn component(status: ComponentStatus) -> HealthComponent {
        HealthComponent { status, details: None }
    }

    #[tokio::test]
    async fn test_database_health_service_reports_healthy() {
        let pool = initialize_database_pool(&DatabaseConfig::in_memory()).unwrap();
        let service = DatabaseHealthService::new(pool);

        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("database"));
        assert!(health.components.contains_key("api"));
    }

    #[test]
    fn test_overall_status_is_worst_component() {
        let healthy = SystemHealth::from_components(
            vec![("a".to_string(), component(ComponentStatus::Healthy))].into_iter().collect(),
        );
        assert_eq!(healthy.status, SystemStatus::Healthy);

        let degraded = SystemHealth::from_components(vec![
            ("a".to_string(), component(ComponentStatus::Healthy)),
            ("b".to_string(), component(ComponentStatus::Degraded)),
        ].into_iter().collect());
        assert_eq!(degraded.status, SystemStatus::Degraded);

        let unhealthy = SystemHealth::from_components(vec![
            ("a".to_string(), component(ComponentStatus::Degraded)),
            ("b".to_string(), component(ComponentStatus::Unhealthy)),
        ].into_iter().collect());
        assert_eq!(unhealthy.status, SystemStatus::Unhealthy);
    }
}
