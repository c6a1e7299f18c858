//! Database connection module for the HealthLog application
//!
//! The application stores everything in a single SQLite file. Connections are
//! handed out by an r2d2 pool which acts as the connection factory: each store
//! operation checks one out, runs its statement and gives it back. The pool is
//! created once in `main` and passed explicitly to whoever needs it.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;
use tracing::{debug, error, info};

use super::migrations::run_sqlite_migrations;

/// Path used when an in-memory database is requested
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Directory holding the database file when no explicit path is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the database inside the data directory
pub const DEFAULT_DB_FILE: &str = "health.db";

/// A connection checked out of the pool
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Filesystem error while preparing the database location
    #[error("Database file error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, `None` or `:memory:` for an in-memory database
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
    /// How long SQLite waits on a locked database before failing, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some(format!("{}/{}", DEFAULT_DATA_DIR, DEFAULT_DB_FILE)),
            max_connections: 10,
            timeout_seconds: 30,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database, used by tests and `DB_SQLITE_PATH=:memory:`
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: None,
            ..Self::default()
        }
    }

    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup; missing or unparsable numbers keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sqlite_path = match lookup("DB_SQLITE_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(DatabaseError::ConfigError("DB_SQLITE_PATH must not be empty".to_string()));
            }
            Some(path) => Some(path),
            None => {
                let data_dir = lookup("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
                let path = Path::new(&data_dir).join(DEFAULT_DB_FILE).to_string_lossy().into_owned();
                info!("No DB_SQLITE_PATH provided, will use default path: {}", path);
                Some(path)
            }
        };

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = lookup("DB_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        let busy_timeout_ms = lookup("DB_BUSY_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.busy_timeout_ms);

        info!("Database configuration: max_connections={}, timeout={}s, busy_timeout={}ms",
            max_connections, timeout_seconds, busy_timeout_ms);

        Ok(DatabaseConfig {
            sqlite_path,
            max_connections,
            timeout_seconds,
            busy_timeout_ms,
        })
    }

    /// Whether this configuration points at an in-memory database
    pub fn is_in_memory(&self) -> bool {
        match self.sqlite_path.as_deref() {
            None => true,
            Some(path) => path == IN_MEMORY_PATH,
        }
    }
}

/// Shared handle to the SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: Arc<Pool<SqliteConnectionManager>>,
    location: String,
}

impl DatabasePool {
    /// Check a connection out of the pool
    pub fn get(&self) -> Result<SqliteConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Where the database lives: a file path or `:memory:`
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run a trivial query to verify the database answers
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Human readable description of the database and pool state
    pub fn connection_info(&self) -> String {
        let state = self.pool.state();
        let kind = if self.location == IN_MEMORY_PATH {
            "SQLite in-memory database".to_string()
        } else {
            format!("SQLite database at {}", self.location)
        };

        format!("{} (connections: active={}, idle={})",
            kind,
            state.connections,
            state.idle_connections
        )
    }
}

/// Create the connection pool and run migrations
pub fn initialize_database_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let pool = if config.is_in_memory() {
        initialize_in_memory_sqlite_pool(config)?
    } else {
        initialize_sqlite_pool(config)?
    };

    run_migrations(&pool)?;
    Ok(pool)
}

/// Initialize SQLite connection pool backed by a file
fn initialize_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let sqlite_path = config.sqlite_path.clone()
        .ok_or_else(|| DatabaseError::ConfigError("No SQLite path configured".to_string()))?;

    info!("Initializing SQLite database at: {}", sqlite_path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(&sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create directory {:?}: {}", parent, e);
                DatabaseError::IoError(e)
            })?;
        }
    }

    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(&sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(move |conn| conn.busy_timeout(busy_timeout));

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)
        .map_err(|e| {
            error!("Failed to create SQLite connection pool: {}", e);
            DatabaseError::SqlitePoolError(e)
        })?;

    info!("SQLite connection pool created successfully");
    Ok(DatabasePool {
        pool: Arc::new(pool),
        location: sqlite_path,
    })
}

/// Initialize an in-memory SQLite database
///
/// Every SQLite in-memory connection is its own database, so the pool holds
/// exactly one connection and never recycles it.
fn initialize_in_memory_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory();

    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    info!("In-memory SQLite database initialized successfully");
    Ok(DatabasePool {
        pool: Arc::new(pool),
        location: IN_MEMORY_PATH.to_string(),
    })
}

/// Run database migrations on a freshly created pool
fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    debug!("Running database migrations on {}", pool.location());

    let conn = pool.get()?;
    run_sqlite_migrations(&conn)?;

    info!("Database migrations completed successfully");
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_path.as_deref(), Some("data/health.db"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DB_SQLITE_PATH", "/tmp/other.db"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_TIMEOUT_SECONDS", "7"),
            ("DB_BUSY_TIMEOUT_MS", "250"),
        ])).unwrap();

        assert_eq!(config.sqlite_path.as_deref(), Some("/tmp/other.db"));
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.timeout_seconds, 7);
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_config_from_lookup_bad_numbers_fall_back() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DB_MAX_CONNECTIONS", "zero"),
            ("DB_TIMEOUT_SECONDS", "-1"),
        ])).unwrap();

        assert_eq!(config, DatabaseConfig::default());
    }

    #[test]
    fn test_config_default_path_follows_data_dir() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[("DATA_DIR", "/var/lib/healthlog")])).unwrap();
        assert_eq!(config.sqlite_path.as_deref(), Some("/var/lib/healthlog/health.db"));

        let explicit = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATA_DIR", "/var/lib/healthlog"),
            ("DB_SQLITE_PATH", "/tmp/explicit.db"),
        ])).unwrap();
        assert_eq!(explicit.sqlite_path.as_deref(), Some("/tmp/explicit.db"));
    }

    #[test]
    fn test_config_rejects_blank_path() {
        let result = DatabaseConfig::from_lookup(lookup_from(&[("DB_SQLITE_PATH", "  ")]));
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }

    #[test]
    fn test_memory_path_is_in_memory() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[("DB_SQLITE_PATH", ":memory:")])).unwrap();
        assert!(config.is_in_memory());
        assert!(DatabaseConfig::in_memory().is_in_memory());
    }

    #[test]
    fn test_in_memory_pool_runs_migrations() {
        let pool = initialize_database_pool(&DatabaseConfig::in_memory()).unwrap();
        assert_eq!(pool.location(), IN_MEMORY_PATH);
        pool.ping().unwrap();

        let conn = pool.get().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 0);
        drop(conn);

        assert!(pool.connection_info().contains("in-memory"));
    }

    #[test]
    fn test_file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("health.db");
        let config = DatabaseConfig {
            sqlite_path: Some(db_path.to_string_lossy().to_string()),
            max_connections: 2,
            ..DatabaseConfig::default()
        };

        let pool = initialize_database_pool(&config).unwrap();
        pool.ping().unwrap();
        assert!(db_path.exists());
        assert!(pool.connection_info().contains("health.db"));
    }
}
