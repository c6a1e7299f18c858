use rusqlite::Connection;
use tracing::info;

use crate::database::DatabaseError;

/// Run SQLite migrations
///
/// Every statement is `IF NOT EXISTS`, so running this against an already
/// initialized database file is a no-op.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_measurements_table(conn)?;
    create_measurements_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the measurements table
fn create_measurements_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating measurements table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS measurements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_name TEXT,
            systolic INTEGER NOT NULL,
            diastolic INTEGER NOT NULL,
            heart_rate INTEGER,
            notes TEXT,
            flagged INTEGER NOT NULL DEFAULT 0,
            recorded_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| DatabaseError::MigrationError(format!("Failed to create measurements table: {}", e)))?;

    Ok(())
}

/// Create index on recorded_at for the newest-first listing
fn create_measurements_index(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating index on recorded_at");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_measurements_recorded_at
        ON measurements (recorded_at DESC)",
        [],
    ).map_err(|e| DatabaseError::MigrationError(format!("Failed to create index: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_columns(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("PRAGMA table_info(measurements)").unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
    }

    #[test]
    fn test_migrations_create_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(
            table_columns(&conn),
            vec!["id", "patient_name", "systolic", "diastolic", "heart_rate", "notes", "flagged", "recorded_at"]
        );

        let index_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_measurements_recorded_at'",
            [],
            |row| row.get(0),
        ).unwrap();
        assert_eq!(index_count, 1);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO measurements (systolic, diastolic, recorded_at) VALUES (120, 80, '2024-01-01T00:00:00.000000')",
            [],
        ).unwrap();

        // Second run must neither fail nor drop existing rows
        run_migrations(&conn).unwrap();

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_flagged_defaults_to_zero() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO measurements (systolic, diastolic, recorded_at) VALUES (110, 70, '2024-01-01T00:00:00.000000')",
            [],
        ).unwrap();

        let flagged: i64 = conn.query_row("SELECT flagged FROM measurements", [], |row| row.get(0)).unwrap();
        assert_eq!(flagged, 0);
    }
}
