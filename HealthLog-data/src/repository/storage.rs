use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::debug;

use crate::models::measurement::{Measurement, NewMeasurement};
use super::errors::RepositoryError;

const SELECT_COLUMNS: &str =
    "SELECT id, patient_name, systolic, diastolic, heart_rate, notes, flagged, recorded_at
     FROM measurements";

/// SQL statements against the measurements table
///
/// Every function works on a connection the caller already checked out and
/// runs synchronously; the repository moves them onto blocking threads.
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Insert a measurement and return it with its assigned id
    pub fn insert(conn: &Connection, measurement: &NewMeasurement) -> Result<Measurement, RepositoryError> {
        debug!("Storing measurement in database: recorded_at={}", measurement.recorded_at);

        conn.execute(
            "INSERT INTO measurements
             (patient_name, systolic, diastolic, heart_rate, notes, flagged, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
            params![
                measurement.patient_name,
                measurement.systolic,
                measurement.diastolic,
                measurement.heart_rate,
                measurement.notes,
                measurement.recorded_at,
            ],
        )?;

        Ok(Measurement {
            id: conn.last_insert_rowid(),
            patient_name: measurement.patient_name.clone(),
            systolic: measurement.systolic,
            diastolic: measurement.diastolic,
            heart_rate: measurement.heart_rate,
            notes: measurement.notes.clone(),
            flagged: false,
            recorded_at: measurement.recorded_at.clone(),
        })
    }

    /// All measurements, newest first
    pub fn list_all(conn: &Connection) -> Result<Vec<Measurement>, RepositoryError> {
        debug!("Getting all measurements from database");

        let mut stmt = conn.prepare(&format!("{} ORDER BY recorded_at DESC, id DESC", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], map_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }

        Ok(result)
    }

    /// Delete by id; returns whether a row was removed
    pub fn delete(conn: &Connection, id: i64) -> Result<bool, RepositoryError> {
        debug!("Deleting measurement from database: id={}", id);

        let removed = conn.execute("DELETE FROM measurements WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Flip the flag of one measurement and return the new value
    ///
    /// The read and the write share an immediate transaction so two toggles
    /// on the same row cannot both read the old value.
    pub fn toggle_flag(conn: &mut Connection, id: i64) -> Result<bool, RepositoryError> {
        debug!("Toggling flag in database: id={}", id);

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: Option<bool> = tx
            .query_row("SELECT flagged FROM measurements WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;

        let Some(current) = current else {
            // Dropping the transaction rolls it back
            return Err(RepositoryError::NotFound(id));
        };

        let flagged = !current;
        tx.execute("UPDATE measurements SET flagged = ?1 WHERE id = ?2", params![flagged, id])?;
        tx.commit()?;

        Ok(flagged)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Measurement> {
    Ok(Measurement {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        systolic: row.get(2)?,
        diastolic: row.get(3)?,
        heart_rate: row.get(4)?,
        notes: row.get(5)?,
        flagged: row.get(6)?,
        recorded_at: row.get(7)?,
    })
}
