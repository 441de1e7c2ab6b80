//! Queries against the `patients` table.

use crate::patient::{NewPatient, PatientRecord};
use crate::RegistryResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str = "SELECT id, creation_date, diagnosis_date, diagnosis,
        healthcare_service_unit, patient_id, mobile_number, gender, age
     FROM patients";

/// Insert one patient row stamped with `timestamp` and return its generated id.
///
/// The same timestamp is written to both `creation_date` and `diagnosis_date`.
pub fn insert_patient(
    conn: &Connection,
    patient: &NewPatient,
    timestamp: &str,
) -> RegistryResult<i64> {
    conn.execute(
        "INSERT INTO patients (creation_date, diagnosis_date, diagnosis,
             healthcare_service_unit, patient_id, mobile_number, gender, age)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            timestamp,
            timestamp,
            patient.diagnosis.as_str(),
            patient.healthcare_service_unit,
            patient.patient_id.as_str(),
            patient.mobile_number.as_str(),
            patient.gender.as_str(),
            i64::from(patient.age),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// First row (lowest id) whose `patient_id` matches exactly.
pub fn find_first_by_patient_id(
    conn: &Connection,
    patient_id: &str,
) -> RegistryResult<Option<PatientRecord>> {
    let sql = format!("{SELECT_COLUMNS} WHERE patient_id = ?1 ORDER BY id LIMIT 1");
    let record = conn
        .query_row(&sql, [patient_id], record_from_row)
        .optional()?;
    Ok(record)
}

/// Delete every row whose `patient_id` matches exactly; returns how many went.
pub fn delete_by_patient_id(conn: &Connection, patient_id: &str) -> RegistryResult<usize> {
    let deleted = conn.execute("DELETE FROM patients WHERE patient_id = ?1", [patient_id])?;
    Ok(deleted)
}

/// Every row in id order.
pub fn list_all(conn: &Connection) -> RegistryResult<Vec<PatientRecord>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map([], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn count_patients(conn: &Connection) -> RegistryResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

// Columns are nullable in databases created before the schema was versioned.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        creation_date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        diagnosis_date: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        diagnosis: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        healthcare_service_unit: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        patient_id: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        mobile_number: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        gender: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        age: row.get::<_, Option<i64>>(8)?.unwrap_or_default(),
    })
}
