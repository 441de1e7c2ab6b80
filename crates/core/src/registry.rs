//! The patient registry service.
//!
//! [`PatientRegistry`] owns the single SQLite connection for the lifetime of the process and
//! exposes the four operator actions: add, view, delete and export. Each call runs to
//! completion synchronously; there is no state between calls beyond the connection itself.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. Rendering, HTTP and command-line concerns
//! belong in `api-rest` and `mtrh-cli`.

use crate::config::CoreConfig;
use crate::constants::TIMESTAMP_FORMAT;
use crate::export::CsvExport;
use crate::patient::{PatientForm, PatientRecord};
use crate::repositories::patients;
use crate::validation::{validate_lookup_id, validate_patient_form};
use crate::{storage, RegistryError, RegistryResult};
use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use std::sync::Arc;

/// Registry operations over an owned connection.
pub struct PatientRegistry {
    cfg: Arc<CoreConfig>,
    conn: Connection,
}

impl PatientRegistry {
    /// Opens (creating if needed) the database named in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Database` if the file cannot be opened, or
    /// `RegistryError::SchemaVersionMismatch` if it was written by a newer build.
    pub fn open(cfg: Arc<CoreConfig>) -> RegistryResult<Self> {
        let conn = storage::open_database(cfg.database_path())?;
        Ok(Self { cfg, conn })
    }

    /// Opens a registry backed by an in-memory database. `cfg.database_path()` is ignored.
    pub fn open_in_memory(cfg: Arc<CoreConfig>) -> RegistryResult<Self> {
        let conn = storage::open_memory_database()?;
        Ok(Self { cfg, conn })
    }

    pub fn config(&self) -> &Arc<CoreConfig> {
        &self.cfg
    }

    /// Validates and stores a new patient, returning the generated row id.
    ///
    /// The current local time is read once and used for both `creation_date` and
    /// `diagnosis_date`.
    ///
    /// # Errors
    ///
    /// Returns the validation errors described on
    /// [`validate_patient_form`](crate::validation::validate_patient_form); nothing is written
    /// when validation fails.
    pub fn add_patient(&self, form: &PatientForm) -> RegistryResult<i64> {
        self.add_patient_at(form, Local::now().naive_local())
    }

    pub(crate) fn add_patient_at(
        &self,
        form: &PatientForm,
        now: NaiveDateTime,
    ) -> RegistryResult<i64> {
        let patient = validate_patient_form(form, self.cfg.clinics()).inspect_err(|e| {
            tracing::warn!("rejected patient registration: {e}");
        })?;

        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let id = patients::insert_patient(&self.conn, &patient, &timestamp)?;
        tracing::info!(
            "registered patient row {id} at {}",
            patient.healthcare_service_unit
        );
        Ok(id)
    }

    /// Returns the first record (lowest id) whose patient id matches exactly.
    ///
    /// # Errors
    ///
    /// `RegistryError::MissingInput` for a blank id, `RegistryError::NotFound` when no row
    /// matches.
    pub fn view_patient(&self, patient_id: &str) -> RegistryResult<PatientRecord> {
        let patient_id = validate_lookup_id(patient_id)?;
        patients::find_first_by_patient_id(&self.conn, patient_id)?
            .ok_or(RegistryError::NotFound)
    }

    /// Deletes every record with the given patient id.
    ///
    /// Deleting an id with no rows is not an error. The returned count is for logging; the
    /// operator is told "deleted" either way.
    pub fn delete_patient(&self, patient_id: &str) -> RegistryResult<usize> {
        let patient_id = validate_lookup_id(patient_id)?;
        let deleted = patients::delete_by_patient_id(&self.conn, patient_id)?;
        tracing::info!("deleted {deleted} row(s) for a patient id");
        Ok(deleted)
    }

    /// Renders the whole table as CSV.
    ///
    /// # Errors
    ///
    /// `RegistryError::EmptyExport` if the table has no rows.
    pub fn export_all(&self) -> RegistryResult<CsvExport> {
        let records = patients::list_all(&self.conn)?;
        if records.is_empty() {
            return Err(RegistryError::EmptyExport);
        }
        tracing::info!("exporting {} patient row(s)", records.len());
        Ok(CsvExport::from_records(&records))
    }

    pub fn count(&self) -> RegistryResult<i64> {
        patients::count_patients(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinics::ClinicCatalogue;
    use crate::constants::{EXPORT_HEADER, MSG_ALL_FIELDS_REQUIRED};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_cfg(database_path: PathBuf) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(database_path, ClinicCatalogue::mtrh_default())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn test_registry() -> PatientRegistry {
        PatientRegistry::open_in_memory(test_cfg(PathBuf::from("unused.db")))
            .expect("in-memory registry should open")
    }

    fn form(patient_id: &str) -> PatientForm {
        PatientForm {
            patient_id: Some(patient_id.into()),
            diagnosis: Some("Sickle cell anaemia".into()),
            healthcare_service_unit: Some("Haematology Clinic - Chandaria - MTRH".into()),
            mobile_number: Some("0722000333".into()),
            gender: Some("Male".into()),
            age: Some("12".into()),
        }
    }

    #[test]
    fn test_add_increments_count_by_one() {
        let registry = test_registry();
        assert_eq!(registry.count().expect("count"), 0);
        registry.add_patient(&form("P1")).expect("add should succeed");
        assert_eq!(registry.count().expect("count"), 1);
        registry.add_patient(&form("P2")).expect("add should succeed");
        assert_eq!(registry.count().expect("count"), 2);
    }

    #[test]
    fn test_add_with_missing_field_leaves_count_unchanged() {
        let registry = test_registry();
        let mut incomplete = form("P1");
        incomplete.mobile_number = Some(String::new());

        let err = registry
            .add_patient(&incomplete)
            .expect_err("incomplete form should be rejected");
        assert!(matches!(err, RegistryError::MissingInput(msg) if msg == MSG_ALL_FIELDS_REQUIRED));
        assert_eq!(registry.count().expect("count"), 0);
    }

    #[test]
    fn test_add_then_view_returns_supplied_fields() {
        let registry = test_registry();
        let now = NaiveDate::from_ymd_opt(2024, 6, 30)
            .and_then(|d| d.and_hms_opt(14, 5, 9))
            .expect("valid timestamp");
        let id = registry
            .add_patient_at(&form("P100"), now)
            .expect("add should succeed");

        let record = registry.view_patient("P100").expect("P100 should be found");
        assert_eq!(record.id, id);
        assert!(record.id > 0);
        assert_eq!(record.patient_id, "P100");
        assert_eq!(record.diagnosis, "Sickle cell anaemia");
        assert_eq!(
            record.healthcare_service_unit,
            "Haematology Clinic - Chandaria - MTRH"
        );
        assert_eq!(record.mobile_number, "0722000333");
        assert_eq!(record.gender, "Male");
        assert_eq!(record.age, 12);
        assert_eq!(record.creation_date, "2024-06-30 14:05:09");
        assert_eq!(record.diagnosis_date, record.creation_date);
    }

    #[test]
    fn test_add_uses_wall_clock_timestamp_format() {
        let registry = test_registry();
        registry.add_patient(&form("P5")).expect("add should succeed");
        let record = registry.view_patient("P5").expect("should be found");
        assert!(
            NaiveDateTime::parse_from_str(&record.creation_date, TIMESTAMP_FORMAT).is_ok(),
            "unexpected timestamp {}",
            record.creation_date
        );
        assert_eq!(record.creation_date, record.diagnosis_date);
    }

    #[test]
    fn test_view_unknown_id_is_not_found() {
        let registry = test_registry();
        registry.add_patient(&form("P1")).expect("add should succeed");
        assert!(matches!(
            registry.view_patient("NOPE"),
            Err(RegistryError::NotFound)
        ));
    }

    #[test]
    fn test_view_and_delete_require_an_id() {
        let registry = test_registry();
        assert!(matches!(
            registry.view_patient(""),
            Err(RegistryError::MissingInput(_))
        ));
        assert!(matches!(
            registry.delete_patient("  "),
            Err(RegistryError::MissingInput(_))
        ));
    }

    #[test]
    fn test_delete_removes_every_duplicate() {
        let registry = test_registry();
        registry.add_patient(&form("DUP")).expect("add 1");
        registry.add_patient(&form("DUP")).expect("add 2");
        registry.add_patient(&form("OTHER")).expect("add 3");

        assert_eq!(registry.delete_patient("DUP").expect("delete"), 2);
        assert!(matches!(
            registry.view_patient("DUP"),
            Err(RegistryError::NotFound)
        ));
        assert_eq!(registry.count().expect("count"), 1);
    }

    #[test]
    fn test_delete_unknown_id_is_a_successful_no_op() {
        let registry = test_registry();
        registry.add_patient(&form("P1")).expect("add");
        assert_eq!(registry.delete_patient("GHOST").expect("delete"), 0);
        assert_eq!(registry.count().expect("count"), 1);
    }

    #[test]
    fn test_lookup_matches_padded_ids_exactly() {
        let registry = test_registry();
        registry
            .conn
            .execute(
                "INSERT INTO patients (creation_date, diagnosis_date, diagnosis,
                     healthcare_service_unit, patient_id, mobile_number, gender, age)
                 VALUES ('2023-01-01 08:00:00', '2023-01-01 08:00:00', 'Asthma',
                     'ENT - General - MTRH', 'P100 ', '0700', 'Female', 30)",
                [],
            )
            .expect("padded row insert");

        assert!(matches!(
            registry.view_patient("P100"),
            Err(RegistryError::NotFound)
        ));
        let record = registry.view_patient("P100 ").expect("padded id should be found");
        assert_eq!(record.patient_id, "P100 ");

        assert_eq!(registry.delete_patient("P100").expect("delete"), 0);
        assert_eq!(registry.delete_patient("P100 ").expect("delete"), 1);
        assert_eq!(registry.count().expect("count"), 0);
    }

    #[test]
    fn test_export_empty_table_is_a_warning() {
        let registry = test_registry();
        assert!(matches!(
            registry.export_all(),
            Err(RegistryError::EmptyExport)
        ));
    }

    #[test]
    fn test_export_has_header_plus_one_line_per_row() {
        let registry = test_registry();
        for id in ["P1", "P2", "P3"] {
            registry.add_patient(&form(id)).expect("add");
        }

        let export = registry.export_all().expect("export should succeed");
        let lines: Vec<&str> = export.body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], EXPORT_HEADER.join(","));
        assert!(lines[1].contains(",P1,"));
        assert!(lines[3].contains(",P3,"));
    }

    #[test]
    fn test_records_survive_reopening_the_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path().join("mtrh.db"));

        {
            let registry = PatientRegistry::open(cfg.clone()).expect("first open");
            registry.add_patient(&form("P9")).expect("add");
        }

        let registry = PatientRegistry::open(cfg).expect("second open");
        assert_eq!(registry.view_patient("P9").expect("found").patient_id, "P9");
    }
}
