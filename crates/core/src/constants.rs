//! Constants used throughout the registry core crate.
//!
//! File names, formats and operator-facing messages live here so that the CLI and the form
//! server stay word-for-word consistent.

/// Default SQLite database file when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "mtrh.db";

/// Version of the on-disk schema written by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// Timestamp layout for `creation_date` and `diagnosis_date` (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Filename offered for the full-table download.
pub const EXPORT_FILENAME: &str = "mtrh_data.csv";

/// MIME type of the export payload.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Column header of the export, in output order.
pub const EXPORT_HEADER: [&str; 9] = [
    "ID",
    "Creation Date",
    "Diagnosis Date",
    "Diagnosis",
    "Healthcare Unit",
    "Patient ID",
    "Mobile",
    "Gender",
    "Age",
];

/// Clinics offered when no catalogue file is configured.
pub const DEFAULT_CLINIC_NAMES: [&str; 10] = [
    "S4A OPD Ambulatory",
    "PW 2 OPD - Consultant Room - MTRH",
    "Ambulatory Consultation - MTRH",
    "ED - Medical Emergency (Rm 14) - MTRH",
    "Diabetic Clinic - Chandaria - MTRH",
    "ENT - General - MTRH",
    "Haematology Clinic - Chandaria - MTRH",
    "MOPC CLINIC - MTRH",
    "Dental- OMFS- Oral & Maxillofacial Clinic - MTRH",
    "General-Oncology Telemedicine - MTRH",
];

pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields must be filled!";
pub const MSG_PATIENT_ID_REQUIRED: &str = "Please enter a Patient ID.";
pub const MSG_PATIENT_SAVED: &str = "Patient data saved successfully!";
pub const MSG_RECORD_DELETED: &str = "Record deleted successfully!";
