//! Patient record types.
//!
//! A record moves through three shapes:
//! - [`PatientForm`]: raw operator input, every field optional text
//! - [`NewPatient`]: validated insert payload (see [`crate::validation`])
//! - [`PatientRecord`]: a stored row, including the generated id and timestamps

use mtrh_types::{Age, Gender, NonEmptyText};
use serde::{Deserialize, Serialize};

/// Unvalidated registration input as submitted from a form or the command line.
///
/// Age is kept as text so that "left blank" and "not a number" can be told apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub healthcare_service_unit: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

/// A fully validated patient ready to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub patient_id: NonEmptyText,
    pub diagnosis: NonEmptyText,
    /// Canonical clinic name taken from the catalogue.
    pub healthcare_service_unit: String,
    pub mobile_number: NonEmptyText,
    pub gender: Gender,
    pub age: Age,
}

/// A stored patient row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    pub creation_date: String,
    pub diagnosis_date: String,
    pub diagnosis: String,
    pub healthcare_service_unit: String,
    pub patient_id: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i64,
}

impl PatientRecord {
    /// Labelled fields for the read-only summary, in display order.
    pub fn summary_fields(&self) -> [(&'static str, String); 9] {
        [
            ("ID", self.id.to_string()),
            ("Creation Date", self.creation_date.clone()),
            ("Diagnosis Date", self.diagnosis_date.clone()),
            ("Diagnosis", self.diagnosis.clone()),
            ("Healthcare Unit", self.healthcare_service_unit.clone()),
            ("Patient ID", self.patient_id.clone()),
            ("Mobile Number", self.mobile_number.clone()),
            ("Gender", self.gender.clone()),
            ("Age", self.age.to_string()),
        ]
    }
}
