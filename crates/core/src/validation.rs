//! Input validation utilities.
//!
//! These functions turn raw operator input into validated values before anything touches the
//! database. Presence is checked first across every field so the operator gets a single
//! "fill everything in" warning; only then are the enumerations and the age range checked.

use crate::clinics::ClinicCatalogue;
use crate::constants::{MSG_ALL_FIELDS_REQUIRED, MSG_PATIENT_ID_REQUIRED};
use crate::patient::{NewPatient, PatientForm};
use crate::{RegistryError, RegistryResult};
use mtrh_types::{Age, Gender, NonEmptyText};

/// Validates a registration form against the clinic catalogue.
///
/// # Errors
///
/// - `RegistryError::MissingInput` if any field is absent or blank
/// - `RegistryError::UnknownClinic` if the unit is not in `clinics`
/// - `RegistryError::InvalidGender` if gender is not one of [`Gender::ALL`]
/// - `RegistryError::InvalidAge` if age is not an integer in `[0, 120]`
pub fn validate_patient_form(
    form: &PatientForm,
    clinics: &ClinicCatalogue,
) -> RegistryResult<NewPatient> {
    let required = |value: &Option<String>| {
        NonEmptyText::from_optional(value.as_deref())
            .map_err(|_| RegistryError::MissingInput(MSG_ALL_FIELDS_REQUIRED))
    };

    let patient_id = required(&form.patient_id)?;
    let diagnosis = required(&form.diagnosis)?;
    let unit = required(&form.healthcare_service_unit)?;
    let mobile_number = required(&form.mobile_number)?;
    let gender = required(&form.gender)?;
    let age = required(&form.age)?;

    let healthcare_service_unit = clinics
        .resolve(unit.as_str())
        .ok_or_else(|| RegistryError::UnknownClinic(unit.to_string()))?
        .to_string();

    let gender = gender
        .as_str()
        .parse::<Gender>()
        .map_err(|e| RegistryError::InvalidGender(e.to_string()))?;

    let age = age
        .as_str()
        .parse::<Age>()
        .map_err(|e| RegistryError::InvalidAge(e.to_string()))?;

    Ok(NewPatient {
        patient_id,
        diagnosis,
        healthcare_service_unit,
        mobile_number,
        gender,
        age,
    })
}

/// Validates the single patient-id input used by View and Delete.
///
/// Blank input is rejected, but the id is returned untouched so lookups stay exact matches.
pub fn validate_lookup_id(patient_id: &str) -> RegistryResult<&str> {
    NonEmptyText::new(patient_id)
        .map(|_| patient_id)
        .map_err(|_| RegistryError::MissingInput(MSG_PATIENT_ID_REQUIRED))
}
