//! # MTRH Core
//!
//! Core business logic for the MTRH patient registry.
//!
//! This crate contains pure data operations over a single SQLite table:
//! - Registering a patient with presence, clinic, gender and age checks
//! - Looking up and deleting records by patient id
//! - Exporting the whole table as CSV
//! - Startup configuration: database location and the clinic catalogue
//!
//! **No API concerns**: HTML forms, HTTP servers and command-line parsing belong in `api-rest`,
//! `mtrh-cli` or the `mtrh-run` binary.

pub mod clinics;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod patient;
pub mod registry;
pub mod repositories;
pub mod storage;
pub mod validation;

pub use clinics::ClinicCatalogue;
pub use config::CoreConfig;
pub use constants::*;
pub use error::{RegistryError, RegistryResult, Severity};
pub use export::CsvExport;
pub use patient::{NewPatient, PatientForm, PatientRecord};
pub use registry::PatientRegistry;

pub use mtrh_types::{Age, Gender, NonEmptyText, TextError};
