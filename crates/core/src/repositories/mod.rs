//! Data access for the registry.
//!
//! Repositories are thin SQL wrappers over a borrowed connection. They do no validation;
//! callers pass already-validated values.

pub mod patients;
