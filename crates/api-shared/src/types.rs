//! Request and response types.

use serde::{Deserialize, Serialize};

/// Liveness probe response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Single patient-id input used by the View and Delete forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIdReq {
    #[serde(default)]
    pub patient_id: Option<String>,
}

impl PatientIdReq {
    pub fn patient_id(&self) -> &str {
        self.patient_id.as_deref().unwrap_or_default()
    }
}

/// Re-exported so front ends deserialise the registration form straight into core's type.
pub use mtrh_core::PatientForm as AddPatientReq;
