//! The catalogue of healthcare service units a patient can be registered against.
//!
//! The catalogue is built once at startup, either from the built-in MTRH list or from a YAML
//! file, and is validated on construction: at least one clinic, no blank names and no
//! duplicates. Operations only ever consult it; they never carry their own clinic literals.
//!
//! A catalogue file may be a plain YAML sequence:
//!
//! ```yaml
//! - ENT - General - MTRH
//! - MOPC CLINIC - MTRH
//! ```
//!
//! or a mapping with a `clinics` key:
//!
//! ```yaml
//! clinics:
//!   - ENT - General - MTRH
//! ```

use crate::constants::DEFAULT_CLINIC_NAMES;
use crate::{RegistryError, RegistryResult};
use std::collections::HashSet;

/// Validated, ordered list of clinic names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClinicCatalogue {
    names: Vec<String>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CatalogueFile {
    List(Vec<String>),
    Keyed { clinics: Vec<String> },
}

impl ClinicCatalogue {
    /// Builds a catalogue from the given names, preserving their order.
    ///
    /// Names are trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidConfig` if the list is empty, a name is blank, or a name
    /// appears more than once.
    pub fn new<I, S>(names: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RegistryError::InvalidConfig(
                    "clinic names cannot be empty".into(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(RegistryError::InvalidConfig(format!(
                    "duplicate clinic name: {name}"
                )));
            }
            validated.push(name.to_string());
        }

        if validated.is_empty() {
            return Err(RegistryError::InvalidConfig(
                "clinic catalogue must contain at least one clinic".into(),
            ));
        }

        Ok(Self { names: validated })
    }

    /// The built-in MTRH clinic list.
    pub fn mtrh_default() -> Self {
        Self {
            names: DEFAULT_CLINIC_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parses a catalogue from YAML text.
    pub fn from_yaml_str(yaml: &str) -> RegistryResult<Self> {
        let parsed: CatalogueFile = serde_yaml::from_str(yaml).map_err(RegistryError::ConfigParse)?;
        match parsed {
            CatalogueFile::List(names) | CatalogueFile::Keyed { clinics: names } => {
                Self::new(names)
            }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up a submitted clinic name, returning the catalogue's own spelling.
    ///
    /// Matching is exact after trimming surrounding whitespace.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        let candidate = candidate.trim();
        self.names
            .iter()
            .find(|name| name.as_str() == candidate)
            .map(String::as_str)
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.resolve(candidate).is_some()
    }
}

impl Default for ClinicCatalogue {
    fn default() -> Self {
        Self::mtrh_default()
    }
}
