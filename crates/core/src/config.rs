//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the registry. Core
//! code never reads environment variables itself; binaries read them and hand the raw values to
//! the helpers below.

use crate::clinics::ClinicCatalogue;
use crate::constants::DEFAULT_DATABASE_PATH;
use crate::{RegistryError, RegistryResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    clinics: ClinicCatalogue,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(database_path: PathBuf, clinics: ClinicCatalogue) -> RegistryResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "database path cannot be empty".into(),
            ));
        }

        Ok(Self {
            database_path,
            clinics,
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn clinics(&self) -> &ClinicCatalogue {
        &self.clinics
    }
}

/// Resolve the database path from an optional raw value (typically `MTRH_DB_PATH`).
///
/// `None` or a blank value falls back to [`DEFAULT_DATABASE_PATH`].
pub fn database_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}

/// Resolve the clinic catalogue.
///
/// If `override_file` is provided it must be a readable YAML catalogue; there is no silent
/// fallback when an explicitly configured file is broken. Otherwise the built-in MTRH list is
/// used.
pub fn resolve_clinic_catalogue(override_file: Option<PathBuf>) -> RegistryResult<ClinicCatalogue> {
    let Some(path) = override_file else {
        return Ok(ClinicCatalogue::mtrh_default());
    };

    let contents = std::fs::read_to_string(&path).map_err(RegistryError::ConfigRead)?;
    let catalogue = ClinicCatalogue::from_yaml_str(&contents)?;
    tracing::info!(
        "loaded {} clinics from {}",
        catalogue.len(),
        path.display()
    );
    Ok(catalogue)
}
