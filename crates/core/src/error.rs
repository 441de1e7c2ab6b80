/// How an error should be presented to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable input problem; the operator can correct and resubmit.
    Warning,
    /// The request was understood but could not be satisfied.
    Error,
    /// Storage or configuration failure. Details are logged, not shown.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{0}")]
    MissingInput(&'static str),
    #[error("No record found for the given Patient ID.")]
    NotFound,
    #[error("No records found to download.")]
    EmptyExport,
    #[error("unknown healthcare service unit: {0}")]
    UnknownClinic(String),
    #[error("invalid age: {0}")]
    InvalidAge(String),
    #[error("invalid gender: {0}")]
    InvalidGender(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(
        "database schema version {found} is newer than the supported version {supported}"
    )]
    SchemaVersionMismatch { found: i64, supported: i64 },
    #[error("failed to read configuration file: {0}")]
    ConfigRead(std::io::Error),
    #[error("failed to parse configuration YAML: {0}")]
    ConfigParse(serde_yaml::Error),
    #[error("failed to write export file: {0}")]
    ExportWrite(std::io::Error),
}

impl RegistryError {
    pub fn severity(&self) -> Severity {
        match self {
            RegistryError::MissingInput(_) | RegistryError::EmptyExport => Severity::Warning,
            RegistryError::NotFound
            | RegistryError::UnknownClinic(_)
            | RegistryError::InvalidAge(_)
            | RegistryError::InvalidGender(_) => Severity::Error,
            RegistryError::InvalidConfig(_)
            | RegistryError::Database(_)
            | RegistryError::SchemaVersionMismatch { .. }
            | RegistryError::ConfigRead(_)
            | RegistryError::ConfigParse(_)
            | RegistryError::ExportWrite(_) => Severity::Internal,
        }
    }
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_facing_messages() {
        assert_eq!(
            RegistryError::MissingInput("All fields must be filled!").to_string(),
            "All fields must be filled!"
        );
        assert_eq!(
            RegistryError::NotFound.to_string(),
            "No record found for the given Patient ID."
        );
        assert_eq!(
            RegistryError::EmptyExport.to_string(),
            "No records found to download."
        );
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            RegistryError::MissingInput("x").severity(),
            Severity::Warning
        );
        assert_eq!(RegistryError::EmptyExport.severity(), Severity::Warning);
        assert_eq!(RegistryError::NotFound.severity(), Severity::Error);
        assert_eq!(
            RegistryError::InvalidAge("121".into()).severity(),
            Severity::Error
        );
        assert_eq!(
            RegistryError::SchemaVersionMismatch {
                found: 9,
                supported: 1
            }
            .severity(),
            Severity::Internal
        );
    }
}
