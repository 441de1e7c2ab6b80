//! Operator-facing outcome messages.
//!
//! Every action ends in exactly one [`Notice`]. Registry errors are mapped by severity:
//! warnings and user errors keep their own wording, internal failures are logged in full and
//! replaced by a generic message.

use mtrh_core::{RegistryError, Severity};

pub const MSG_INTERNAL_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl From<&RegistryError> for Notice {
    fn from(err: &RegistryError) -> Self {
        match err.severity() {
            Severity::Warning => Notice::warning(err.to_string()),
            Severity::Error => Notice::error(err.to_string()),
            Severity::Internal => {
                tracing::error!("registry failure: {err:?}");
                Notice::error(MSG_INTERNAL_FAILURE)
            }
        }
    }
}

impl From<RegistryError> for Notice {
    fn from(err: RegistryError) -> Self {
        Notice::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtrh_core::MSG_PATIENT_ID_REQUIRED;

    #[test]
    fn test_missing_input_becomes_warning_with_same_wording() {
        let notice = Notice::from(RegistryError::MissingInput(MSG_PATIENT_ID_REQUIRED));
        assert_eq!(notice, Notice::warning("Please enter a Patient ID."));
    }

    #[test]
    fn test_not_found_becomes_error() {
        let notice = Notice::from(RegistryError::NotFound);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "No record found for the given Patient ID.");
    }

    #[test]
    fn test_internal_failures_are_not_leaked() {
        let notice = Notice::from(RegistryError::SchemaVersionMismatch {
            found: 3,
            supported: 1,
        });
        assert_eq!(notice, Notice::error(MSG_INTERNAL_FAILURE));
        assert!(!notice.is_success());
    }
}
