//! CSV export of the full patient table.
//!
//! Output is UTF-8 with `\n` line endings and the fixed nine-column header. A field is quoted
//! only when it contains a comma, a double quote, or a line break, and embedded quotes are
//! doubled.

use crate::constants::{EXPORT_CONTENT_TYPE, EXPORT_FILENAME, EXPORT_HEADER};
use crate::patient::PatientRecord;
use crate::{RegistryError, RegistryResult};
use std::path::Path;

const DELIMITER: char = ',';

/// A rendered export ready to be offered as a download or written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content_type: &'static str,
    /// Number of data rows (excluding the header).
    pub rows: usize,
    pub body: String,
}

impl CsvExport {
    /// Render `records` into an export. Callers are expected to have rejected an empty table.
    pub fn from_records(records: &[PatientRecord]) -> Self {
        Self {
            file_name: EXPORT_FILENAME,
            content_type: EXPORT_CONTENT_TYPE,
            rows: records.len(),
            body: render_csv(records),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_bytes()
    }

    /// Write the payload to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> RegistryResult<()> {
        std::fs::write(path, self.body.as_bytes()).map_err(RegistryError::ExportWrite)
    }
}

/// Render the header and one line per record.
pub fn render_csv(records: &[PatientRecord]) -> String {
    let mut output = String::new();
    push_line(&mut output, EXPORT_HEADER.iter().copied());

    for record in records {
        let id = record.id.to_string();
        let age = record.age.to_string();
        push_line(
            &mut output,
            [
                id.as_str(),
                record.creation_date.as_str(),
                record.diagnosis_date.as_str(),
                record.diagnosis.as_str(),
                record.healthcare_service_unit.as_str(),
                record.patient_id.as_str(),
                record.mobile_number.as_str(),
                record.gender.as_str(),
                age.as_str(),
            ],
        );
    }

    output
}

fn push_line<'a>(output: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            output.push(DELIMITER);
        }
        output.push_str(&escape_field(field));
    }
    output.push('\n');
}

fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}
