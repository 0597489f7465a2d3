// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of assignment results.

use crate::error::ApiError;
use crate::request_response::AssignmentInfo;
use thiserror::Error;

/// Column headers of the export, in order.
pub const EXPORT_HEADERS: [&str; 6] = [
    "teacher_id",
    "teacher_name",
    "assigned_grade",
    "assignment_type",
    "rule_reference",
    "description",
];

/// Errors raised while rendering the export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A record could not be written.
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
    /// The writer could not hand back its buffer.
    #[error("Failed to flush CSV output: {0}")]
    Flush(String),
    /// The rendered bytes were not UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Renders assignment rows as CSV with a header line.
///
/// Subject teachers and unplaced teachers have an empty `assigned_grade`.
/// Fields containing commas or quotes are quoted.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_assignments_csv(rows: &[AssignmentInfo]) -> Result<String, ExportError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for row in rows {
        let assigned_grade: String = row.assigned_grade.map(|g| g.to_string()).unwrap_or_default();
        writer.write_record([
            row.teacher_id.to_string().as_str(),
            row.teacher_name.as_str(),
            assigned_grade.as_str(),
            row.assignment_type.as_str(),
            row.rule_reference.as_deref().unwrap_or(""),
            row.description.as_str(),
        ])?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
