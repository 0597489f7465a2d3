// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grade_assign_domain::{SchoolYear, TeacherId};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The referenced teacher is not on the roster.
    TeacherNotFound(TeacherId),
    /// No assignment run has been stored for the year.
    RunNotFound(SchoolYear),
    /// A record belongs to a different year than the one being written.
    YearMismatch {
        /// The year being written.
        expected: SchoolYear,
        /// The year the record carries.
        found: SchoolYear,
    },
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error (e.g., unreadable seed file).
    InitializationError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeacherNotFound(id) => write!(f, "Teacher not found: {id}"),
            Self::RunNotFound(year) => write!(f, "No assignment run stored for {year}"),
            Self::YearMismatch { expected, found } => {
                write!(f, "Record is for {found}, expected {expected}")
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
