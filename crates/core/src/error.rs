// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grade_assign_domain::{DomainError, Grade, SchoolYear};

/// Errors that abort an assignment run before any placement is made.
///
/// Capacity shortfalls are not errors; they are reported in the run result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No grade settings exist for the year.
    MissingGradeSettings {
        /// The year that was requested.
        year: SchoolYear,
    },
    /// Grade settings exist but require no homerooms at all.
    NoHomeroomCapacity {
        /// The year that was requested.
        year: SchoolYear,
    },
    /// The same grade is configured more than once for the year.
    DuplicateGradeSetting {
        /// The year that was requested.
        year: SchoolYear,
        /// The repeated grade.
        grade: Grade,
    },
    /// The roster has no teachers.
    EmptyRoster,
}

impl CoreError {
    /// Returns whether this error is a configuration precondition failure.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::DomainViolation(_))
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::MissingGradeSettings { year } => {
                write!(f, "No grade settings for {year}; configure grades before running")
            }
            Self::NoHomeroomCapacity { year } => {
                write!(f, "Grade settings for {year} require zero homerooms")
            }
            Self::DuplicateGradeSetting { year, grade } => {
                write!(f, "{grade} is configured more than once for {year}")
            }
            Self::EmptyRoster => write!(f, "The roster has no teachers"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
