// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::TeacherId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Grade number is outside the range the school runs.
    InvalidGrade {
        /// The rejected value.
        value: u8,
    },
    /// School year is not a plausible calendar year.
    InvalidSchoolYear(String),
    /// Teacher name is empty or invalid.
    InvalidName(String),
    /// A teacher is flagged both as a current homeroom teacher and as a
    /// subject teacher.
    ConflictingTrack {
        /// The offending teacher.
        teacher_id: TeacherId,
    },
    /// A duty head's division rank is 0.
    InvalidDutyDivision {
        /// The offending teacher.
        teacher_id: TeacherId,
    },
    /// Two teachers share the same identifier.
    DuplicateTeacher(TeacherId),
    /// Teacher does not exist in the roster.
    TeacherNotFound(TeacherId),
    /// A preference names the same grade in more than one slot.
    DuplicateChoice {
        /// The teacher who submitted the preference.
        teacher_id: TeacherId,
        /// The repeated grade.
        grade: u8,
    },
    /// A staffing count is above what any school could need.
    StaffCountOutOfRange {
        /// Which count was rejected.
        field: String,
        /// The rejected value.
        value: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGrade { value } => {
                write!(f, "Invalid grade: {value}. Must be between 1 and 6")
            }
            Self::InvalidSchoolYear(msg) => write!(f, "Invalid school year: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::ConflictingTrack { teacher_id } => {
                write!(
                    f,
                    "Teacher {teacher_id} cannot be both a homeroom teacher and a subject teacher"
                )
            }
            Self::InvalidDutyDivision { teacher_id } => {
                write!(f, "Teacher {teacher_id} heads duty division 0; divisions start at 1")
            }
            Self::DuplicateTeacher(id) => write!(f, "Teacher {id} already exists"),
            Self::TeacherNotFound(id) => write!(f, "Teacher {id} not found"),
            Self::DuplicateChoice { teacher_id, grade } => {
                write!(
                    f,
                    "Teacher {teacher_id} listed grade {grade} more than once in their preference"
                )
            }
            Self::StaffCountOutOfRange { field, value } => {
                write!(
                    f,
                    "Invalid {field}: {value}. Must be at most {}",
                    crate::validation::MAX_STAFF_COUNT
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
