// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use grade_assign::CoreError;
use grade_assign_domain::DomainError;
use grade_assign_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The year is not configured well enough to run.
    ///
    /// The run was aborted before any placement.
    PreconditionFailed {
        /// A human-readable description of what is missing.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PreconditionFailed { message } => {
                write!(f, "Run cannot start: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidGrade { .. } => ApiError::InvalidInput {
            field: String::from("grade"),
            message: err.to_string(),
        },
        DomainError::InvalidSchoolYear(msg) => ApiError::InvalidInput {
            field: String::from("year"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::ConflictingTrack { teacher_id } => ApiError::DomainRuleViolation {
            rule: String::from("single_track"),
            message: format!(
                "Teacher {teacher_id} cannot be both a homeroom and a subject teacher"
            ),
        },
        DomainError::InvalidDutyDivision { .. } => ApiError::InvalidInput {
            field: String::from("role"),
            message: err.to_string(),
        },
        DomainError::DuplicateTeacher(teacher_id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_teacher_id"),
            message: format!("Teacher {teacher_id} appears more than once in the roster"),
        },
        DomainError::TeacherNotFound(teacher_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Teacher"),
            message: format!("Teacher {teacher_id} is not on the roster"),
        },
        DomainError::DuplicateChoice { teacher_id, grade } => ApiError::DomainRuleViolation {
            rule: String::from("distinct_choices"),
            message: format!("Teacher {teacher_id} ranked grade {grade} more than once"),
        },
        DomainError::StaffCountOutOfRange { ref field, .. } => ApiError::InvalidInput {
            field: field.clone(),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// Configuration problems become `PreconditionFailed` so the caller can
/// tell "fix the settings" apart from bad input.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::PreconditionFailed {
            message: other.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TeacherNotFound(teacher_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Teacher"),
            message: format!("Teacher {teacher_id} is not on the roster"),
        },
        PersistenceError::RunNotFound(year) => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment run"),
            message: format!("No assignment run has been made for {year}"),
        },
        PersistenceError::YearMismatch { expected, found } => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Record is for {found}, but the request is for {expected}"),
        },
        PersistenceError::SerializationError(msg) | PersistenceError::InitializationError(msg) => {
            ApiError::Internal { message: msg }
        }
    }
}
