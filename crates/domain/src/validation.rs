// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Preference, Role, Teacher, TeacherId};
use std::collections::HashSet;

/// Upper bound for any single staffing count (homerooms, classes, quotas).
pub const MAX_STAFF_COUNT: u32 = 999;

/// Validates that a teacher's basic field constraints are met.
///
/// This function checks single-record rules only. It does NOT check for
/// uniqueness (that requires the whole roster).
///
/// # Arguments
///
/// * `teacher` - The teacher to validate
///
/// # Errors
///
/// Returns an error if:
/// - The teacher's name is empty
/// - The teacher is flagged both as homeroom and as subject teacher
/// - The teacher heads duty division 0
pub fn validate_teacher_fields(teacher: &Teacher) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if teacher.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: homeroom and subject-teacher status are mutually exclusive
    if teacher.is_homeroom_current && teacher.is_subject_teacher {
        return Err(DomainError::ConflictingTrack {
            teacher_id: teacher.id,
        });
    }

    // Rule: duty divisions are numbered from 1
    if let Role::DutyHead { division: 0, .. } = teacher.role {
        return Err(DomainError::InvalidDutyDivision {
            teacher_id: teacher.id,
        });
    }

    Ok(())
}

/// Validates that a school year is a valid calendar year.
///
/// # Errors
///
/// Returns an error if the year is not a reasonable calendar year (1900-2200).
pub fn validate_school_year(year: u16) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::InvalidSchoolYear(format!(
            "School year must be between 1900 and 2200, got {year}"
        )));
    }
    Ok(())
}

/// Validates that teacher IDs are unique across a roster.
///
/// # Errors
///
/// Returns `DomainError::DuplicateTeacher` for the first repeated ID.
pub fn validate_roster_unique(teachers: &[Teacher]) -> Result<(), DomainError> {
    let mut seen: HashSet<TeacherId> = HashSet::new();
    for teacher in teachers {
        if !seen.insert(teacher.id) {
            return Err(DomainError::DuplicateTeacher(teacher.id));
        }
    }
    Ok(())
}

/// Validates a preference submission before it is stored.
///
/// Invalid grade numbers are rejected here even though the engine would
/// tolerate them, so that the form gets immediate feedback.
///
/// # Errors
///
/// Returns an error if:
/// - A slot holds a number outside `1..=6`
/// - The same grade appears in more than one slot
pub fn validate_preference(preference: &Preference) -> Result<(), DomainError> {
    let mut seen: HashSet<u8> = HashSet::new();
    for value in preference.slots().into_iter().flatten() {
        crate::types::Grade::new(value)?;
        if !seen.insert(value) {
            return Err(DomainError::DuplicateChoice {
                teacher_id: preference.teacher_id,
                grade: value,
            });
        }
    }
    Ok(())
}

/// Validates one staffing count from a settings form.
///
/// # Errors
///
/// Returns `DomainError::StaffCountOutOfRange` if `value` exceeds
/// [`MAX_STAFF_COUNT`].
pub fn validate_staff_count(field: &str, value: u32) -> Result<(), DomainError> {
    if value > MAX_STAFF_COUNT {
        return Err(DomainError::StaffCountOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
