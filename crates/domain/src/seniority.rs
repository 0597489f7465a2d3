// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Processing order based on strict seniority rules.
//!
//! Placement is sequential and order-dependent: a teacher processed earlier
//! can take the last open slot in a grade. The order is therefore an
//! explicit comparator, never the incidental order of the roster.
//!
//! ## Seniority Ordering Rules
//!
//! Teachers are ordered by:
//! 1. Hire year (earliest wins)
//! 2. Tie Breaker 1: School join year (earliest wins, i.e. longest here)
//! 3. Tie Breaker 2: Teacher ID (lowest wins)
//!
//! A missing year sorts after every recorded year.
//!
//! ## Invariants
//!
//! - There must NEVER be a tie after applying all rules
//! - Two roster entries with the same ID are a domain violation

use crate::error::DomainError;
use crate::types::{Teacher, TeacherId};
use std::cmp::Ordering;

/// Represents a teacher's position in the processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingPosition {
    /// The teacher's canonical ID.
    pub teacher_id: TeacherId,
    /// The 1-based position (1 = processed first).
    pub position: usize,
    /// Seniority inputs used for ordering (for transparency).
    pub seniority_inputs: SeniorityInputs,
}

/// Seniority inputs used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeniorityInputs {
    /// Year first hired.
    pub hire_year: Option<u16>,
    /// Year joined this school.
    pub school_join_year: Option<u16>,
}

impl SeniorityInputs {
    /// Creates seniority inputs from a teacher.
    #[must_use]
    pub const fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            hire_year: teacher.hire_year,
            school_join_year: teacher.school_join_year,
        }
    }
}

/// Compares two teachers by seniority rules.
///
/// Returns:
/// - `Ordering::Less` if `a` is more senior (processed first)
/// - `Ordering::Greater` if `b` is more senior
/// - `Ordering::Equal` only for the same teacher ID
#[must_use]
pub fn compare_seniority(a: &Teacher, b: &Teacher) -> Ordering {
    earliest_first(a.hire_year, b.hire_year)
        .then_with(|| earliest_first(a.school_join_year, b.school_join_year))
        .then_with(|| a.id.cmp(&b.id))
}

fn earliest_first(a: Option<u16>, b: Option<u16>) -> Ordering {
    match (a, b) {
        (Some(year_a), Some(year_b)) => year_a.cmp(&year_b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts borrowed teachers into processing order.
#[must_use]
pub fn sort_by_seniority<'a>(teachers: impl IntoIterator<Item = &'a Teacher>) -> Vec<&'a Teacher> {
    let mut sorted: Vec<&Teacher> = teachers.into_iter().collect();
    sorted.sort_by(|a, b| compare_seniority(a, b));
    sorted
}

/// Computes the processing order for a roster.
///
/// # Errors
///
/// Returns `DomainError::DuplicateTeacher` if two entries share an ID,
/// since the order would then contain an unresolved tie.
pub fn compute_processing_order(teachers: &[Teacher]) -> Result<Vec<ProcessingPosition>, DomainError> {
    let sorted: Vec<&Teacher> = sort_by_seniority(teachers);

    for pair in sorted.windows(2) {
        if compare_seniority(pair[0], pair[1]) == Ordering::Equal {
            return Err(DomainError::DuplicateTeacher(pair[0].id));
        }
    }

    Ok(sorted
        .iter()
        .enumerate()
        .map(|(index, teacher)| ProcessingPosition {
            teacher_id: teacher.id,
            position: index + 1,
            seniority_inputs: SeniorityInputs::from_teacher(teacher),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn create_test_teacher(id: i64, hire_year: Option<u16>, join_year: Option<u16>) -> Teacher {
        let mut teacher: Teacher = Teacher::new(TeacherId::new(id), format!("Teacher {id}"));
        teacher.is_homeroom_current = true;
        teacher.hire_year = hire_year;
        teacher.school_join_year = join_year;
        teacher
    }

    fn ids(positions: &[ProcessingPosition]) -> Vec<i64> {
        positions.iter().map(|p| p.teacher_id.value()).collect()
    }

    #[allow(clippy::expect_used)]
    #[test]
    fn test_order_by_hire_year() {
        let teachers: Vec<Teacher> = vec![
            create_test_teacher(1, Some(2015), Some(2016)),
            create_test_teacher(2, Some(2010), Some(2020)),
            create_test_teacher(3, Some(2012), Some(2012)),
        ];

        let result: Vec<ProcessingPosition> =
            compute_processing_order(&teachers).expect("should succeed");
        assert_eq!(ids(&result), vec![2, 3, 1]);
        assert_eq!(result[0].position, 1);
        assert_eq!(result[2].position, 3);
    }

    #[allow(clippy::expect_used)]
    #[test]
    fn test_tie_broken_by_school_join_year() {
        let teachers: Vec<Teacher> = vec![
            create_test_teacher(1, Some(2010), Some(2018)),
            create_test_teacher(2, Some(2010), Some(2014)),
        ];

        let result: Vec<ProcessingPosition> =
            compute_processing_order(&teachers).expect("should succeed");
        assert_eq!(ids(&result), vec![2, 1]); // Longer at this school
    }

    #[allow(clippy::expect_used)]
    #[test]
    fn test_tie_broken_by_teacher_id() {
        let teachers: Vec<Teacher> = vec![
            create_test_teacher(9, Some(2010), Some(2014)),
            create_test_teacher(4, Some(2010), Some(2014)),
        ];

        let result: Vec<ProcessingPosition> =
            compute_processing_order(&teachers).expect("should succeed");
        assert_eq!(ids(&result), vec![4, 9]);
    }

    #[allow(clippy::expect_used)]
    #[test]
    fn test_missing_years_sort_last() {
        let teachers: Vec<Teacher> = vec![
            create_test_teacher(1, None, Some(2001)),
            create_test_teacher(2, Some(2020), None),
            create_test_teacher(3, Some(2020), Some(2021)),
        ];

        let result: Vec<ProcessingPosition> =
            compute_processing_order(&teachers).expect("should succeed");
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let teachers: Vec<Teacher> = vec![
            create_test_teacher(5, Some(2010), Some(2014)),
            create_test_teacher(5, Some(2010), Some(2014)),
        ];

        assert_eq!(
            compute_processing_order(&teachers),
            Err(DomainError::DuplicateTeacher(TeacherId::new(5)))
        );
    }

    #[test]
    fn test_order_is_independent_of_input_order() {
        let forward: Vec<Teacher> = vec![
            create_test_teacher(1, Some(2011), None),
            create_test_teacher(2, Some(2009), None),
            create_test_teacher(3, Some(2011), Some(2011)),
        ];
        let mut reversed: Vec<Teacher> = forward.clone();
        reversed.reverse();

        assert_eq!(
            compute_processing_order(&forward),
            compute_processing_order(&reversed)
        );
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(compute_processing_order(&[]), Ok(Vec::new()));
    }
}
