// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_roster, create_test_store, create_test_teacher};
use crate::{
    ApiError, ListTeachersResponse, ReplaceRosterRequest, ReplaceRosterResponse, list_teachers,
    replace_roster,
};
use grade_assign_domain::Teacher;
use grade_assign_persistence::Persistence;

#[test]
fn test_replace_roster_reports_count() {
    let mut persistence: Persistence = Persistence::new_in_memory();
    let response: ReplaceRosterResponse =
        replace_roster(&mut persistence, create_test_roster()).unwrap();

    assert_eq!(response.teacher_count, 3);
    assert_eq!(response.message, "Roster replaced with 3 teachers");
}

#[test]
fn test_list_teachers_is_ordered_by_id() {
    let persistence: Persistence = create_test_store();
    let response: ListTeachersResponse = list_teachers(&persistence);
    let names: Vec<&str> = response.teachers.iter().map(|t| t.name.as_str()).collect();

    assert_eq!(names, vec!["Teacher A", "Teacher B", "Teacher C"]);
}

#[test]
fn test_empty_name_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory();
    let request: ReplaceRosterRequest = ReplaceRosterRequest {
        teachers: vec![create_test_teacher(1, "  ", 2010)],
    };

    let result: Result<ReplaceRosterResponse, ApiError> = replace_roster(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_conflicting_track_leaves_roster_untouched() {
    let mut persistence: Persistence = create_test_store();
    let mut both: Teacher = create_test_teacher(9, "Teacher Z", 2001);
    both.is_subject_teacher = true;

    let result: Result<ReplaceRosterResponse, ApiError> = replace_roster(
        &mut persistence,
        ReplaceRosterRequest {
            teachers: vec![create_test_teacher(8, "Teacher Y", 2003), both],
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "single_track"
    ));
    assert_eq!(list_teachers(&persistence).teachers.len(), 3);
}

#[test]
fn test_duplicate_teacher_id_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory();
    let request: ReplaceRosterRequest = ReplaceRosterRequest {
        teachers: vec![
            create_test_teacher(4, "Teacher D", 2010),
            create_test_teacher(4, "Teacher E", 2011),
        ],
    };

    let result: Result<ReplaceRosterResponse, ApiError> = replace_roster(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_teacher_id"
    ));
}
