// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_setting, create_test_settings, create_test_teacher, grade, test_year,
};
use crate::{AssignmentRun, CoreError, EngineConfig, Snapshot, run_assignment};
use grade_assign_domain::{DomainError, GradeSetting, SchoolYear, Teacher, TeacherId};

fn run(teachers: Vec<Teacher>, settings: Vec<GradeSetting>) -> Result<AssignmentRun, CoreError> {
    let snapshot: Snapshot = Snapshot::new(teachers, Vec::new(), settings);
    run_assignment(&snapshot, test_year(), &EngineConfig::default())
}

#[test]
fn test_missing_settings_abort_the_run() {
    let mut stale: GradeSetting = create_test_setting(1, 3, 0, 0);
    stale.year = SchoolYear::new(2025);

    let result: Result<AssignmentRun, CoreError> = run(vec![create_test_teacher(1, 2010)], vec![stale]);

    assert_eq!(
        result,
        Err(CoreError::MissingGradeSettings { year: test_year() })
    );
}

#[test]
fn test_zero_homerooms_abort_the_run() {
    let result: Result<AssignmentRun, CoreError> =
        run(vec![create_test_teacher(1, 2010)], create_test_settings([0; 6]));

    let err: CoreError = result.unwrap_err();
    assert_eq!(err, CoreError::NoHomeroomCapacity { year: test_year() });
    assert!(err.is_configuration());
}

#[test]
fn test_duplicate_grade_setting_aborts_the_run() {
    let settings: Vec<GradeSetting> = vec![
        create_test_setting(2, 1, 0, 0),
        create_test_setting(2, 3, 0, 0),
    ];
    let result: Result<AssignmentRun, CoreError> = run(vec![create_test_teacher(1, 2010)], settings);

    assert_eq!(
        result,
        Err(CoreError::DuplicateGradeSetting {
            year: test_year(),
            grade: grade(2)
        })
    );
}

#[test]
fn test_empty_roster_aborts_the_run() {
    let result: Result<AssignmentRun, CoreError> = run(Vec::new(), create_test_settings([1; 6]));
    assert_eq!(result, Err(CoreError::EmptyRoster));
}

#[test]
fn test_duplicate_teacher_is_a_domain_violation() {
    let result: Result<AssignmentRun, CoreError> = run(
        vec![create_test_teacher(7, 2010), create_test_teacher(7, 2010)],
        create_test_settings([1; 6]),
    );

    let err: CoreError = result.unwrap_err();
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::DuplicateTeacher(TeacherId::new(7)))
    );
    assert!(!err.is_configuration());
}

#[test]
fn test_partial_settings_leave_other_grades_closed() {
    let result: Result<AssignmentRun, CoreError> = run(
        vec![create_test_teacher(1, 2010), create_test_teacher(2, 2011)],
        vec![create_test_setting(4, 1, 0, 0)],
    );

    let run: AssignmentRun = result.unwrap();
    assert_eq!(run.placed_in(grade(4)), 1);
    assert_eq!(run.unplaced_teachers, vec![TeacherId::new(2)]);
}

#[test]
fn test_core_error_display() {
    let err: CoreError = CoreError::MissingGradeSettings { year: test_year() };
    assert_eq!(
        format!("{err}"),
        "No grade settings for 2026; configure grades before running"
    );

    let err: CoreError = CoreError::DuplicateGradeSetting {
        year: test_year(),
        grade: grade(3),
    };
    assert_eq!(format!("{err}"), "grade 3 is configured more than once for 2026");
}

#[test]
fn test_huge_stored_capacity_does_not_overflow() {
    let settings: Vec<GradeSetting> = vec![
        create_test_setting(1, u32::MAX, 0, 0),
        create_test_setting(2, 1, 0, 0),
    ];
    let run: AssignmentRun = run(vec![create_test_teacher(1, 2010)], settings).unwrap();

    assert!(run.is_complete());
    assert_eq!(run.unfilled_homerooms(), u32::MAX);
}
