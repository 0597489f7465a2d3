// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, MAX_STAFF_COUNT, Preference, Role, SchoolYear, Teacher, TeacherId,
    validate_preference, validate_roster_unique, validate_school_year, validate_staff_count,
    validate_teacher_fields,
};

fn create_test_teacher(id: i64) -> Teacher {
    let mut teacher: Teacher = Teacher::new(TeacherId::new(id), String::from("Test Teacher"));
    teacher.is_homeroom_current = true;
    teacher
}

#[test]
fn test_validate_teacher_fields_accepts_valid_teacher() {
    let teacher: Teacher = create_test_teacher(1);
    assert!(validate_teacher_fields(&teacher).is_ok());
}

#[test]
fn test_validate_teacher_fields_rejects_blank_name() {
    let mut teacher: Teacher = create_test_teacher(1);
    teacher.name = String::from("   ");
    assert!(matches!(
        validate_teacher_fields(&teacher),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_teacher_fields_rejects_both_tracks() {
    let mut teacher: Teacher = create_test_teacher(8);
    teacher.is_subject_teacher = true;
    assert_eq!(
        validate_teacher_fields(&teacher),
        Err(DomainError::ConflictingTrack {
            teacher_id: TeacherId::new(8)
        })
    );
}

#[test]
fn test_validate_school_year_range() {
    assert!(validate_school_year(2026).is_ok());
    assert!(validate_school_year(1899).is_err());
    assert!(validate_school_year(2201).is_err());
}

#[test]
fn test_validate_roster_unique() {
    let roster: Vec<Teacher> = vec![create_test_teacher(1), create_test_teacher(2)];
    assert!(validate_roster_unique(&roster).is_ok());

    let roster: Vec<Teacher> = vec![create_test_teacher(1), create_test_teacher(1)];
    assert_eq!(
        validate_roster_unique(&roster),
        Err(DomainError::DuplicateTeacher(TeacherId::new(1)))
    );
}

#[test]
fn test_validate_preference_rejects_invalid_grade() {
    let mut preference: Preference = Preference::new(TeacherId::new(1), SchoolYear::new(2026));
    preference.first_choice_grade = Some(7);
    assert_eq!(
        validate_preference(&preference),
        Err(DomainError::InvalidGrade { value: 7 })
    );
}

#[test]
fn test_validate_preference_rejects_duplicate_grade() {
    let mut preference: Preference = Preference::new(TeacherId::new(1), SchoolYear::new(2026));
    preference.first_choice_grade = Some(2);
    preference.third_choice_grade = Some(2);
    assert_eq!(
        validate_preference(&preference),
        Err(DomainError::DuplicateChoice {
            teacher_id: TeacherId::new(1),
            grade: 2
        })
    );
}

#[test]
fn test_validate_preference_accepts_subject_slot() {
    let mut preference: Preference = Preference::new(TeacherId::new(1), SchoolYear::new(2026));
    preference.first_choice_grade = Some(5);
    preference.wants_subject_teacher = true;
    assert!(validate_preference(&preference).is_ok());
}

#[test]
fn test_validate_staff_count_bounds() {
    assert!(validate_staff_count("required_homerooms", 0).is_ok());
    assert!(validate_staff_count("required_homerooms", MAX_STAFF_COUNT).is_ok());

    let err: DomainError =
        validate_staff_count("required_homerooms", MAX_STAFF_COUNT + 1).unwrap_err();
    assert_eq!(
        err,
        DomainError::StaffCountOutOfRange {
            field: String::from("required_homerooms"),
            value: 1000
        }
    );
    assert_eq!(
        format!("{err}"),
        "Invalid required_homerooms: 1000. Must be at most 999"
    );
}

#[test]
fn test_validate_teacher_fields_rejects_division_zero() {
    let mut teacher: Teacher = create_test_teacher(9);
    teacher.role = Role::DutyHead {
        division: 0,
        detail: String::new(),
    };
    assert_eq!(
        validate_teacher_fields(&teacher),
        Err(DomainError::InvalidDutyDivision {
            teacher_id: TeacherId::new(9)
        })
    );

    teacher.role = Role::DutyHead {
        division: 4,
        detail: String::from("facilities"),
    };
    assert!(validate_teacher_fields(&teacher).is_ok());
}
