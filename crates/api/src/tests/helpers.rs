// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use grade_assign_domain::{Teacher, TeacherId};
use grade_assign_persistence::Persistence;

use crate::{
    GradeSettingInput, ReplaceRosterRequest, ReplaceSettingsRequest, SubmitPreferenceRequest,
    replace_roster, replace_settings, submit_preference,
};

pub const TEST_YEAR: u16 = 2026;

pub fn create_test_teacher(id: i64, name: &str, hire_year: u16) -> Teacher {
    let mut teacher: Teacher = Teacher::new(TeacherId::new(id), String::from(name));
    teacher.is_homeroom_current = true;
    teacher.hire_year = Some(hire_year);
    teacher
}

/// Three homeroom teachers: A (id 1, hired 2010), B (id 2, hired 2015)
/// and C (id 3, hired 2012).
pub fn create_test_roster() -> ReplaceRosterRequest {
    ReplaceRosterRequest {
        teachers: vec![
            create_test_teacher(1, "Teacher A", 2010),
            create_test_teacher(2, "Teacher B", 2015),
            create_test_teacher(3, "Teacher C", 2012),
        ],
    }
}

pub fn create_test_settings_request(homerooms: &[(u8, u32)]) -> ReplaceSettingsRequest {
    ReplaceSettingsRequest {
        grades: homerooms
            .iter()
            .map(|&(grade, required_homerooms)| GradeSettingInput {
                grade,
                class_count: required_homerooms,
                required_homerooms,
            })
            .collect(),
        total_subject_teachers: 0,
        total_duty_heads: 0,
    }
}

pub fn create_test_choices(
    first: Option<u8>,
    second: Option<u8>,
    third: Option<u8>,
) -> SubmitPreferenceRequest {
    SubmitPreferenceRequest {
        first_choice_grade: first,
        second_choice_grade: second,
        third_choice_grade: third,
        ..SubmitPreferenceRequest::default()
    }
}

pub fn create_test_store() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory();
    replace_roster(&mut persistence, create_test_roster()).unwrap();
    persistence
}

/// Grade 3 has two homerooms and grade 5 one. All three teachers rank
/// grade 3 first; B ranks grade 5 second.
pub fn create_contested_store() -> Persistence {
    let mut persistence: Persistence = create_test_store();
    replace_settings(
        &mut persistence,
        TEST_YEAR,
        &create_test_settings_request(&[(3, 2), (5, 1)]),
    )
    .unwrap();
    submit_preference(&mut persistence, TEST_YEAR, 1, create_test_choices(Some(3), None, None))
        .unwrap();
    submit_preference(&mut persistence, TEST_YEAR, 2, create_test_choices(Some(3), Some(5), None))
        .unwrap();
    submit_preference(&mut persistence, TEST_YEAR, 3, create_test_choices(Some(3), None, None))
        .unwrap();
    persistence
}
