// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod run_tests;

use grade_assign_audit::{Actor, Cause};
use grade_assign_domain::{Grade, GradeSetting, Preference, SchoolYear, Teacher, TeacherId};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn test_year() -> SchoolYear {
    SchoolYear::new(2026)
}

pub fn create_test_teacher(id: i64, hire_year: u16) -> Teacher {
    let mut teacher: Teacher = Teacher::new(TeacherId::new(id), format!("Teacher {id}"));
    teacher.is_homeroom_current = true;
    teacher.hire_year = Some(hire_year);
    teacher
}

pub fn create_test_preference(id: i64, first: u8) -> Preference {
    let mut preference: Preference = Preference::new(TeacherId::new(id), test_year());
    preference.first_choice_grade = Some(first);
    preference
}

pub fn create_test_setting(grade: u8, homerooms: u32) -> GradeSetting {
    GradeSetting {
        year: test_year(),
        grade: Grade::new(grade).expect("valid grade"),
        class_count: homerooms,
        required_homerooms: homerooms,
        required_subject_teachers: 0,
        required_duty_heads: 0,
    }
}
