// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentRun, EngineConfig, Snapshot, run_assignment};
use grade_assign_audit::{Actor, Cause};
use grade_assign_domain::{
    Assignment, Grade, GradeSetting, Preference, SchoolYear, Teacher, TeacherId,
};

pub fn test_year() -> SchoolYear {
    SchoolYear::new(2026)
}

pub fn grade(value: u8) -> Grade {
    Grade::new(value).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

/// A current homeroom teacher hired in `hire_year`.
pub fn create_test_teacher(id: i64, hire_year: u16) -> Teacher {
    let mut teacher: Teacher = Teacher::new(TeacherId::new(id), format!("Teacher {id}"));
    teacher.is_homeroom_current = true;
    teacher.hire_year = Some(hire_year);
    teacher
}

pub fn create_test_preference(id: i64, slots: [Option<u8>; 3]) -> Preference {
    let mut preference: Preference = Preference::new(TeacherId::new(id), test_year());
    preference.first_choice_grade = slots[0];
    preference.second_choice_grade = slots[1];
    preference.third_choice_grade = slots[2];
    preference
}

pub fn create_test_setting(g: u8, homerooms: u32, subject: u32, duty: u32) -> GradeSetting {
    GradeSetting {
        year: test_year(),
        grade: grade(g),
        class_count: homerooms,
        required_homerooms: homerooms,
        required_subject_teachers: subject,
        required_duty_heads: duty,
    }
}

/// One setting row per grade with the given homeroom counts.
pub fn create_test_settings(homerooms: [u32; 6]) -> Vec<GradeSetting> {
    (1..=6)
        .zip(homerooms)
        .map(|(g, count)| create_test_setting(g, count, 0, 0))
        .collect()
}

pub fn run_default(
    teachers: Vec<Teacher>,
    preferences: Vec<Preference>,
    settings: Vec<GradeSetting>,
) -> AssignmentRun {
    run_with(teachers, preferences, settings, &EngineConfig::default())
}

pub fn run_with(
    teachers: Vec<Teacher>,
    preferences: Vec<Preference>,
    settings: Vec<GradeSetting>,
    config: &EngineConfig,
) -> AssignmentRun {
    let snapshot: Snapshot = Snapshot::new(teachers, preferences, settings);
    run_assignment(&snapshot, test_year(), config).expect("run should succeed")
}

pub fn assignment(run: &AssignmentRun, id: i64) -> &Assignment {
    run.assignment_for(TeacherId::new(id))
        .expect("teacher should have a record")
}
