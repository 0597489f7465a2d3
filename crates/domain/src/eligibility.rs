// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hard eligibility rules for homeroom placement.
//!
//! Eligibility is a pure function of the teacher record, their preference
//! and a candidate grade. An ineligible grade is removed from consideration
//! altogether: the engine never falls back to it, not even for overflow.
//!
//! ## Rules
//!
//! - A teacher who has homeroomed a grade twice at this school may not take
//!   it a third time.
//! - With rotation enforced, a teacher does not keep their current grade,
//!   except grades 1 and 6 when they ranked that grade themselves.
//! - Subject-teacher choices are never subject to grade eligibility.

use crate::types::{Choice, Grade, Preference, Teacher};
use serde::{Deserialize, Serialize};

/// Maximum number of times a teacher may homeroom the same grade here.
pub const MAX_HOMEROOMS_PER_GRADE: usize = 2;

/// Returns whether the repeat limit still allows `teacher` to take `grade`.
#[must_use]
pub fn is_eligible(teacher: &Teacher, grade: Grade) -> bool {
    teacher.times_homeroomed(grade) < MAX_HOMEROOMS_PER_GRADE
}

/// Why a grade was ruled out for a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// The teacher already homeroomed the grade the maximum number of times.
    RepeatLimit {
        /// Times already served.
        times: usize,
    },
    /// The grade is the teacher's current grade and rotation is enforced.
    Rotation,
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepeatLimit { times } => {
                write!(f, "already homeroomed {times} times at this school")
            }
            Self::Rotation => write!(f, "current grade rotates out"),
        }
    }
}

/// The configurable set of eligibility rules for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EligibilityRules {
    /// Rule out each teacher's current grade (Art. 12(1)).
    #[serde(default)]
    pub enforce_rotation: bool,
}

impl EligibilityRules {
    /// Creates a rule set.
    #[must_use]
    pub const fn new(enforce_rotation: bool) -> Self {
        Self { enforce_rotation }
    }

    /// Checks whether `teacher` may homeroom `grade`.
    ///
    /// # Errors
    ///
    /// Returns the first rule that rules the grade out.
    pub fn check(
        &self,
        teacher: &Teacher,
        preference: Option<&Preference>,
        grade: Grade,
    ) -> Result<(), Ineligibility> {
        if !is_eligible(teacher, grade) {
            return Err(Ineligibility::RepeatLimit {
                times: teacher.times_homeroomed(grade),
            });
        }

        if self.enforce_rotation && teacher.current_grade == Some(grade) {
            let bookend: bool = matches!(grade.value(), 1 | 6);
            let ranked_it: bool = preference.is_some_and(|p| {
                p.slots()
                    .iter()
                    .any(|slot| *slot == Some(grade.value()))
            });
            if !(bookend && ranked_it) {
                return Err(Ineligibility::Rotation);
            }
        }

        Ok(())
    }

    /// Returns whether `choice` is open to `teacher`.
    #[must_use]
    pub fn permits(&self, teacher: &Teacher, preference: Option<&Preference>, choice: Choice) -> bool {
        match choice {
            Choice::SubjectTeacher => true,
            Choice::Grade(grade) => self.check(teacher, preference, grade).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{GradeHistoryEntry, SchoolYear, TeacherId};

    fn grade(value: u8) -> Grade {
        Grade::new(value).unwrap()
    }

    fn create_test_teacher(history: &[(u16, u8)]) -> Teacher {
        let mut teacher: Teacher = Teacher::new(TeacherId::new(1), String::from("Kim"));
        teacher.is_homeroom_current = true;
        teacher.grade_history = history
            .iter()
            .map(|(year, g)| GradeHistoryEntry::new(*year, *g))
            .collect();
        teacher
    }

    #[test]
    fn test_fresh_teacher_is_eligible_everywhere() {
        let teacher: Teacher = create_test_teacher(&[]);
        assert!(Grade::all().all(|g| is_eligible(&teacher, g)));
    }

    #[test]
    fn test_one_previous_term_is_still_eligible() {
        let teacher: Teacher = create_test_teacher(&[(2022, 4)]);
        assert!(is_eligible(&teacher, grade(4)));
    }

    #[test]
    fn test_two_previous_terms_block_the_grade() {
        let teacher: Teacher = create_test_teacher(&[(2021, 4), (2023, 4)]);
        assert!(!is_eligible(&teacher, grade(4)));
        assert!(is_eligible(&teacher, grade(3)));
    }

    #[test]
    fn test_malformed_history_entries_do_not_count() {
        let teacher: Teacher = create_test_teacher(&[(2021, 9), (2022, 9), (2023, 0)]);
        assert!(Grade::all().all(|g| is_eligible(&teacher, g)));
        assert!(teacher.has_malformed_history());
    }

    #[test]
    fn test_check_reports_repeat_limit() {
        let teacher: Teacher = create_test_teacher(&[(2019, 2), (2020, 2), (2021, 2)]);
        let rules: EligibilityRules = EligibilityRules::default();

        assert_eq!(
            rules.check(&teacher, None, grade(2)),
            Err(Ineligibility::RepeatLimit { times: 3 })
        );
    }

    #[test]
    fn test_subject_choice_bypasses_grade_rules() {
        let teacher: Teacher = create_test_teacher(&[(2021, 4), (2023, 4)]);
        let rules: EligibilityRules = EligibilityRules::new(true);
        assert!(rules.permits(&teacher, None, Choice::SubjectTeacher));
        assert!(!rules.permits(&teacher, None, Choice::Grade(grade(4))));
    }

    #[test]
    fn test_rotation_is_off_by_default() {
        let mut teacher: Teacher = create_test_teacher(&[]);
        teacher.current_grade = Some(grade(3));
        let rules: EligibilityRules = EligibilityRules::default();
        assert!(rules.check(&teacher, None, grade(3)).is_ok());
    }

    #[test]
    fn test_rotation_rules_out_current_grade() {
        let mut teacher: Teacher = create_test_teacher(&[]);
        teacher.current_grade = Some(grade(3));
        let rules: EligibilityRules = EligibilityRules::new(true);

        assert_eq!(
            rules.check(&teacher, None, grade(3)),
            Err(Ineligibility::Rotation)
        );
        assert!(rules.check(&teacher, None, grade(4)).is_ok());
    }

    #[test]
    fn test_rotation_relaxed_for_first_and_sixth_grade_when_requested() {
        let mut teacher: Teacher = create_test_teacher(&[]);
        teacher.current_grade = Some(grade(6));
        let mut preference: Preference = Preference::new(teacher.id, SchoolYear::new(2026));
        preference.second_choice_grade = Some(6);
        let rules: EligibilityRules = EligibilityRules::new(true);

        assert!(rules.check(&teacher, Some(&preference), grade(6)).is_ok());
        assert_eq!(
            rules.check(&teacher, None, grade(6)),
            Err(Ineligibility::Rotation)
        );
    }

    #[test]
    fn test_rotation_not_relaxed_for_middle_grades() {
        let mut teacher: Teacher = create_test_teacher(&[]);
        teacher.current_grade = Some(grade(4));
        let mut preference: Preference = Preference::new(teacher.id, SchoolYear::new(2026));
        preference.first_choice_grade = Some(4);
        let rules: EligibilityRules = EligibilityRules::new(true);

        assert_eq!(
            rules.check(&teacher, Some(&preference), grade(4)),
            Err(Ineligibility::Rotation)
        );
    }
}
