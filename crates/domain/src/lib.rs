// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capacity;
mod eligibility;
mod error;
mod preference;
mod rules;
mod seniority;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use capacity::{CapacityTracker, split_evenly};
pub use eligibility::{EligibilityRules, Ineligibility, MAX_HOMEROOMS_PER_GRADE, is_eligible};
pub use preference::{
    Rank, RankedChoice, RejectedChoice, ResolvedPreference, decode_choices, ranked_choices,
};
pub use rules::{ExclusionReason, PriorityReason, RuleReference, SpecialCondition};
pub use seniority::{
    ProcessingPosition, SeniorityInputs, compare_seniority, compute_processing_order,
    sort_by_seniority,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Assignment, AssignmentType, Choice, GRADE_COUNT, Grade, GradeHistoryEntry, GradeSetting,
    Placement, Preference, Role, SchoolYear, Teacher, TeacherId, Track,
};
pub use validation::{
    MAX_STAFF_COUNT, validate_preference, validate_roster_unique, validate_school_year,
    validate_staff_count, validate_teacher_fields,
};
