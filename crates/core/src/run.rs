// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grade_assign_audit::PlacementLog;
use grade_assign_domain::{
    Assignment, AssignmentType, CapacityTracker, ExclusionReason, Grade, Placement, RuleReference,
    SchoolYear, TeacherId,
};
use serde::{Deserialize, Serialize};

/// A teacher removed from the run under Art. 13.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedTeacher {
    /// The teacher.
    pub teacher_id: TeacherId,
    /// Why they were removed.
    pub reason: ExclusionReason,
    /// Citation of the governing rule.
    pub rule_reference: String,
}

impl ExcludedTeacher {
    /// Creates an exclusion entry citing Art. 13.
    #[must_use]
    pub fn new(teacher_id: TeacherId, reason: ExclusionReason) -> Self {
        Self {
            teacher_id,
            reason,
            rule_reference: RuleReference::Exclusion.citation().to_string(),
        }
    }
}

/// A grade left with open homerooms after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledGrade {
    /// The grade.
    pub grade: Grade,
    /// Homerooms still open.
    pub open: u32,
}

/// Everything one assignment run produced.
///
/// Shortfalls in either direction are data here, not errors: unplaced
/// teachers, unfilled grades and unmet role requests are all listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRun {
    /// The school year.
    pub year: SchoolYear,
    /// One record per considered teacher, ordered by teacher ID.
    pub assignments: Vec<Assignment>,
    /// Considered teachers left without a placement.
    pub unplaced_teachers: Vec<TeacherId>,
    /// Grade-head requests the quota could not cover.
    pub unmet_grade_head_requests: Vec<TeacherId>,
    /// Duty-head requests the quota could not cover.
    pub unmet_duty_head_requests: Vec<TeacherId>,
    /// Teachers removed before placement.
    pub excluded_teachers: Vec<ExcludedTeacher>,
    /// Teachers left out for lack of a preference record.
    pub skipped_without_preference: Vec<TeacherId>,
    /// Grades still short of homeroom teachers.
    pub unfilled_grades: Vec<UnfilledGrade>,
    /// Capacity left when the run finished.
    pub remaining: CapacityTracker,
    /// Per-teacher trace of decisions, in decision order.
    pub logs: Vec<PlacementLog>,
}

impl AssignmentRun {
    /// Finds the record for a teacher.
    #[must_use]
    pub fn assignment_for(&self, teacher_id: TeacherId) -> Option<&Assignment> {
        self.assignments
            .binary_search_by_key(&teacher_id, |a| a.teacher_id)
            .ok()
            .map(|index| &self.assignments[index])
    }

    /// Number of records of each type, in reporting order, omitting zeros.
    #[must_use]
    pub fn counts_by_type(&self) -> Vec<(AssignmentType, usize)> {
        AssignmentType::ALL
            .into_iter()
            .map(|kind| {
                let count: usize = self
                    .assignments
                    .iter()
                    .filter(|a| a.assignment_type == kind)
                    .count();
                (kind, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Number of teachers placed in a homeroom or the subject pool.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.placement != Placement::Unplaced)
            .count()
    }

    /// Number of teachers placed in `grade`.
    #[must_use]
    pub fn placed_in(&self, grade: Grade) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.placement == Placement::Grade(grade))
            .count()
    }

    /// Total homerooms left open, saturating at `u32::MAX`.
    #[must_use]
    pub fn unfilled_homerooms(&self) -> u32 {
        self.unfilled_grades
            .iter()
            .fold(0, |total: u32, g| total.saturating_add(g.open))
    }

    /// Returns whether every considered teacher was placed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unplaced_teachers.is_empty()
    }

    /// One-line outcome used for logs and the audit trail.
    #[must_use]
    pub fn summary(&self) -> String {
        let breakdown: Vec<String> = self
            .counts_by_type()
            .into_iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect();

        format!(
            "{} placed, {} unplaced, {} excluded, {} homerooms unfilled ({})",
            self.placed_count(),
            self.unplaced_teachers.len(),
            self.excluded_teachers.len(),
            self.unfilled_homerooms(),
            breakdown.join(", ")
        )
    }
}
