// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The school's assignment regulation, as typed data.
//!
//! Every placement the engine makes cites one of the articles below in its
//! `rule_reference`. Circumstances that the regulation treats specially are
//! recorded on the teacher as a [`SpecialCondition`] rather than as free text.
//!
//! ## Articles
//!
//! - Art. 11: ranked grade preferences are honoured in rank order
//! - Art. 12(1): grade rotation; leftover teachers are adjusted into open grades
//! - Art. 12(2): current duty heads and grade heads are placed first
//! - Art. 12(4): special circumstances are placed before everyone else
//! - Art. 13: teachers on leave or otherwise unavailable are excluded

use serde::{Deserialize, Serialize};

/// Reasons a teacher is removed from the run entirely (Art. 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// On leave of absence.
    LeaveOfAbsence,
    /// On sick leave of 30 days or more.
    ExtendedSickLeave,
    /// Seconded to another institution.
    Secondment,
    /// On long-term training.
    Training,
    /// On prenatal or maternity leave.
    Maternity,
}

impl ExclusionReason {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeaveOfAbsence => "leave of absence",
            Self::ExtendedSickLeave => "sick leave of 30 days or more",
            Self::Secondment => "secondment",
            Self::Training => "long-term training",
            Self::Maternity => "maternity leave",
        }
    }
}

/// Circumstances that entitle a teacher to placement ahead of everyone else
/// (Art. 12(4)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityReason {
    /// Senior teacher close to retirement.
    SeniorTeacher,
    /// Requires ongoing medical care.
    MedicalCare,
    /// Documented health grounds.
    Health,
    /// Leaving for or returning from military service.
    MilitaryService,
    /// Expecting a child during the year.
    ExpectingChild,
}

impl PriorityReason {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SeniorTeacher => "senior teacher",
            Self::MedicalCare => "ongoing medical care",
            Self::Health => "health grounds",
            Self::MilitaryService => "military service",
            Self::ExpectingChild => "expecting a child",
        }
    }
}

/// A circumstance the regulation treats explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SpecialCondition {
    /// Removed from the run.
    Excluded(ExclusionReason),
    /// Placed before general preference placement.
    Priority(PriorityReason),
}

/// Citations of the regulation articles a placement can rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleReference {
    /// Art. 11: ranked preference honoured.
    RankedPreference,
    /// Art. 12(1): rotation and overflow adjustment.
    RotationAdjustment,
    /// Art. 12(2): role holder priority.
    RolePriority,
    /// Art. 12(4): special circumstance priority.
    SpecialPriority,
    /// Art. 13: exclusion from placement.
    Exclusion,
    /// Subject-teacher quota from the grade settings.
    SubjectTeacherQuota,
}

impl RuleReference {
    /// The citation text recorded on an assignment.
    #[must_use]
    pub const fn citation(self) -> &'static str {
        match self {
            Self::RankedPreference => "Art. 11 (preferred grade honoured)",
            Self::RotationAdjustment => "Art. 12(1) (grade rotation) + overflow adjustment",
            Self::RolePriority => "Art. 12(2) (role holder priority)",
            Self::SpecialPriority => "Art. 12(4) (special circumstance priority)",
            Self::Exclusion => "Art. 13 (excluded from assignment)",
            Self::SubjectTeacherQuota => "Subject-teacher quota (grade settings)",
        }
    }
}

impl std::fmt::Display for RuleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.citation())
    }
}
