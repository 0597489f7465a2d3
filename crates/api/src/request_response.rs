// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes for the API boundary.

use grade_assign::{ExcludedTeacher, UnfilledGrade};
use grade_assign_audit::{AuditEvent, PlacementLog};
use grade_assign_domain::{AssignmentType, GradeSetting, Placement, Preference, Teacher, TeacherId};

/// API request to replace the whole roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplaceRosterRequest {
    /// Every teacher at the school.
    pub teachers: Vec<Teacher>,
}

/// API response for a roster replacement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplaceRosterResponse {
    /// Number of teachers now on the roster.
    pub teacher_count: usize,
    /// A success message.
    pub message: String,
}

/// API response listing the roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTeachersResponse {
    /// The roster, ordered by teacher ID.
    pub teachers: Vec<Teacher>,
}

/// Per-grade input for a settings replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GradeSettingInput {
    /// The grade number.
    pub grade: u8,
    /// Number of classes in the grade.
    pub class_count: u32,
    /// Homeroom teachers the grade needs.
    pub required_homerooms: u32,
}

/// API request to replace a year's grade settings.
///
/// Subject-teacher and duty-head requirements are entered once for the
/// whole school and split over the grades.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplaceSettingsRequest {
    /// One entry per configured grade.
    pub grades: Vec<GradeSettingInput>,
    /// Subject teachers the school needs.
    #[serde(default)]
    pub total_subject_teachers: u32,
    /// Duty heads the school needs.
    #[serde(default)]
    pub total_duty_heads: u32,
}

/// API response describing a year's grade settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SettingsResponse {
    /// The school year.
    pub year: u16,
    /// Per-grade rows, ordered by grade.
    pub settings: Vec<GradeSetting>,
    /// Sum of required homerooms.
    pub total_homerooms: u32,
    /// Sum of subject-teacher shares.
    pub total_subject_teachers: u32,
    /// Sum of duty-head shares.
    pub total_duty_heads: u32,
}

/// API request carrying one teacher's preference form.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitPreferenceRequest {
    /// First choice grade.
    #[serde(default)]
    pub first_choice_grade: Option<u8>,
    /// Second choice grade.
    #[serde(default)]
    pub second_choice_grade: Option<u8>,
    /// Third choice grade.
    #[serde(default)]
    pub third_choice_grade: Option<u8>,
    /// Asks to serve as a grade head.
    #[serde(default)]
    pub wants_grade_head: bool,
    /// One of the empty slots means subject teaching.
    #[serde(default)]
    pub wants_subject_teacher: bool,
    /// Asks to serve as a duty head.
    #[serde(default)]
    pub wants_duty_head: bool,
    /// Free text; names the duty division for duty-head requests.
    #[serde(default)]
    pub comment: Option<String>,
}

/// API response for a stored preference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitPreferenceResponse {
    /// The school year.
    pub year: u16,
    /// The submitting teacher.
    pub teacher_id: TeacherId,
    /// A success message.
    pub message: String,
}

/// API response listing a year's preferences.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPreferencesResponse {
    /// The school year.
    pub year: u16,
    /// Submissions ordered by teacher ID.
    pub preferences: Vec<Preference>,
}

/// API response for clearing a year's preferences.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearPreferencesResponse {
    /// The school year.
    pub year: u16,
    /// Number of submissions removed.
    pub removed: usize,
    /// A success message.
    pub message: String,
}

/// API request that triggers a run.
///
/// Both fields are optional; an anonymous trigger is attributed to the
/// system actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriggerRunRequest {
    /// Who is triggering the run.
    #[serde(default)]
    pub actor_id: Option<String>,
    /// Why the run is being made.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Count of assignments of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeCount {
    /// The assignment type.
    pub assignment_type: AssignmentType,
    /// How many records carry it.
    pub count: usize,
}

/// API response for a triggered run.
///
/// A run with shortfalls still succeeds; `complete` tells the caller
/// whether the message is a success or a partial-failure report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriggerRunResponse {
    /// The school year.
    pub year: u16,
    /// Whether every considered teacher was placed.
    pub complete: bool,
    /// The user-visible outcome.
    pub message: String,
    /// Teachers placed in a homeroom or the subject pool.
    pub placed: usize,
    /// Records per assignment type, omitting zeros.
    pub counts: Vec<TypeCount>,
    /// Considered teachers left without a placement.
    pub unplaced_teachers: Vec<TeacherId>,
    /// Grades still short of homeroom teachers.
    pub unfilled_grades: Vec<UnfilledGrade>,
    /// Grade-head requests the quota could not cover.
    pub unmet_grade_head_requests: Vec<TeacherId>,
    /// Duty-head requests the quota could not cover.
    pub unmet_duty_head_requests: Vec<TeacherId>,
    /// Number of teachers removed before placement.
    pub excluded: usize,
}

/// One assignment joined with the teacher's name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentInfo {
    /// The teacher.
    pub teacher_id: TeacherId,
    /// The teacher's name, empty if they have left the roster since the run.
    pub teacher_name: String,
    /// The homeroom grade, if one was assigned.
    pub assigned_grade: Option<u8>,
    /// Where the teacher ended up.
    pub placement: Placement,
    /// How the placement was reached.
    pub assignment_type: AssignmentType,
    /// Citation of the governing rule.
    pub rule_reference: Option<String>,
    /// Why this placement was made.
    pub description: String,
    /// Granted a grade-head position.
    pub grade_head: bool,
    /// Granted a duty-head position.
    pub duty_head: bool,
}

/// API response for a stored run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentsResponse {
    /// The school year.
    pub year: u16,
    /// One row per considered teacher, ordered by teacher ID.
    pub assignments: Vec<AssignmentInfo>,
    /// Teachers removed before placement.
    pub excluded_teachers: Vec<ExcludedTeacher>,
    /// Teachers left out for lack of a preference record.
    pub skipped_without_preference: Vec<TeacherId>,
    /// Considered teachers left without a placement.
    pub unplaced_teachers: Vec<TeacherId>,
    /// Grades still short of homeroom teachers.
    pub unfilled_grades: Vec<UnfilledGrade>,
    /// Grade-head requests the quota could not cover.
    pub unmet_grade_head_requests: Vec<TeacherId>,
    /// Duty-head requests the quota could not cover.
    pub unmet_duty_head_requests: Vec<TeacherId>,
    /// Per-teacher decision trace.
    pub logs: Vec<PlacementLog>,
}

/// API response for a year's audit history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The school year.
    pub year: u16,
    /// Events, oldest first.
    pub events: Vec<AuditEvent>,
}
