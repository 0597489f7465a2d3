// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operations exposed at the API boundary.
//!
//! Each operation validates its input, translates lower-layer errors into
//! [`ApiError`], and returns a response DTO. None of them lock anything:
//! the caller owns the store and decides how it is shared.

use crate::error::ApiError;
use crate::export::render_assignments_csv;
use crate::request_response::{
    AssignmentInfo, AssignmentsResponse, AuditTimelineResponse, ClearPreferencesResponse,
    GradeSettingInput, ListPreferencesResponse, ListTeachersResponse, ReplaceRosterRequest,
    ReplaceRosterResponse, ReplaceSettingsRequest, SettingsResponse, SubmitPreferenceRequest,
    SubmitPreferenceResponse, TriggerRunRequest, TriggerRunResponse, TypeCount,
};
use grade_assign::{
    AssignmentRun, EngineConfig, ResultSink, RunResult, Snapshot, apply_run, take_snapshot,
};
use grade_assign_audit::{Actor, AuditEvent, Cause, timestamp_now};
use grade_assign_domain::{
    GRADE_COUNT, Grade, GradeSetting, Preference, SchoolYear, TeacherId, split_evenly,
    validate_preference, validate_roster_unique, validate_school_year, validate_staff_count,
    validate_teacher_fields,
};
use grade_assign_persistence::Persistence;
use std::collections::HashSet;
use tracing::{info, warn};

/// Validates a raw year from a request path.
fn parse_year(year: u16) -> Result<SchoolYear, ApiError> {
    validate_school_year(year)?;
    Ok(SchoolYear::new(year))
}

/// Replaces the whole roster.
///
/// Every record is checked before anything is written, so a rejected
/// request leaves the previous roster in place.
///
/// # Errors
///
/// Returns an error if:
/// - A teacher has an empty name
/// - A teacher is flagged both as homeroom and as subject teacher
/// - A teacher ID appears twice
pub fn replace_roster(
    persistence: &mut Persistence,
    request: ReplaceRosterRequest,
) -> Result<ReplaceRosterResponse, ApiError> {
    for teacher in &request.teachers {
        validate_teacher_fields(teacher)?;
    }
    validate_roster_unique(&request.teachers)?;

    let teacher_count: usize = request.teachers.len();
    persistence.replace_roster(request.teachers);
    info!(teacher_count, "Roster replaced");

    Ok(ReplaceRosterResponse {
        teacher_count,
        message: format!("Roster replaced with {teacher_count} teachers"),
    })
}

/// Lists the roster ordered by teacher ID.
#[must_use]
pub fn list_teachers(persistence: &Persistence) -> ListTeachersResponse {
    ListTeachersResponse {
        teachers: persistence.list_teachers(),
    }
}

/// Builds the per-grade rows for a settings request.
///
/// School-wide subject-teacher and duty-head totals are split over all six
/// grades. A grade missing from the request still gets a row (with no
/// homerooms) when its share of either total is non-zero, so the pooled
/// quotas always add back up to the totals entered.
///
/// # Errors
///
/// Returns an error if:
/// - A grade number is invalid or repeated
/// - A count or school-wide total is above `MAX_STAFF_COUNT`
pub fn derive_grade_settings(
    year: SchoolYear,
    request: &ReplaceSettingsRequest,
) -> Result<Vec<GradeSetting>, ApiError> {
    validate_staff_count("total_subject_teachers", request.total_subject_teachers)?;
    validate_staff_count("total_duty_heads", request.total_duty_heads)?;

    let subject_shares: [u32; GRADE_COUNT as usize] =
        split_evenly(request.total_subject_teachers);
    let duty_shares: [u32; GRADE_COUNT as usize] = split_evenly(request.total_duty_heads);

    let mut seen: HashSet<Grade> = HashSet::new();
    let mut configured: Vec<(Grade, GradeSettingInput)> = Vec::new();
    for input in &request.grades {
        let grade: Grade = Grade::new(input.grade)?;
        validate_staff_count("class_count", input.class_count)?;
        validate_staff_count("required_homerooms", input.required_homerooms)?;
        if !seen.insert(grade) {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("unique_grade"),
                message: format!("{grade} appears more than once in the request"),
            });
        }
        configured.push((grade, *input));
    }

    let settings: Vec<GradeSetting> = Grade::all()
        .filter_map(|grade| {
            let input: Option<GradeSettingInput> = configured
                .iter()
                .find(|(g, _)| *g == grade)
                .map(|(_, input)| *input);
            let subject: u32 = subject_shares[grade.index()];
            let duty: u32 = duty_shares[grade.index()];
            if input.is_none() && subject == 0 && duty == 0 {
                return None;
            }
            Some(GradeSetting {
                year,
                grade,
                class_count: input.map_or(0, |i| i.class_count),
                required_homerooms: input.map_or(0, |i| i.required_homerooms),
                required_subject_teachers: subject,
                required_duty_heads: duty,
            })
        })
        .collect();

    Ok(settings)
}

fn settings_response(year: SchoolYear, settings: Vec<GradeSetting>) -> SettingsResponse {
    let total = |count: fn(&GradeSetting) -> u32| -> u32 {
        settings
            .iter()
            .map(count)
            .fold(0, u32::saturating_add)
    };
    SettingsResponse {
        year: year.year(),
        total_homerooms: total(|s| s.required_homerooms),
        total_subject_teachers: total(|s| s.required_subject_teachers),
        total_duty_heads: total(|s| s.required_duty_heads),
        settings,
    }
}

/// Replaces a year's grade settings.
///
/// # Errors
///
/// Returns an error if the year or a grade number is invalid, or a grade
/// is repeated.
pub fn replace_settings(
    persistence: &mut Persistence,
    year: u16,
    request: &ReplaceSettingsRequest,
) -> Result<SettingsResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let settings: Vec<GradeSetting> = derive_grade_settings(year, request)?;
    persistence.replace_grade_settings(year, settings.clone())?;
    info!(year = %year, grades = settings.len(), "Grade settings replaced");
    Ok(settings_response(year, settings))
}

/// Returns a year's grade settings. An unconfigured year yields no rows.
///
/// # Errors
///
/// Returns an error if the year is invalid.
pub fn get_settings(persistence: &Persistence, year: u16) -> Result<SettingsResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    Ok(settings_response(year, persistence.list_grade_settings(year)))
}

/// Stores a teacher's preference form, replacing any earlier submission.
///
/// A run already in flight keeps the snapshot it started with; the new
/// preference is only seen by the next run.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `year` - The school year the preference is for
/// * `teacher_id` - The submitting teacher
/// * `request` - The form contents
///
/// # Errors
///
/// Returns an error if:
/// - The year is invalid
/// - A slot holds a number outside 1-6, or a grade is ranked twice
/// - The teacher is not on the roster
pub fn submit_preference(
    persistence: &mut Persistence,
    year: u16,
    teacher_id: i64,
    request: SubmitPreferenceRequest,
) -> Result<SubmitPreferenceResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let teacher_id: TeacherId = TeacherId::new(teacher_id);

    let preference: Preference = Preference {
        teacher_id,
        year,
        first_choice_grade: request.first_choice_grade,
        second_choice_grade: request.second_choice_grade,
        third_choice_grade: request.third_choice_grade,
        wants_grade_head: request.wants_grade_head,
        wants_subject_teacher: request.wants_subject_teacher,
        wants_duty_head: request.wants_duty_head,
        comment: request.comment,
    };
    validate_preference(&preference)?;
    persistence.upsert_preference(preference)?;

    Ok(SubmitPreferenceResponse {
        year: year.year(),
        teacher_id,
        message: format!("Preference for teacher {teacher_id} saved for {year}"),
    })
}

/// Lists a year's preference submissions.
///
/// # Errors
///
/// Returns an error if the year is invalid.
pub fn list_preferences(
    persistence: &Persistence,
    year: u16,
) -> Result<ListPreferencesResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    Ok(ListPreferencesResponse {
        year: year.year(),
        preferences: persistence.list_preferences(year),
    })
}

/// Deletes every preference submitted for a year.
///
/// Stored results are untouched; they stay until the next run replaces
/// them.
///
/// # Errors
///
/// Returns an error if the year is invalid.
pub fn clear_preferences(
    persistence: &mut Persistence,
    year: u16,
) -> Result<ClearPreferencesResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let removed: usize = persistence.clear_preferences(year);
    Ok(ClearPreferencesResponse {
        year: year.year(),
        removed,
        message: format!("Cleared {removed} preferences for {year}"),
    })
}

/// Reads the inputs for a run.
///
/// This is the only part of a run that reads the store. Edits made after
/// it returns are not seen by the run.
///
/// # Errors
///
/// Returns an error if the year is invalid.
pub fn snapshot_for_run(persistence: &Persistence, year: u16) -> Result<Snapshot, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    Ok(take_snapshot(persistence, year)?)
}

/// Resolves who triggered a run and why.
#[must_use]
pub fn run_origin(year: SchoolYear, request: &TriggerRunRequest) -> (Actor, Cause) {
    let actor: Actor = request.actor_id.as_ref().map_or_else(Actor::system, |id| {
        Actor::new(id.clone(), String::from("admin"))
    });
    let description: String = request
        .reason
        .clone()
        .unwrap_or_else(|| format!("Assignment run requested for {year}"));
    let cause: Cause = Cause::new(format!("assign-{year}-{}", timestamp_now()), description);
    (actor, cause)
}

/// Runs the engine over a snapshot. Touches no store.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the year's grade settings are
/// missing, inconsistent, or provide no homerooms, or if the roster is
/// empty.
pub fn compute_run(
    snapshot: &Snapshot,
    year: u16,
    config: &EngineConfig,
    request: &TriggerRunRequest,
) -> Result<RunResult, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let (actor, cause) = run_origin(year, request);
    apply_run(snapshot, year, config, actor, cause).map_err(|err| {
        warn!(year = %year, error = %err, "Assignment run aborted");
        ApiError::from(err)
    })
}

/// Writes a computed run and reports its outcome.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn commit_run(
    persistence: &mut Persistence,
    result: RunResult,
) -> Result<TriggerRunResponse, ApiError> {
    let response: TriggerRunResponse = run_response(&result.run);
    persistence.write_run(result.run, result.audit_event)?;
    info!(
        year = response.year,
        complete = response.complete,
        placed = response.placed,
        "Assignment run committed"
    );
    Ok(response)
}

/// Snapshots, runs and commits in one call.
///
/// Convenient when the caller already holds exclusive access to the store.
///
/// # Errors
///
/// Returns any error from [`snapshot_for_run`], [`compute_run`] or
/// [`commit_run`].
pub fn trigger_run(
    persistence: &mut Persistence,
    year: u16,
    config: &EngineConfig,
    request: &TriggerRunRequest,
) -> Result<TriggerRunResponse, ApiError> {
    let snapshot: Snapshot = snapshot_for_run(persistence, year)?;
    let result: RunResult = compute_run(&snapshot, year, config, request)?;
    commit_run(persistence, result)
}

/// Builds the user-visible message for a finished run.
///
/// A run that left teachers unplaced gets a partial-failure message naming
/// them; otherwise the message reports success. Either way the counts per
/// assignment type and any grades still short of homerooms follow.
#[must_use]
pub fn run_message(run: &AssignmentRun) -> String {
    let mut message: String = if run.is_complete() {
        format!("Assignment for {} complete: {}", run.year, run.summary())
    } else {
        let ids: Vec<String> = run
            .unplaced_teachers
            .iter()
            .map(ToString::to_string)
            .collect();
        format!(
            "Assignment for {} finished with {} unplaced teachers ({}): {}",
            run.year,
            run.unplaced_teachers.len(),
            ids.join(", "),
            run.summary()
        )
    };

    if !run.unfilled_grades.is_empty() {
        let grades: Vec<String> = run
            .unfilled_grades
            .iter()
            .map(|u| format!("{} ({} open)", u.grade, u.open))
            .collect();
        message.push_str(&format!(". Short of homeroom teachers: {}", grades.join(", ")));
    }
    message
}

fn run_response(run: &AssignmentRun) -> TriggerRunResponse {
    TriggerRunResponse {
        year: run.year.year(),
        complete: run.is_complete(),
        message: run_message(run),
        placed: run.placed_count(),
        counts: run
            .counts_by_type()
            .into_iter()
            .map(|(assignment_type, count)| TypeCount {
                assignment_type,
                count,
            })
            .collect(),
        unplaced_teachers: run.unplaced_teachers.clone(),
        unfilled_grades: run.unfilled_grades.clone(),
        unmet_grade_head_requests: run.unmet_grade_head_requests.clone(),
        unmet_duty_head_requests: run.unmet_duty_head_requests.clone(),
        excluded: run.excluded_teachers.len(),
    }
}

fn assignment_rows(persistence: &Persistence, run: &AssignmentRun) -> Vec<AssignmentInfo> {
    run.assignments
        .iter()
        .map(|a| AssignmentInfo {
            teacher_id: a.teacher_id,
            teacher_name: persistence
                .get_teacher(a.teacher_id)
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            assigned_grade: a.placement.grade().map(Grade::value),
            placement: a.placement,
            assignment_type: a.assignment_type,
            rule_reference: a.rule_reference.clone(),
            description: a.description.clone(),
            grade_head: a.grade_head,
            duty_head: a.duty_head,
        })
        .collect()
}

/// Returns the stored result of the latest run for a year.
///
/// # Errors
///
/// Returns an error if the year is invalid or has never been run.
pub fn get_assignments(
    persistence: &Persistence,
    year: u16,
) -> Result<AssignmentsResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let run: &AssignmentRun = persistence.get_assignment_run(year)?;

    Ok(AssignmentsResponse {
        year: year.year(),
        assignments: assignment_rows(persistence, run),
        excluded_teachers: run.excluded_teachers.clone(),
        skipped_without_preference: run.skipped_without_preference.clone(),
        unplaced_teachers: run.unplaced_teachers.clone(),
        unfilled_grades: run.unfilled_grades.clone(),
        unmet_grade_head_requests: run.unmet_grade_head_requests.clone(),
        unmet_duty_head_requests: run.unmet_duty_head_requests.clone(),
        logs: run.logs.clone(),
    })
}

/// Renders the stored result for a year as CSV.
///
/// # Errors
///
/// Returns an error if the year is invalid, has never been run, or the
/// CSV cannot be rendered.
pub fn export_assignments(persistence: &Persistence, year: u16) -> Result<String, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let run: &AssignmentRun = persistence.get_assignment_run(year)?;
    Ok(render_assignments_csv(&assignment_rows(persistence, run))?)
}

/// Returns every audit event recorded for a year, oldest first.
///
/// # Errors
///
/// Returns an error if the year is invalid.
pub fn get_audit_timeline(
    persistence: &Persistence,
    year: u16,
) -> Result<AuditTimelineResponse, ApiError> {
    let year: SchoolYear = parse_year(year)?;
    let events: Vec<AuditEvent> = persistence.get_audit_timeline(year);
    Ok(AuditTimelineResponse {
        year: year.year(),
        events,
    })
}
