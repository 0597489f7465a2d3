// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment engine.
//!
//! A run is a single pass over one snapshot. All working state (capacity,
//! records, the overflow queue) lives in an `Engine` value created for
//! the run and consumed when it finishes.
//!
//! ## Phases
//!
//! 1. Exclusion: teachers with an Art. 13 condition are removed.
//! 2. Partition: fixed subject teachers take the subject pool in seniority
//!    order; records with shape problems are queued for overflow; teachers
//!    without a preference are queued or skipped according to policy.
//! 3. Regulation priority: special circumstances, then duty heads by
//!    division, then subject specialists, then grade heads, each bucket in
//!    seniority order. Ranked choices first, then the current grade.
//! 4. Preference placement in seniority order: highest eligible ranked
//!    choice with capacity.
//! 5. Overflow in seniority order: the eligible grade with the most open
//!    homerooms, lowest grade on ties. Nothing left means unplaced.
//! 6. Role requests in seniority order against the grade-head and
//!    duty-head quotas. Requests riding on an ignored preference are noted
//!    but not granted.
//!
//! ## Invariants
//!
//! - Every considered teacher gets exactly one record
//! - No grade receives more teachers than its required homerooms
//! - An ineligible grade is never assigned, not even by overflow
//! - The same snapshot always yields the same result

use crate::config::{EngineConfig, NoPreferencePolicy};
use crate::error::CoreError;
use crate::run::{AssignmentRun, ExcludedTeacher, UnfilledGrade};
use crate::snapshot::Snapshot;
use grade_assign_audit::{PlacementLog, PlacementStep};
use grade_assign_domain::{
    Assignment, AssignmentType, CapacityTracker, Choice, EligibilityRules, ExclusionReason, Grade,
    GradeSetting, Placement, Preference, PriorityReason, ProcessingPosition, Rank, RankedChoice,
    ResolvedPreference, Role, RuleReference, SchoolYear, SpecialCondition, Teacher, TeacherId,
    Track, compare_seniority, compute_processing_order, ranked_choices,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Runs the assignment for `year` over `snapshot`.
///
/// # Arguments
///
/// * `snapshot` - Roster, preferences and settings as of the start of the run
/// * `year` - The school year being assigned
/// * `config` - Engine tunables
///
/// # Returns
///
/// The complete result, including any shortfall.
///
/// # Errors
///
/// Returns an error if:
/// - No grade settings exist for the year, or one grade is configured twice
/// - The settings require no homerooms
/// - The roster is empty or contains a duplicate teacher ID
pub fn run_assignment(
    snapshot: &Snapshot,
    year: SchoolYear,
    config: &EngineConfig,
) -> Result<AssignmentRun, CoreError> {
    let settings: Vec<GradeSetting> = snapshot.settings_for(year)?;
    let capacity: CapacityTracker =
        CapacityTracker::from_settings(&settings, config.grade_heads_per_grade);
    if capacity.remaining_homerooms() == 0 {
        return Err(CoreError::NoHomeroomCapacity { year });
    }
    if snapshot.teachers.is_empty() {
        return Err(CoreError::EmptyRoster);
    }

    let order: Vec<ProcessingPosition> = compute_processing_order(&snapshot.teachers)?;
    let by_id: HashMap<TeacherId, &Teacher> =
        snapshot.teachers.iter().map(|t| (t.id, t)).collect();
    let ordered: Vec<&Teacher> = order
        .iter()
        .filter_map(|position| by_id.get(&position.teacher_id).copied())
        .collect();

    let preferences: HashMap<TeacherId, &Preference> = snapshot
        .preferences_for(year)
        .map(|p| (p.teacher_id, p))
        .collect();

    info!(
        year = %year,
        teachers = ordered.len(),
        preferences = preferences.len(),
        homerooms = capacity.remaining_homerooms(),
        "Starting assignment run"
    );

    let mut engine: Engine<'_> = Engine::new(year, config, capacity, preferences);
    let homeroom: Vec<&Teacher> = engine.partition(&ordered);
    let general: Vec<&Teacher> = engine.place_regulation_priority(homeroom);
    engine.place_by_preference(&general);
    engine.place_overflow();
    engine.grant_roles(&ordered);

    let run: AssignmentRun = engine.finish();
    info!(year = %year, summary = %run.summary(), "Assignment run complete");
    Ok(run)
}

/// Why a teacher is placed ahead of general placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entitlement<'t> {
    Special(PriorityReason),
    Role(&'t Role),
}

impl<'t> Entitlement<'t> {
    fn of(teacher: &'t Teacher) -> Option<Self> {
        if let Some(SpecialCondition::Priority(reason)) = teacher.special_condition {
            return Some(Self::Special(reason));
        }
        teacher
            .role
            .priority_bucket()
            .map(|_| Self::Role(&teacher.role))
    }

    /// Special circumstances come first, then the role's own bucket.
    fn bucket(self) -> u8 {
        match self {
            Self::Special(_) => 0,
            Self::Role(role) => role
                .priority_bucket()
                .map_or(u8::MAX, |bucket| bucket.saturating_add(1)),
        }
    }

    const fn rule(self) -> RuleReference {
        match self {
            Self::Special(_) => RuleReference::SpecialPriority,
            Self::Role(_) => RuleReference::RolePriority,
        }
    }

    fn label(self) -> String {
        match self {
            Self::Special(reason) => format!("special circumstance ({})", reason.label()),
            Self::Role(role) => format!("current {role}"),
        }
    }
}

/// A teacher waiting for the overflow pass.
struct OverflowCandidate<'a> {
    teacher: &'a Teacher,
    /// Ignore the preference record (data anomalies).
    ignore_preference: bool,
    /// Why ranked placement did not happen, best rank first.
    reasons: Vec<String>,
}

struct Engine<'a> {
    year: SchoolYear,
    rules: EligibilityRules,
    policy: NoPreferencePolicy,
    capacity: CapacityTracker,
    preferences: HashMap<TeacherId, &'a Preference>,
    records: BTreeMap<TeacherId, Assignment>,
    overflow: Vec<OverflowCandidate<'a>>,
    excluded: Vec<ExcludedTeacher>,
    skipped: Vec<TeacherId>,
    unmet_grade_head: Vec<TeacherId>,
    unmet_duty_head: Vec<TeacherId>,
    /// Teachers whose preference record is disregarded for the whole run.
    ignored_preferences: HashSet<TeacherId>,
    logs: Vec<PlacementLog>,
}

impl<'a> Engine<'a> {
    fn new(
        year: SchoolYear,
        config: &EngineConfig,
        capacity: CapacityTracker,
        preferences: HashMap<TeacherId, &'a Preference>,
    ) -> Self {
        Self {
            year,
            rules: config.eligibility_rules(),
            policy: config.no_preference_policy,
            capacity,
            preferences,
            records: BTreeMap::new(),
            overflow: Vec::new(),
            excluded: Vec::new(),
            skipped: Vec::new(),
            unmet_grade_head: Vec::new(),
            unmet_duty_head: Vec::new(),
            ignored_preferences: HashSet::new(),
            logs: Vec::new(),
        }
    }

    fn preference(&self, teacher_id: TeacherId) -> Option<&'a Preference> {
        self.preferences.get(&teacher_id).copied()
    }

    fn log(&mut self, teacher_id: TeacherId, step: PlacementStep, message: String) {
        self.logs.push(PlacementLog::new(teacher_id, step, message));
    }

    fn record(
        &mut self,
        teacher: &Teacher,
        placement: Placement,
        assignment_type: AssignmentType,
        rule: Option<RuleReference>,
        description: String,
        step: PlacementStep,
    ) {
        debug!(
            year = %self.year,
            teacher_id = %teacher.id,
            placement = %placement,
            assignment_type = %assignment_type,
            "Placement decided"
        );
        self.log(teacher.id, step, description.clone());
        self.records.insert(
            teacher.id,
            Assignment {
                teacher_id: teacher.id,
                year: self.year,
                placement,
                assignment_type,
                rule_reference: rule.map(|r| r.citation().to_string()),
                description,
                grade_head: false,
                duty_head: false,
            },
        );
    }

    /// Handles exclusion, the subject track and data anomalies. Returns the
    /// homeroom teachers still to be placed, in seniority order.
    fn partition(&mut self, ordered: &[&'a Teacher]) -> Vec<&'a Teacher> {
        let mut homeroom: Vec<&'a Teacher> = Vec::new();

        for teacher in ordered.iter().copied() {
            if let Some(SpecialCondition::Excluded(reason)) = teacher.special_condition {
                self.exclude(teacher, reason);
                continue;
            }

            match teacher.track() {
                Track::SubjectTeacher => self.place_subject_track(teacher),
                Track::Unclassified => {
                    warn!(
                        year = %self.year,
                        teacher_id = %teacher.id,
                        "Teacher is neither homeroom nor subject track; routing to overflow"
                    );
                    self.queue_anomaly(teacher, "record has no usable homeroom/subject status");
                }
                Track::Homeroom if teacher.has_malformed_history() => {
                    warn!(
                        year = %self.year,
                        teacher_id = %teacher.id,
                        "Teacher has malformed grade history; routing to overflow"
                    );
                    self.queue_anomaly(teacher, "grade history contains an invalid grade");
                }
                Track::Homeroom => {
                    if self.preference(teacher.id).is_none()
                        && self.policy == NoPreferencePolicy::Exclude
                    {
                        debug!(year = %self.year, teacher_id = %teacher.id, "Skipping teacher without preference");
                        self.skipped.push(teacher.id);
                        self.log(
                            teacher.id,
                            PlacementStep::NoPreference,
                            String::from("No preference submitted; left out of placement"),
                        );
                    } else {
                        homeroom.push(teacher);
                    }
                }
            }
        }

        homeroom
    }

    fn exclude(&mut self, teacher: &Teacher, reason: ExclusionReason) {
        debug!(year = %self.year, teacher_id = %teacher.id, reason = reason.label(), "Teacher excluded");
        self.excluded.push(ExcludedTeacher::new(teacher.id, reason));
        self.log(
            teacher.id,
            PlacementStep::Exclusion,
            format!(
                "Excluded: {} ({})",
                reason.label(),
                RuleReference::Exclusion.citation()
            ),
        );

        let Some(preference) = self.preference(teacher.id) else {
            return;
        };
        let dropped: Vec<&str> = requested_roles(preference);
        if !dropped.is_empty() {
            self.log(
                teacher.id,
                PlacementStep::RoleRequest,
                format!(
                    "Request for {} not considered: teacher is excluded from assignment",
                    dropped.join(" and ")
                ),
            );
        }
    }

    fn queue_anomaly(&mut self, teacher: &'a Teacher, problem: &str) {
        self.ignored_preferences.insert(teacher.id);
        self.log(
            teacher.id,
            PlacementStep::DataAnomaly,
            format!("Preference ignored: {problem}"),
        );
        self.overflow.push(OverflowCandidate {
            teacher,
            ignore_preference: true,
            reasons: vec![format!("preference ignored because the {problem}")],
        });
    }

    fn place_subject_track(&mut self, teacher: &Teacher) {
        if self.capacity.reserve_subject_slot() {
            self.record(
                teacher,
                Placement::SubjectTeacher,
                AssignmentType::SubjectTeacherTrack,
                Some(RuleReference::SubjectTeacherQuota),
                String::from("Fixed subject teacher placed in the subject-teacher pool"),
                PlacementStep::SubjectTrack,
            );
        } else {
            self.record(
                teacher,
                Placement::Unplaced,
                AssignmentType::Unplaced,
                None,
                String::from("Fixed subject teacher, but the subject-teacher quota is exhausted"),
                PlacementStep::SubjectTrack,
            );
        }
    }

    fn resolve(&self, teacher: &Teacher, preference: Option<&Preference>) -> ResolvedPreference {
        let resolved: ResolvedPreference = ranked_choices(teacher, preference, &self.rules);
        for (rank, value) in &resolved.invalid_slots {
            warn!(
                year = %self.year,
                teacher_id = %teacher.id,
                rank = rank.number(),
                value = *value,
                "Preference names an invalid grade"
            );
        }
        resolved
    }

    fn claim(&mut self, choice: Choice) -> bool {
        match choice {
            Choice::Grade(grade) => self.capacity.reserve(grade),
            Choice::SubjectTeacher => self.capacity.reserve_subject_slot(),
        }
    }

    /// Claims the best ranked choice with capacity, or explains every
    /// failure in rank order.
    fn claim_ranked(&mut self, resolved: &ResolvedPreference) -> Result<RankedChoice, Vec<String>> {
        let mut failures: Vec<(Rank, String)> = Vec::new();
        for rejected in &resolved.rejected {
            failures.push((
                rejected.rank,
                format!(
                    "{} choice {}: {}",
                    rejected.rank.ordinal(),
                    rejected.grade,
                    rejected.reason
                ),
            ));
        }
        for (rank, value) in &resolved.invalid_slots {
            failures.push((
                *rank,
                format!("{} choice {value}: not a valid grade", rank.ordinal()),
            ));
        }

        for ranked in &resolved.choices {
            if self.claim(ranked.choice) {
                return Ok(*ranked);
            }
            let why: &str = match ranked.choice {
                Choice::Grade(_) => "no open homerooms",
                Choice::SubjectTeacher => "subject-teacher quota exhausted",
            };
            failures.push((
                ranked.rank,
                format!("{} choice {}: {why}", ranked.rank.ordinal(), ranked.choice),
            ));
        }

        failures.sort_by_key(|(rank, _)| *rank);
        Err(failures.into_iter().map(|(_, reason)| reason).collect())
    }

    /// Places entitled teachers first. Returns everyone else.
    fn place_regulation_priority(&mut self, homeroom: Vec<&'a Teacher>) -> Vec<&'a Teacher> {
        let (mut entitled, general): (Vec<&'a Teacher>, Vec<&'a Teacher>) = homeroom
            .into_iter()
            .partition(|t| Entitlement::of(t).is_some());
        // Stable sort keeps seniority order within each bucket.
        entitled.sort_by_key(|t| Entitlement::of(t).map(Entitlement::bucket));

        for teacher in entitled {
            let Some(entitlement) = Entitlement::of(teacher) else {
                continue;
            };
            let preference: Option<&Preference> = self.preference(teacher.id);
            let resolved: ResolvedPreference = self.resolve(teacher, preference);

            match self.claim_ranked(&resolved) {
                Ok(ranked) => {
                    let description: String = format!(
                        "Regulation priority as {}: placed in {} ({} choice)",
                        entitlement.label(),
                        ranked.choice,
                        ranked.rank.ordinal()
                    );
                    self.record(
                        teacher,
                        Placement::from(ranked.choice),
                        AssignmentType::RegulationPriority,
                        Some(entitlement.rule()),
                        description,
                        PlacementStep::RegulationPriority,
                    );
                }
                Err(mut reasons) => {
                    let current: Option<Grade> = teacher
                        .current_grade
                        .filter(|grade| self.rules.check(teacher, preference, *grade).is_ok());
                    if let Some(grade) = current
                        && self.capacity.reserve(grade)
                    {
                        let description: String = format!(
                            "Regulation priority as {}: kept current {grade}",
                            entitlement.label()
                        );
                        self.record(
                            teacher,
                            Placement::Grade(grade),
                            AssignmentType::RegulationPriority,
                            Some(entitlement.rule()),
                            description,
                            PlacementStep::RegulationPriority,
                        );
                        continue;
                    }

                    if let Some(grade) = teacher.current_grade {
                        reasons.push(format!("current {grade}: unavailable"));
                    }
                    self.log(
                        teacher.id,
                        PlacementStep::RegulationPriority,
                        format!(
                            "Entitled as {} but no ranked or current grade was open",
                            entitlement.label()
                        ),
                    );
                    self.overflow.push(OverflowCandidate {
                        teacher,
                        ignore_preference: false,
                        reasons,
                    });
                }
            }
        }

        general
    }

    fn place_by_preference(&mut self, general: &[&'a Teacher]) {
        for teacher in general.iter().copied() {
            let Some(preference) = self.preference(teacher.id) else {
                self.log(
                    teacher.id,
                    PlacementStep::Preference,
                    String::from("No preference submitted"),
                );
                self.overflow.push(OverflowCandidate {
                    teacher,
                    ignore_preference: false,
                    reasons: vec![String::from("no preference submitted")],
                });
                continue;
            };

            let resolved: ResolvedPreference = self.resolve(teacher, Some(preference));
            match self.claim_ranked(&resolved) {
                Ok(ranked) => {
                    let assignment_type: AssignmentType = match ranked.rank {
                        Rank::First => AssignmentType::FirstChoice,
                        Rank::Second => AssignmentType::SecondChoice,
                        Rank::Third => AssignmentType::ThirdChoice,
                    };
                    let rule: RuleReference = match ranked.choice {
                        Choice::Grade(_) => RuleReference::RankedPreference,
                        Choice::SubjectTeacher => RuleReference::SubjectTeacherQuota,
                    };
                    let description: String = format!(
                        "{} choice honoured: {}",
                        ranked.rank.ordinal(),
                        ranked.choice
                    );
                    self.record(
                        teacher,
                        Placement::from(ranked.choice),
                        assignment_type,
                        Some(rule),
                        description,
                        PlacementStep::Preference,
                    );
                }
                Err(reasons) => {
                    self.log(
                        teacher.id,
                        PlacementStep::Preference,
                        String::from("No ranked choice was available"),
                    );
                    self.overflow.push(OverflowCandidate {
                        teacher,
                        ignore_preference: false,
                        reasons,
                    });
                }
            }
        }
    }

    fn place_overflow(&mut self) {
        let mut candidates: Vec<OverflowCandidate<'a>> = std::mem::take(&mut self.overflow);
        candidates.sort_by(|a, b| compare_seniority(a.teacher, b.teacher));

        for candidate in candidates {
            let teacher: &Teacher = candidate.teacher;
            let preference: Option<&Preference> = if candidate.ignore_preference {
                None
            } else {
                self.preference(teacher.id)
            };
            let rules: EligibilityRules = self.rules;
            let why: String = if candidate.reasons.is_empty() {
                String::from("no ranked choices")
            } else {
                candidate.reasons.join("; ")
            };

            let target: Option<Grade> = self
                .capacity
                .most_open_grade(|grade| rules.check(teacher, preference, grade).is_ok());
            if let Some(grade) = target
                && self.capacity.reserve(grade)
            {
                self.record(
                    teacher,
                    Placement::Grade(grade),
                    AssignmentType::ForcedOverflow,
                    Some(RuleReference::RotationAdjustment),
                    format!(
                        "Ranked placement failed ({why}); placed in {grade}, the eligible grade with the most open homerooms"
                    ),
                    PlacementStep::Overflow,
                );
            } else {
                warn!(year = %self.year, teacher_id = %teacher.id, "No eligible grade has an open homeroom");
                self.record(
                    teacher,
                    Placement::Unplaced,
                    AssignmentType::Unplaced,
                    None,
                    format!("Ranked placement failed ({why}); no eligible grade had an open homeroom"),
                    PlacementStep::Overflow,
                );
            }
        }
    }

    fn grant_roles(&mut self, ordered: &[&'a Teacher]) {
        for teacher in ordered.iter().copied() {
            let Some(preference) = self.preference(teacher.id) else {
                continue;
            };
            if !self.records.contains_key(&teacher.id) {
                continue;
            }
            if self.ignored_preferences.contains(&teacher.id) {
                let ignored: Vec<&str> = requested_roles(preference);
                if !ignored.is_empty() {
                    self.annotate(
                        teacher.id,
                        false,
                        false,
                        &format!(
                            "Request for {} ignored with the preference.",
                            ignored.join(" and ")
                        ),
                    );
                }
                continue;
            }

            let mut notes: Vec<String> = Vec::new();
            let mut grade_head: bool = false;
            let mut duty_head: bool = false;

            if preference.wants_grade_head {
                if self.capacity.reserve_grade_head() {
                    grade_head = true;
                    notes.push(String::from("Grade head granted."));
                } else {
                    self.unmet_grade_head.push(teacher.id);
                    notes.push(String::from("Grade head requested; quota exhausted."));
                }
            }

            if preference.wants_duty_head {
                let detail: Option<&str> = preference
                    .comment
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty());
                if self.capacity.reserve_duty_head() {
                    duty_head = true;
                    notes.push(match detail {
                        Some(detail) => format!("Duty head granted ({detail})."),
                        None => String::from("Duty head granted."),
                    });
                } else {
                    self.unmet_duty_head.push(teacher.id);
                    notes.push(String::from("Duty head requested; quota exhausted."));
                }
            }

            if notes.is_empty() {
                continue;
            }
            self.annotate(teacher.id, grade_head, duty_head, &notes.join(" "));
        }
    }

    /// Appends a role note to a teacher's record and log.
    fn annotate(&mut self, teacher_id: TeacherId, grade_head: bool, duty_head: bool, note: &str) {
        if let Some(record) = self.records.get_mut(&teacher_id) {
            record.grade_head = grade_head;
            record.duty_head = duty_head;
            record.description.push_str(". ");
            record.description.push_str(note);
        }
        self.log(teacher_id, PlacementStep::RoleRequest, note.to_string());
    }

    fn finish(self) -> AssignmentRun {
        let assignments: Vec<Assignment> = self.records.into_values().collect();
        let unplaced_teachers: Vec<TeacherId> = assignments
            .iter()
            .filter(|a| a.placement == Placement::Unplaced)
            .map(|a| a.teacher_id)
            .collect();
        let unfilled_grades: Vec<UnfilledGrade> = self
            .capacity
            .open_grades()
            .into_iter()
            .map(|(grade, open)| UnfilledGrade { grade, open })
            .collect();

        let mut excluded_teachers: Vec<ExcludedTeacher> = self.excluded;
        excluded_teachers.sort_by_key(|e| e.teacher_id);
        let mut skipped_without_preference: Vec<TeacherId> = self.skipped;
        skipped_without_preference.sort();

        AssignmentRun {
            year: self.year,
            assignments,
            unplaced_teachers,
            unmet_grade_head_requests: self.unmet_grade_head,
            unmet_duty_head_requests: self.unmet_duty_head,
            excluded_teachers,
            skipped_without_preference,
            unfilled_grades,
            remaining: self.capacity,
            logs: self.logs,
        }
    }
}

/// Names the roles a preference asks for, in grant order.
fn requested_roles(preference: &Preference) -> Vec<&'static str> {
    let mut roles: Vec<&'static str> = Vec::new();
    if preference.wants_grade_head {
        roles.push("grade head");
    }
    if preference.wants_duty_head {
        roles.push("duty head");
    }
    roles
}
