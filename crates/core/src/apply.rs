// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::EngineConfig;
use crate::engine::run_assignment;
use crate::error::CoreError;
use crate::run::AssignmentRun;
use crate::snapshot::Snapshot;
use grade_assign_audit::{Action, Actor, AuditEvent, Cause};
use grade_assign_domain::SchoolYear;

/// The result of a completed run together with its audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// The engine output.
    pub run: AssignmentRun,
    /// The audit event recording this run.
    pub audit_event: AuditEvent,
}

/// Runs the engine and produces the audit event for it.
///
/// Nothing is written anywhere: the caller hands the result to a
/// `ResultSink` once it holds whatever lock serialises runs for the year.
///
/// # Arguments
///
/// * `snapshot` - The inputs as of the start of the run
/// * `year` - The school year being assigned
/// * `config` - Engine tunables
/// * `actor` - Who triggered the run
/// * `cause` - Why the run was triggered
///
/// # Errors
///
/// Returns any configuration error from [`run_assignment`]. No audit event
/// is produced for a run that did not happen.
pub fn apply_run(
    snapshot: &Snapshot,
    year: SchoolYear,
    config: &EngineConfig,
    actor: Actor,
    cause: Cause,
) -> Result<RunResult, CoreError> {
    let run: AssignmentRun = run_assignment(snapshot, year, config)?;

    let action: Action = Action::new(
        String::from("RunAssignment"),
        Some(format!(
            "policy={}, rotation={}, grade_heads_per_grade={}",
            config.no_preference_policy, config.enforce_rotation, config.grade_heads_per_grade
        )),
    );
    let audit_event: AuditEvent = AuditEvent::now(actor, cause, action, year, run.summary());

    Ok(RunResult { run, audit_event })
}
