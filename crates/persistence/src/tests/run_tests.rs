// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_actor, create_test_cause, create_test_preference, create_test_setting,
    create_test_teacher, test_year,
};
use crate::{Persistence, PersistenceError};
use grade_assign::{
    AssignmentRun, EngineConfig, ResultSink, RunResult, Snapshot, apply_run, take_snapshot,
};
use grade_assign_audit::AuditEvent;
use grade_assign_domain::SchoolYear;

fn create_seeded_store() -> Persistence {
    let mut store: Persistence = Persistence::new_in_memory();
    store.replace_roster(vec![create_test_teacher(1, 2010), create_test_teacher(2, 2014)]);
    store.upsert_preference(create_test_preference(1, 2)).unwrap();
    store
        .replace_grade_settings(
            test_year(),
            vec![create_test_setting(1, 1), create_test_setting(2, 1)],
        )
        .unwrap();
    store
}

fn run_once(store: &Persistence) -> RunResult {
    let snapshot: Snapshot = take_snapshot(store, test_year()).unwrap();
    apply_run(
        &snapshot,
        test_year(),
        &EngineConfig::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_run_not_found_before_first_run() {
    let store: Persistence = create_seeded_store();
    assert_eq!(
        store.get_assignment_run(test_year()),
        Err(PersistenceError::RunNotFound(test_year()))
    );
}

#[test]
fn test_write_run_stores_result_and_audit_event() {
    let mut store: Persistence = create_seeded_store();
    let result: RunResult = run_once(&store);
    store.write_run(result.run, result.audit_event).unwrap();

    let stored: &AssignmentRun = store.get_assignment_run(test_year()).unwrap();
    assert_eq!(stored.assignments.len(), 2);

    let timeline: Vec<AuditEvent> = store.get_audit_timeline(test_year());
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "RunAssignment");
}

#[test]
fn test_rerun_replaces_result_and_extends_history() {
    let mut store: Persistence = create_seeded_store();
    let first: RunResult = run_once(&store);
    store.write_run(first.run, first.audit_event).unwrap();

    store.upsert_preference(create_test_preference(2, 1)).unwrap();
    let second: RunResult = run_once(&store);
    store.write_run(second.run.clone(), second.audit_event).unwrap();

    assert_eq!(store.get_assignment_run(test_year()).unwrap(), &second.run);
    assert_eq!(store.get_audit_timeline(test_year()).len(), 2);
}

#[test]
fn test_write_run_rejects_mismatched_event_year() {
    let mut store: Persistence = create_seeded_store();
    let mut result: RunResult = run_once(&store);
    result.audit_event.year = SchoolYear::new(2031);

    let outcome: Result<(), PersistenceError> = store.write_run(result.run, result.audit_event);
    assert!(matches!(outcome, Err(PersistenceError::YearMismatch { .. })));
    assert!(store.get_assignment_run(test_year()).is_err());
}

#[test]
fn test_clearing_preferences_keeps_stored_run() {
    let mut store: Persistence = create_seeded_store();
    let result: RunResult = run_once(&store);
    store.write_run(result.run, result.audit_event).unwrap();

    store.clear_preferences(test_year());
    assert!(store.get_assignment_run(test_year()).is_ok());
}
