// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_cause, create_test_preference, create_test_settings,
    create_test_teacher, test_year,
};
use crate::{
    AssignmentRun, CoreError, EngineConfig, PreferenceStore, ResultSink, RosterProvider, RunResult,
    SettingsStore, Snapshot, apply_run, take_snapshot,
};
use grade_assign_audit::AuditEvent;
use grade_assign_domain::{GradeSetting, Preference, SchoolYear, Teacher};

fn create_test_snapshot() -> Snapshot {
    Snapshot::new(
        vec![create_test_teacher(1, 2010), create_test_teacher(2, 2012)],
        vec![create_test_preference(1, [Some(2), None, None])],
        create_test_settings([1, 1, 0, 0, 0, 0]),
    )
}

#[test]
fn test_apply_run_emits_audit_event() {
    let result: RunResult = apply_run(
        &create_test_snapshot(),
        test_year(),
        &EngineConfig::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.audit_event.action.name, "RunAssignment");
    assert_eq!(result.audit_event.actor.id, "admin-123");
    assert_eq!(result.audit_event.cause.id, "req-456");
    assert_eq!(result.audit_event.year, test_year());
    assert_eq!(result.audit_event.summary, result.run.summary());
    assert!(
        result
            .audit_event
            .action
            .details
            .as_ref()
            .unwrap()
            .contains("policy=overflow")
    );
}

#[test]
fn test_apply_run_propagates_configuration_error() {
    let snapshot: Snapshot = Snapshot::new(vec![create_test_teacher(1, 2010)], Vec::new(), Vec::new());
    let result: Result<RunResult, CoreError> = apply_run(
        &snapshot,
        test_year(),
        &EngineConfig::default(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::MissingGradeSettings { .. })
    ));
}

/// A store that only knows one snapshot.
#[derive(Default)]
struct FixedStore {
    snapshot: Snapshot,
    written: Vec<(AssignmentRun, AuditEvent)>,
}

impl RosterProvider for FixedStore {
    type Error = String;

    fn teachers(&self) -> Result<Vec<Teacher>, Self::Error> {
        Ok(self.snapshot.teachers.clone())
    }
}

impl PreferenceStore for FixedStore {
    type Error = String;

    fn preferences(&self, year: SchoolYear) -> Result<Vec<Preference>, Self::Error> {
        Ok(self.snapshot.preferences_for(year).cloned().collect())
    }
}

impl SettingsStore for FixedStore {
    type Error = String;

    fn grade_settings(&self, year: SchoolYear) -> Result<Vec<GradeSetting>, Self::Error> {
        if year != test_year() {
            return Err(format!("no settings for {year}"));
        }
        Ok(self.snapshot.settings.clone())
    }
}

impl ResultSink for FixedStore {
    type Error = String;

    fn write_run(&mut self, run: AssignmentRun, event: AuditEvent) -> Result<(), Self::Error> {
        self.written.push((run, event));
        Ok(())
    }
}

#[test]
fn test_snapshot_round_trip_through_ports() {
    let mut store: FixedStore = FixedStore {
        snapshot: create_test_snapshot(),
        written: Vec::new(),
    };

    let snapshot: Snapshot = take_snapshot(&store, test_year()).unwrap();
    assert_eq!(snapshot, store.snapshot);

    let result: RunResult = apply_run(
        &snapshot,
        test_year(),
        &EngineConfig::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    store.write_run(result.run, result.audit_event).unwrap();
    assert_eq!(store.written.len(), 1);
}

#[test]
fn test_snapshot_surfaces_store_errors() {
    let store: FixedStore = FixedStore::default();
    let result: Result<Snapshot, String> = take_snapshot(&store, SchoolYear::new(2030));
    assert_eq!(result, Err(String::from("no settings for 2030")));
}
