// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The collaborators an assignment run talks to.
//!
//! The engine itself is pure; these traits describe where its inputs come
//! from and where its output goes. A store implementing all four can drive
//! a complete run with [`take_snapshot`].

use crate::run::AssignmentRun;
use crate::snapshot::Snapshot;
use grade_assign_audit::AuditEvent;
use grade_assign_domain::{GradeSetting, Preference, SchoolYear, Teacher};

/// Supplies the school roster.
pub trait RosterProvider {
    /// Error type for reads.
    type Error;

    /// Returns every teacher, including grade history.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read.
    fn teachers(&self) -> Result<Vec<Teacher>, Self::Error>;
}

/// Supplies preference submissions.
pub trait PreferenceStore {
    /// Error type for reads.
    type Error;

    /// Returns every submission for `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the submissions cannot be read.
    fn preferences(&self, year: SchoolYear) -> Result<Vec<Preference>, Self::Error>;
}

/// Supplies grade settings.
pub trait SettingsStore {
    /// Error type for reads.
    type Error;

    /// Returns the rows configured for `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    fn grade_settings(&self, year: SchoolYear) -> Result<Vec<GradeSetting>, Self::Error>;
}

/// Receives the output of a run.
pub trait ResultSink {
    /// Error type for writes.
    type Error;

    /// Replaces any previous result for the run's year with `run`, and
    /// appends `event` to the year's history.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be written.
    fn write_run(&mut self, run: AssignmentRun, event: AuditEvent) -> Result<(), Self::Error>;
}

/// Reads every input for `year` into a [`Snapshot`].
///
/// # Errors
///
/// Returns the first read error from `store`.
pub fn take_snapshot<S, E>(store: &S, year: SchoolYear) -> Result<Snapshot, E>
where
    S: RosterProvider<Error = E> + PreferenceStore<Error = E> + SettingsStore<Error = E>,
{
    Ok(Snapshot::new(
        store.teachers()?,
        store.preferences(year)?,
        store.grade_settings(year)?,
    ))
}
