// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage for the homeroom grade assignment system.
//!
//! Everything lives in memory. A store can be seeded from a JSON document
//! holding the roster, preferences and grade settings, which is how the
//! server is started against real school data.
//!
//! ## Concurrency
//!
//! `Persistence` is a plain value with no interior locking. Callers that
//! share it wrap it in a mutex and keep critical sections short: take a
//! [`Snapshot`](grade_assign::Snapshot) under the lock, run the engine
//! without it, then re-acquire it to write the result.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod seed;

#[cfg(test)]
mod tests;

use grade_assign::{AssignmentRun, PreferenceStore, ResultSink, RosterProvider, SettingsStore};
use grade_assign_audit::AuditEvent;
use grade_assign_domain::{Grade, GradeSetting, Preference, SchoolYear, Teacher, TeacherId};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub use error::PersistenceError;
pub use seed::SeedData;

/// In-memory store for the roster, preferences, settings and run results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Persistence {
    teachers: BTreeMap<TeacherId, Teacher>,
    preferences: BTreeMap<(SchoolYear, TeacherId), Preference>,
    settings: BTreeMap<(SchoolYear, Grade), GradeSetting>,
    runs: BTreeMap<SchoolYear, AssignmentRun>,
    audit: BTreeMap<SchoolYear, Vec<AuditEvent>>,
}

impl Persistence {
    /// Creates an empty store.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self::default()
    }

    /// Creates a store holding the contents of a seed document.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let mut store: Self = Self::new_in_memory();
        store.replace_roster(seed.teachers);
        for preference in seed.preferences {
            store
                .preferences
                .insert((preference.year, preference.teacher_id), preference);
        }
        for setting in seed.settings {
            store.settings.insert((setting.year, setting.grade), setting);
        }
        info!(
            teachers = store.teachers.len(),
            preferences = store.preferences.len(),
            settings = store.settings.len(),
            "Store seeded"
        );
        store
    }

    /// Replaces the whole roster.
    pub fn replace_roster(&mut self, teachers: Vec<Teacher>) {
        self.teachers = teachers.into_iter().map(|t| (t.id, t)).collect();
        debug!(teachers = self.teachers.len(), "Roster replaced");
    }

    /// Lists the roster ordered by teacher ID.
    #[must_use]
    pub fn list_teachers(&self) -> Vec<Teacher> {
        self.teachers.values().cloned().collect()
    }

    /// Looks up one teacher.
    #[must_use]
    pub fn get_teacher(&self, teacher_id: TeacherId) -> Option<&Teacher> {
        self.teachers.get(&teacher_id)
    }

    /// Inserts or replaces a teacher's preference for its year.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TeacherNotFound` if the teacher is not on
    /// the roster.
    pub fn upsert_preference(&mut self, preference: Preference) -> Result<(), PersistenceError> {
        if !self.teachers.contains_key(&preference.teacher_id) {
            return Err(PersistenceError::TeacherNotFound(preference.teacher_id));
        }
        debug!(
            year = %preference.year,
            teacher_id = %preference.teacher_id,
            "Preference stored"
        );
        self.preferences
            .insert((preference.year, preference.teacher_id), preference);
        Ok(())
    }

    /// Lists preferences for a year, ordered by teacher ID.
    #[must_use]
    pub fn list_preferences(&self, year: SchoolYear) -> Vec<Preference> {
        self.preferences
            .range((year, TeacherId::new(i64::MIN))..=(year, TeacherId::new(i64::MAX)))
            .map(|(_, p)| p.clone())
            .collect()
    }

    /// Deletes every preference for a year. Returns how many were removed.
    ///
    /// Stored assignment runs are left as they are.
    pub fn clear_preferences(&mut self, year: SchoolYear) -> usize {
        let before: usize = self.preferences.len();
        self.preferences.retain(|(y, _), _| *y != year);
        let removed: usize = before - self.preferences.len();
        info!(year = %year, removed, "Preferences cleared");
        removed
    }

    /// Replaces the grade settings for a year.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::YearMismatch` if a row belongs to another
    /// year. Nothing is written in that case.
    pub fn replace_grade_settings(
        &mut self,
        year: SchoolYear,
        settings: Vec<GradeSetting>,
    ) -> Result<(), PersistenceError> {
        if let Some(stray) = settings.iter().find(|s| s.year != year) {
            return Err(PersistenceError::YearMismatch {
                expected: year,
                found: stray.year,
            });
        }
        self.settings.retain(|(y, _), _| *y != year);
        for setting in settings {
            self.settings.insert((year, setting.grade), setting);
        }
        debug!(year = %year, "Grade settings replaced");
        Ok(())
    }

    /// Lists the grade settings for a year, ordered by grade.
    #[must_use]
    pub fn list_grade_settings(&self, year: SchoolYear) -> Vec<GradeSetting> {
        self.settings
            .iter()
            .filter(|((y, _), _)| *y == year)
            .map(|(_, s)| s.clone())
            .collect()
    }

    /// Returns the stored run for a year.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RunNotFound` if no run has been written.
    pub fn get_assignment_run(&self, year: SchoolYear) -> Result<&AssignmentRun, PersistenceError> {
        self.runs.get(&year).ok_or(PersistenceError::RunNotFound(year))
    }

    /// Appends an audit event to its year's history.
    pub fn persist_audit_event(&mut self, event: AuditEvent) {
        debug!(year = %event.year, action = %event.action.name, "Audit event recorded");
        self.audit.entry(event.year).or_default().push(event);
    }

    /// Returns the audit history for a year, oldest first.
    #[must_use]
    pub fn get_audit_timeline(&self, year: SchoolYear) -> Vec<AuditEvent> {
        self.audit.get(&year).cloned().unwrap_or_default()
    }
}

impl RosterProvider for Persistence {
    type Error = PersistenceError;

    fn teachers(&self) -> Result<Vec<Teacher>, Self::Error> {
        Ok(self.list_teachers())
    }
}

impl PreferenceStore for Persistence {
    type Error = PersistenceError;

    fn preferences(&self, year: SchoolYear) -> Result<Vec<Preference>, Self::Error> {
        Ok(self.list_preferences(year))
    }
}

impl SettingsStore for Persistence {
    type Error = PersistenceError;

    fn grade_settings(&self, year: SchoolYear) -> Result<Vec<GradeSetting>, Self::Error> {
        Ok(self.list_grade_settings(year))
    }
}

impl ResultSink for Persistence {
    type Error = PersistenceError;

    fn write_run(&mut self, run: AssignmentRun, event: AuditEvent) -> Result<(), Self::Error> {
        if event.year != run.year {
            return Err(PersistenceError::YearMismatch {
                expected: run.year,
                found: event.year,
            });
        }
        info!(
            year = %run.year,
            assignments = run.assignments.len(),
            "Assignment run stored"
        );
        self.runs.insert(run.year, run);
        self.persist_audit_event(event);
        Ok(())
    }
}
