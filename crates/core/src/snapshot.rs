// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use grade_assign_domain::{GradeSetting, Preference, SchoolYear, Teacher};

/// A consistent copy of every input an assignment run reads.
///
/// The engine never reaches back into a store during a run; edits made after
/// the snapshot is taken are only seen by the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// The full roster.
    pub teachers: Vec<Teacher>,
    /// Preference submissions (any year; filtered per run).
    pub preferences: Vec<Preference>,
    /// Grade settings (any year; filtered per run).
    pub settings: Vec<GradeSetting>,
}

impl Snapshot {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(
        teachers: Vec<Teacher>,
        preferences: Vec<Preference>,
        settings: Vec<GradeSetting>,
    ) -> Self {
        Self {
            teachers,
            preferences,
            settings,
        }
    }

    /// Preference submissions for `year`.
    pub fn preferences_for(&self, year: SchoolYear) -> impl Iterator<Item = &Preference> {
        self.preferences.iter().filter(move |p| p.year == year)
    }

    /// Grade settings for `year`, checked for completeness.
    ///
    /// Grades with no row simply have no capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No rows exist for the year
    /// - A grade has more than one row
    pub fn settings_for(&self, year: SchoolYear) -> Result<Vec<GradeSetting>, CoreError> {
        let rows: Vec<GradeSetting> = self
            .settings
            .iter()
            .filter(|s| s.year == year)
            .cloned()
            .collect();

        if rows.is_empty() {
            return Err(CoreError::MissingGradeSettings { year });
        }

        for (index, row) in rows.iter().enumerate() {
            if rows[..index].iter().any(|earlier| earlier.grade == row.grade) {
                return Err(CoreError::DuplicateGradeSetting {
                    year,
                    grade: row.grade,
                });
            }
        }

        Ok(rows)
    }
}
