// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity tracking for one assignment run.
//!
//! A `CapacityTracker` is a plain value owned by a single run. Counters only
//! ever decrease; there is no release because each teacher is placed once.
//!
//! ## Quota split
//!
//! School-wide subject-teacher and duty-head totals are spread over the six
//! grades with [`split_evenly`]: every grade gets `total / 6`, and the first
//! `total % 6` grades (lowest grade numbers) get one more. Pooling the
//! per-grade shares therefore always gives back the school total.

use crate::types::{GRADE_COUNT, Grade, GradeSetting};
use serde::{Deserialize, Serialize};

/// Splits a school-wide total across the grades.
#[must_use]
pub fn split_evenly(total: u32) -> [u32; GRADE_COUNT as usize] {
    let grades: u32 = u32::from(GRADE_COUNT);
    let base: u32 = total / grades;
    let remainder: u32 = total % grades;

    let mut shares: [u32; GRADE_COUNT as usize] = [base; GRADE_COUNT as usize];
    for (share, position) in shares.iter_mut().zip(0..grades) {
        if position < remainder {
            *share += 1;
        }
    }
    shares
}

/// Remaining open slots during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTracker {
    homerooms: [u32; GRADE_COUNT as usize],
    subject_slots: u32,
    grade_head_slots: u32,
    duty_head_slots: u32,
}

impl CapacityTracker {
    /// Creates a tracker with explicit starting values.
    #[must_use]
    pub const fn new(
        homerooms: [u32; GRADE_COUNT as usize],
        subject_slots: u32,
        grade_head_slots: u32,
        duty_head_slots: u32,
    ) -> Self {
        Self {
            homerooms,
            subject_slots,
            grade_head_slots,
            duty_head_slots,
        }
    }

    /// Builds the starting capacity from a year's grade settings.
    ///
    /// Subject-teacher and duty-head quotas are pooled across grades. Each
    /// grade with at least one homeroom contributes `grade_heads_per_grade`
    /// grade-head slots. Totals saturate at `u32::MAX`.
    #[must_use]
    pub fn from_settings(settings: &[GradeSetting], grade_heads_per_grade: u32) -> Self {
        let mut tracker: Self = Self::new([0; GRADE_COUNT as usize], 0, 0, 0);
        for setting in settings {
            let homerooms: &mut u32 = &mut tracker.homerooms[setting.grade.index()];
            *homerooms = homerooms.saturating_add(setting.required_homerooms);
            tracker.subject_slots = tracker
                .subject_slots
                .saturating_add(setting.required_subject_teachers);
            tracker.duty_head_slots = tracker
                .duty_head_slots
                .saturating_add(setting.required_duty_heads);
            if setting.required_homerooms > 0 {
                tracker.grade_head_slots =
                    tracker.grade_head_slots.saturating_add(grade_heads_per_grade);
            }
        }
        tracker
    }

    /// Takes one homeroom slot in `grade`. Returns `false` if none remain.
    pub fn reserve(&mut self, grade: Grade) -> bool {
        take(&mut self.homerooms[grade.index()])
    }

    /// Takes one subject-teacher slot. Returns `false` if none remain.
    pub fn reserve_subject_slot(&mut self) -> bool {
        take(&mut self.subject_slots)
    }

    /// Takes one grade-head slot. Returns `false` if none remain.
    pub fn reserve_grade_head(&mut self) -> bool {
        take(&mut self.grade_head_slots)
    }

    /// Takes one duty-head slot. Returns `false` if none remain.
    pub fn reserve_duty_head(&mut self) -> bool {
        take(&mut self.duty_head_slots)
    }

    /// Open homeroom slots in `grade`.
    #[must_use]
    pub const fn remaining(&self, grade: Grade) -> u32 {
        self.homerooms[grade.index()]
    }

    /// Open homeroom slots across all grades, saturating at `u32::MAX`.
    #[must_use]
    pub fn remaining_homerooms(&self) -> u32 {
        self.homerooms
            .iter()
            .fold(0, |total: u32, open| total.saturating_add(*open))
    }

    /// Open subject-teacher slots.
    #[must_use]
    pub const fn remaining_subject_slots(&self) -> u32 {
        self.subject_slots
    }

    /// Open grade-head slots.
    #[must_use]
    pub const fn remaining_grade_head_slots(&self) -> u32 {
        self.grade_head_slots
    }

    /// Open duty-head slots.
    #[must_use]
    pub const fn remaining_duty_head_slots(&self) -> u32 {
        self.duty_head_slots
    }

    /// Picks the grade with the most open homerooms among those `allowed`.
    ///
    /// Ties go to the lowest grade number. Returns `None` when no allowed
    /// grade has an open slot.
    pub fn most_open_grade(&self, allowed: impl Fn(Grade) -> bool) -> Option<Grade> {
        Grade::all()
            .filter(|grade| self.remaining(*grade) > 0 && allowed(*grade))
            .fold(None, |best: Option<Grade>, grade| match best {
                Some(current) if self.remaining(current) >= self.remaining(grade) => Some(current),
                _ => Some(grade),
            })
    }

    /// Grades that still have open homerooms, with the open count.
    #[must_use]
    pub fn open_grades(&self) -> Vec<(Grade, u32)> {
        Grade::all()
            .map(|grade| (grade, self.remaining(grade)))
            .filter(|(_, open)| *open > 0)
            .collect()
    }
}

fn take(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}
