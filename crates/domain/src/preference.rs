// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Preference resolution: turning a submission into ranked, eligible choices.
//!
//! Slot decoding follows the submission form. When `wants_subject_teacher`
//! is set, the first empty slot is the subject-teacher choice. Ranks keep
//! their slot position, so a gap in the submission leaves a gap in ranks.
//!
//! Choices the eligibility rules reject are dropped here and reported
//! separately so the engine can explain them.

use crate::eligibility::{EligibilityRules, Ineligibility};
use crate::types::{Choice, Grade, Preference, Teacher};

/// The position of a choice in a teacher's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// First choice.
    First,
    /// Second choice.
    Second,
    /// Third choice.
    Third,
}

impl Rank {
    /// Ranks in submission order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based rank number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Ordinal label used in rationale text.
    #[must_use]
    pub const fn ordinal(self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }
}

/// A decoded choice together with its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedChoice {
    /// What the teacher asked for.
    pub choice: Choice,
    /// Where it sat in the submission.
    pub rank: Rank,
}

/// A choice the eligibility rules removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedChoice {
    /// The grade that was ruled out.
    pub grade: Grade,
    /// Where it sat in the submission.
    pub rank: Rank,
    /// The rule that ruled it out.
    pub reason: Ineligibility,
}

/// The resolver's full answer for one teacher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPreference {
    /// Eligible choices, best first.
    pub choices: Vec<RankedChoice>,
    /// Choices removed by eligibility rules.
    pub rejected: Vec<RejectedChoice>,
    /// Raw slot values that are not valid grade numbers.
    pub invalid_slots: Vec<(Rank, u8)>,
}

/// Decodes the three submission slots into choices, ignoring eligibility.
#[must_use]
pub fn decode_choices(preference: &Preference) -> Vec<(Rank, Result<Choice, u8>)> {
    let mut subject_placed: bool = !preference.wants_subject_teacher;
    let mut decoded: Vec<(Rank, Result<Choice, u8>)> = Vec::new();

    for (rank, slot) in Rank::ALL.into_iter().zip(preference.slots()) {
        match slot {
            Some(value) => {
                let choice: Result<Choice, u8> = Grade::new(value)
                    .map(Choice::Grade)
                    .map_err(|_| value);
                decoded.push((rank, choice));
            }
            None if !subject_placed => {
                subject_placed = true;
                decoded.push((rank, Ok(Choice::SubjectTeacher)));
            }
            None => {}
        }
    }

    decoded
}

/// Orders a teacher's eligible choices by rank.
///
/// A teacher with no preference record has no ranked choices. A grade that
/// appears in more than one slot is kept at its best rank only.
#[must_use]
pub fn ranked_choices(
    teacher: &Teacher,
    preference: Option<&Preference>,
    rules: &EligibilityRules,
) -> ResolvedPreference {
    let mut resolved: ResolvedPreference = ResolvedPreference::default();
    let Some(pref) = preference else {
        return resolved;
    };

    for (rank, decoded) in decode_choices(pref) {
        let choice: Choice = match decoded {
            Ok(choice) => choice,
            Err(value) => {
                resolved.invalid_slots.push((rank, value));
                continue;
            }
        };

        if resolved.choices.iter().any(|c| c.choice == choice)
            || resolved
                .rejected
                .iter()
                .any(|r| Choice::Grade(r.grade) == choice)
        {
            continue;
        }

        match choice {
            Choice::SubjectTeacher => resolved.choices.push(RankedChoice { choice, rank }),
            Choice::Grade(grade) => match rules.check(teacher, preference, grade) {
                Ok(()) => resolved.choices.push(RankedChoice { choice, rank }),
                Err(reason) => resolved.rejected.push(RejectedChoice {
                    grade,
                    rank,
                    reason,
                }),
            },
        }
    }

    resolved
}
