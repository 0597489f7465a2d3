// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::rules::SpecialCondition;
use serde::{Deserialize, Serialize};

/// Number of grades the school runs. Grades are numbered `1..=GRADE_COUNT`.
pub const GRADE_COUNT: u8 = 6;

/// A teacher's canonical identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeacherId(i64);

impl TeacherId {
    /// Creates a new `TeacherId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The school year an assignment run targets (e.g., 2026).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchoolYear(u16);

impl SchoolYear {
    /// Creates a new `SchoolYear`.
    #[must_use]
    pub const fn new(year: u16) -> Self {
        Self(year)
    }

    /// Returns the year value.
    #[must_use]
    pub const fn year(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SchoolYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated grade number.
///
/// Construction fails for anything outside `1..=GRADE_COUNT`, so holding a
/// `Grade` means the value is a grade the school actually runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// Creates a new `Grade`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGrade` if `value` is not in `1..=6`.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=GRADE_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidGrade { value })
        }
    }

    /// Returns the grade number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based position of this grade, for indexing per-grade tables.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Iterates every grade in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=GRADE_COUNT).map(Self)
    }
}

impl TryFrom<u8> for Grade {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "grade {}", self.0)
    }
}

/// A leadership role a teacher currently holds.
///
/// Regulation priority follows the role: duty heads by division (first
/// division first), then subject specialists, then grade heads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// No leadership role.
    #[default]
    None,
    /// Head of a grade team.
    GradeHead,
    /// Holds a designated subject-specialist post. Distinct from the fixed
    /// subject-teacher track: the holder still homerooms.
    SubjectSpecialist,
    /// Head of an administrative duty division.
    DutyHead {
        /// Division rank, starting at 1. Divisions past the third share
        /// the third division's priority.
        division: u8,
        /// Division name, as entered by the school (e.g., "academic affairs").
        #[serde(default)]
        detail: String,
    },
}

impl Role {
    /// Returns the regulation priority bucket for this role.
    ///
    /// Lower buckets are placed first. `None` means the role carries no
    /// placement entitlement.
    #[must_use]
    pub const fn priority_bucket(&self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::DutyHead { division: 1, .. } => Some(0),
            Self::DutyHead { division: 2, .. } => Some(1),
            Self::DutyHead { .. } => Some(2),
            Self::SubjectSpecialist => Some(3),
            Self::GradeHead => Some(4),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::GradeHead => write!(f, "grade head"),
            Self::SubjectSpecialist => write!(f, "subject specialist"),
            Self::DutyHead { division, detail } if detail.is_empty() => {
                write!(f, "division {division} duty head")
            }
            Self::DutyHead { division, detail } => {
                write!(f, "division {division} duty head ({detail})")
            }
        }
    }
}

/// One year of homeroom duty recorded against a teacher at this school.
///
/// The grade is kept as the raw number so that malformed rows survive
/// import and can be reported instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeHistoryEntry {
    /// The school year the teacher held the homeroom.
    pub year: u16,
    /// The grade number as recorded.
    pub grade: u8,
}

impl GradeHistoryEntry {
    /// Creates a new history entry.
    #[must_use]
    pub const fn new(year: u16, grade: u8) -> Self {
        Self { year, grade }
    }

    /// Returns the grade if the recorded number is valid.
    #[must_use]
    pub fn valid_grade(&self) -> Option<Grade> {
        Grade::new(self.grade).ok()
    }
}

/// Which placement track a teacher is on for the coming year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Eligible for homeroom placement.
    Homeroom,
    /// Fixed as a subject teacher; never placed in a homeroom.
    SubjectTeacher,
    /// The record carries neither status (or, inconsistently, both).
    Unclassified,
}

/// A teacher on the school roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// The teacher's canonical identifier.
    pub id: TeacherId,
    /// Display name.
    pub name: String,
    /// Whether the teacher holds a homeroom in the current year.
    #[serde(default)]
    pub is_homeroom_current: bool,
    /// The grade currently homeroomed, if any.
    #[serde(default)]
    pub current_grade: Option<Grade>,
    /// The class currently homeroomed, as the school labels it.
    #[serde(default)]
    pub current_class: Option<String>,
    /// Whether the teacher is fixed as a subject teacher.
    #[serde(default)]
    pub is_subject_teacher: bool,
    /// Year the teacher joined this school.
    #[serde(default)]
    pub school_join_year: Option<u16>,
    /// Year the teacher was first hired.
    #[serde(default)]
    pub hire_year: Option<u16>,
    /// Leadership role currently held.
    #[serde(default)]
    pub role: Role,
    /// Circumstance governed by an explicit regulation.
    #[serde(default)]
    pub special_condition: Option<SpecialCondition>,
    /// Homerooms held at this school, oldest first.
    #[serde(default)]
    pub grade_history: Vec<GradeHistoryEntry>,
}

impl Teacher {
    /// Creates a teacher with no status flags, role, or history.
    #[must_use]
    pub const fn new(id: TeacherId, name: String) -> Self {
        Self {
            id,
            name,
            is_homeroom_current: false,
            current_grade: None,
            current_class: None,
            is_subject_teacher: false,
            school_join_year: None,
            hire_year: None,
            role: Role::None,
            special_condition: None,
            grade_history: Vec::new(),
        }
    }

    /// Determines the teacher's placement track.
    ///
    /// A record flagged both ways violates the roster invariant and is
    /// treated the same as one flagged neither way.
    #[must_use]
    pub const fn track(&self) -> Track {
        match (self.is_homeroom_current, self.is_subject_teacher) {
            (true, false) => Track::Homeroom,
            (false, true) => Track::SubjectTeacher,
            _ => Track::Unclassified,
        }
    }

    /// Counts how many times the teacher has homeroomed `grade` here.
    ///
    /// Malformed history entries never match.
    #[must_use]
    pub fn times_homeroomed(&self, grade: Grade) -> usize {
        self.grade_history
            .iter()
            .filter(|entry| entry.valid_grade() == Some(grade))
            .count()
    }

    /// Returns whether any history entry records an invalid grade.
    #[must_use]
    pub fn has_malformed_history(&self) -> bool {
        self.grade_history
            .iter()
            .any(|entry| entry.valid_grade().is_none())
    }
}

/// One ranked choice a teacher can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "grade", rename_all = "snake_case")]
pub enum Choice {
    /// A homeroom in the given grade.
    Grade(Grade),
    /// Subject teaching instead of a homeroom.
    SubjectTeacher,
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grade(grade) => write!(f, "{grade}"),
            Self::SubjectTeacher => write!(f, "subject teacher"),
        }
    }
}

/// A teacher's preference submission for one school year.
///
/// The three slots use the submission form's encoding: a grade number, or
/// `None`. When `wants_subject_teacher` is set, the first `None` slot is the
/// subject-teacher choice; every other `None` slot is simply empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// The submitting teacher.
    pub teacher_id: TeacherId,
    /// The school year the preference applies to.
    pub year: SchoolYear,
    /// First choice grade.
    #[serde(default)]
    pub first_choice_grade: Option<u8>,
    /// Second choice grade.
    #[serde(default)]
    pub second_choice_grade: Option<u8>,
    /// Third choice grade.
    #[serde(default)]
    pub third_choice_grade: Option<u8>,
    /// Asks to serve as a grade head.
    #[serde(default)]
    pub wants_grade_head: bool,
    /// One of the empty slots means subject teaching.
    #[serde(default)]
    pub wants_subject_teacher: bool,
    /// Asks to serve as a duty head.
    #[serde(default)]
    pub wants_duty_head: bool,
    /// Free text; carries the duty division when `wants_duty_head` is set.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Preference {
    /// Creates an empty preference for a teacher and year.
    #[must_use]
    pub const fn new(teacher_id: TeacherId, year: SchoolYear) -> Self {
        Self {
            teacher_id,
            year,
            first_choice_grade: None,
            second_choice_grade: None,
            third_choice_grade: None,
            wants_grade_head: false,
            wants_subject_teacher: false,
            wants_duty_head: false,
            comment: None,
        }
    }

    /// Returns the three raw slots in rank order.
    #[must_use]
    pub const fn slots(&self) -> [Option<u8>; 3] {
        [
            self.first_choice_grade,
            self.second_choice_grade,
            self.third_choice_grade,
        ]
    }
}

/// Per-grade staffing requirements for one school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSetting {
    /// The school year.
    pub year: SchoolYear,
    /// The grade.
    pub grade: Grade,
    /// Number of classes in the grade.
    pub class_count: u32,
    /// Homeroom teachers needed (the grade's placement capacity).
    pub required_homerooms: u32,
    /// This grade's share of the school-wide subject-teacher total.
    #[serde(default)]
    pub required_subject_teachers: u32,
    /// This grade's share of the school-wide duty-head total.
    #[serde(default)]
    pub required_duty_heads: u32,
}

/// Where a teacher ends up after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "grade", rename_all = "snake_case")]
pub enum Placement {
    /// Homeroom in the given grade.
    Grade(Grade),
    /// Subject teacher pool.
    SubjectTeacher,
    /// No feasible placement remained.
    Unplaced,
}

impl Placement {
    /// Returns the homeroom grade, if this placement is one.
    #[must_use]
    pub const fn grade(self) -> Option<Grade> {
        match self {
            Self::Grade(grade) => Some(grade),
            Self::SubjectTeacher | Self::Unplaced => None,
        }
    }
}

impl From<Choice> for Placement {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Grade(grade) => Self::Grade(grade),
            Choice::SubjectTeacher => Self::SubjectTeacher,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grade(grade) => write!(f, "{grade}"),
            Self::SubjectTeacher => write!(f, "subject teacher"),
            Self::Unplaced => write!(f, "unplaced"),
        }
    }
}

/// How a placement was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentType {
    /// Placed under an explicit regulation entitlement.
    RegulationPriority,
    /// Placed in the first-ranked choice.
    FirstChoice,
    /// Placed in the second-ranked choice.
    SecondChoice,
    /// Placed in the third-ranked choice.
    ThirdChoice,
    /// Fixed subject teacher placed in the subject-teacher pool.
    SubjectTeacherTrack,
    /// Placed outside the ranked choices because they were exhausted.
    ForcedOverflow,
    /// Could not be placed.
    Unplaced,
}

impl AssignmentType {
    /// Converts this type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RegulationPriority => "regulation-priority",
            Self::FirstChoice => "first-choice",
            Self::SecondChoice => "second-choice",
            Self::ThirdChoice => "third-choice",
            Self::SubjectTeacherTrack => "subject-teacher-track",
            Self::ForcedOverflow => "forced-overflow",
            Self::Unplaced => "unplaced",
        }
    }

    /// All types, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::RegulationPriority,
        Self::FirstChoice,
        Self::SecondChoice,
        Self::ThirdChoice,
        Self::SubjectTeacherTrack,
        Self::ForcedOverflow,
        Self::Unplaced,
    ];
}

impl std::fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One teacher's result for a school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The teacher.
    pub teacher_id: TeacherId,
    /// The school year.
    pub year: SchoolYear,
    /// Where the teacher was placed.
    pub placement: Placement,
    /// How the placement was decided.
    pub assignment_type: AssignmentType,
    /// Citation of the governing rule.
    pub rule_reference: Option<String>,
    /// Human-readable rationale.
    pub description: String,
    /// Granted a grade-head slot.
    pub grade_head: bool,
    /// Granted a duty-head slot.
    pub duty_head: bool,
}
