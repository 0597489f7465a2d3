// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use grade_assign_domain::{SchoolYear, TeacherId};
use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that triggers a run or changes the
/// inputs to one: an administrator, a teacher, or the system itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "teacher", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used when no caller identity is supplied.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`RunAssignment`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The engine phase a placement log line was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStep {
    /// Removed under Art. 13.
    Exclusion,
    /// Fixed subject teacher drawn from the subject pool.
    SubjectTrack,
    /// Record shape problem detected; routed to overflow.
    DataAnomaly,
    /// Left out because no preference was submitted.
    NoPreference,
    /// Placed ahead of general placement.
    RegulationPriority,
    /// Placed from ranked choices.
    Preference,
    /// Placed outside ranked choices, or left unplaced.
    Overflow,
    /// Grade-head or duty-head request decided.
    RoleRequest,
}

impl std::fmt::Display for PlacementStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            Self::Exclusion => "exclusion",
            Self::SubjectTrack => "subject track",
            Self::DataAnomaly => "data anomaly",
            Self::NoPreference => "no preference",
            Self::RegulationPriority => "regulation priority",
            Self::Preference => "preference",
            Self::Overflow => "overflow",
            Self::RoleRequest => "role request",
        };
        write!(f, "{label}")
    }
}

/// One line of the per-teacher trace an assignment run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementLog {
    /// The teacher the line is about.
    pub teacher_id: TeacherId,
    /// The phase that wrote it.
    pub step: PlacementStep,
    /// What happened.
    pub message: String,
}

impl PlacementLog {
    /// Creates a new log line.
    #[must_use]
    pub const fn new(teacher_id: TeacherId, step: PlacementStep, message: String) -> Self {
        Self {
            teacher_id,
            step,
            message,
        }
    }
}

/// An immutable record of one completed action against a school year.
///
/// Every assignment run produces exactly one audit event, capturing:
/// - Who triggered it (actor)
/// - Why (cause)
/// - What was done (action)
/// - The outcome in one line (summary)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated the action.
    pub actor: Actor,
    /// The reason for the action.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The school year acted upon.
    pub year: SchoolYear,
    /// One-line outcome.
    pub summary: String,
    /// ISO 8601 timestamp of when the event was recorded.
    pub recorded_at: String,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the action
    /// * `cause` - The reason for the action
    /// * `action` - The action that was performed
    /// * `year` - The school year acted upon
    /// * `summary` - One-line outcome
    /// * `recorded_at` - When the event was recorded
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        year: SchoolYear,
        summary: String,
        recorded_at: String,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            year,
            summary,
            recorded_at,
        }
    }

    /// Creates an event stamped with the current UTC time.
    #[must_use]
    pub fn now(actor: Actor, cause: Cause, action: Action, year: SchoolYear, summary: String) -> Self {
        Self::new(actor, cause, action, year, summary, timestamp_now())
    }
}

/// Formats the current UTC time as ISO 8601.
#[must_use]
pub fn timestamp_now() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| String::from("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(summary: &str) -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-456"), String::from("Run requested")),
            Action::new(String::from("RunAssignment"), None),
            SchoolYear::new(2026),
            String::from(summary),
            String::from("2026-03-01T09:00:00.000000000Z"),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("user-123"), String::from("teacher"));

        assert_eq!(actor.id, "user-123");
        assert_eq!(actor.actor_type, "teacher");
    }

    #[test]
    fn test_system_actor() {
        let actor: Actor = Actor::system();
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("ClearPreferences"),
            Some(String::from("12 records removed")),
        );

        assert_eq!(action.name, "ClearPreferences");
        assert_eq!(action.details, Some(String::from("12 records removed")));
    }

    #[test]
    fn test_audit_event_keeps_year_and_summary() {
        let event: AuditEvent = create_test_event("8 placed, 0 unplaced");

        assert_eq!(event.year, SchoolYear::new(2026));
        assert_eq!(event.summary, "8 placed, 0 unplaced");
        assert_eq!(event.action.name, "RunAssignment");
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(create_test_event("a"), create_test_event("a"));
        assert_ne!(create_test_event("a"), create_test_event("b"));
    }

    #[test]
    fn test_now_stamps_a_timestamp() {
        let event: AuditEvent = AuditEvent::now(
            Actor::system(),
            Cause::new(String::from("seed"), String::from("Startup")),
            Action::new(String::from("RunAssignment"), None),
            SchoolYear::new(2026),
            String::new(),
        );
        assert!(!event.recorded_at.is_empty());
        assert_ne!(event.recorded_at, "unknown");
    }

    #[test]
    fn test_placement_step_serializes_snake_case() {
        let log: PlacementLog = PlacementLog::new(
            TeacherId::new(4),
            PlacementStep::RegulationPriority,
            String::from("placed in grade 2"),
        );
        let json: String = serde_json::to_string(&log).unwrap_or_default();

        assert!(json.contains("\"regulation_priority\""));
        assert_eq!(PlacementStep::RoleRequest.to_string(), "role request");
    }
}
