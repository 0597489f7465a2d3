// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the homeroom grade assignment system.
//!
//! Callers hand in raw request values and get response DTOs or an
//! [`ApiError`] back. Domain, core and persistence errors never cross this
//! boundary untranslated.
//!
//! A run is split into three calls so that a server can hold its store
//! lock only while reading and writing:
//!
//! 1. [`snapshot_for_run`] reads the inputs
//! 2. [`compute_run`] runs the engine on the snapshot
//! 3. [`commit_run`] writes the result and audit event
//!
//! [`trigger_run`] does all three when the caller already has exclusive
//! access.

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
mod export;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use export::{EXPORT_HEADERS, ExportError, render_assignments_csv};
pub use handlers::{
    clear_preferences, commit_run, compute_run, derive_grade_settings, export_assignments,
    get_assignments, get_audit_timeline, get_settings, list_preferences, list_teachers,
    replace_roster, replace_settings, run_message, run_origin, snapshot_for_run,
    submit_preference, trigger_run,
};
pub use request_response::{
    AssignmentInfo, AssignmentsResponse, AuditTimelineResponse, ClearPreferencesResponse,
    GradeSettingInput, ListPreferencesResponse, ListTeachersResponse, ReplaceRosterRequest,
    ReplaceRosterResponse, ReplaceSettingsRequest, SettingsResponse, SubmitPreferenceRequest,
    SubmitPreferenceResponse, TriggerRunRequest, TriggerRunResponse, TypeCount,
};
