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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod config;
mod engine;
mod error;
mod ports;
mod run;
mod snapshot;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{RunResult, apply_run};
pub use config::{EngineConfig, NoPreferencePolicy};
pub use engine::run_assignment;
pub use error::CoreError;
pub use ports::{PreferenceStore, ResultSink, RosterProvider, SettingsStore, take_snapshot};
pub use run::{AssignmentRun, ExcludedTeacher, UnfilledGrade};
pub use snapshot::Snapshot;
