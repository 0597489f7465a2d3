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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use grade_assign::{EngineConfig, NoPreferencePolicy, RunResult, Snapshot};
use grade_assign_api::{
    ApiError, AssignmentsResponse, AuditTimelineResponse, ClearPreferencesResponse,
    ListPreferencesResponse, ListTeachersResponse, ReplaceRosterRequest, ReplaceRosterResponse,
    ReplaceSettingsRequest, SettingsResponse, SubmitPreferenceRequest, SubmitPreferenceResponse,
    TriggerRunRequest, TriggerRunResponse, clear_preferences, commit_run, compute_run,
    export_assignments, get_assignments, get_audit_timeline, get_settings, list_preferences,
    list_teachers, replace_roster, replace_settings, snapshot_for_run, submit_preference,
};
use grade_assign_persistence::{Persistence, SeedData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

/// Grade Assign Server - HTTP server for homeroom grade assignment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file with the initial roster, preferences and grade settings.
    /// If not provided, the server starts empty.
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// What to do with teachers who submitted no preference (overflow or exclude)
    #[arg(long, default_value_t = NoPreferencePolicy::Overflow)]
    no_preference_policy: NoPreferencePolicy,

    /// Rule out each teacher's current grade (grades 1 and 6 stay open when ranked)
    #[arg(long)]
    enforce_rotation: bool,

    /// Grade-head positions per grade with homerooms (at most 10)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=10))]
    grade_heads_per_grade: u32,
}

impl Args {
    /// Builds the engine configuration from the command line.
    const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            no_preference_policy: self.no_preference_policy,
            enforce_rotation: self.enforce_rotation,
            grade_heads_per_grade: self.grade_heads_per_grade,
        }
    }
}

/// Application state shared across handlers.
///
/// The store mutex is held only for short reads and writes. Runs for one
/// year are serialised by that year's entry in `run_locks`, which is held
/// from snapshot to commit; preference edits never wait on it.
#[derive(Clone)]
struct AppState {
    /// The store.
    persistence: Arc<Mutex<Persistence>>,
    /// One lock per school year that has been run.
    run_locks: Arc<Mutex<HashMap<u16, Arc<Mutex<()>>>>>,
    /// Engine tunables for every run.
    config: EngineConfig,
}

impl AppState {
    fn new(persistence: Persistence, config: EngineConfig) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            run_locks: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Returns the run lock for a year, creating it on first use.
    async fn run_lock(&self, year: u16) -> Arc<Mutex<()>> {
        let mut locks: MutexGuard<'_, HashMap<u16, Arc<Mutex<()>>>> = self.run_locks.lock().await;
        Arc::clone(locks.entry(year).or_default())
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::DomainRuleViolation { .. } | ApiError::PreconditionFailed { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for PUT `/teachers` endpoint.
async fn handle_replace_roster(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ReplaceRosterRequest>,
) -> Result<Json<ReplaceRosterResponse>, HttpError> {
    info!(teachers = req.teachers.len(), "Handling replace_roster request");
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(replace_roster(&mut persistence, req)?))
}

/// Handler for GET `/teachers` endpoint.
async fn handle_list_teachers(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ListTeachersResponse> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Json(list_teachers(&persistence))
}

/// Handler for PUT `/settings/{year}` endpoint.
///
/// School-wide subject-teacher and duty-head totals are split over the
/// grades before storing.
async fn handle_replace_settings(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
    Json(req): Json<ReplaceSettingsRequest>,
) -> Result<Json<SettingsResponse>, HttpError> {
    info!(year, grades = req.grades.len(), "Handling replace_settings request");
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(replace_settings(&mut persistence, year, &req)?))
}

/// Handler for GET `/settings/{year}` endpoint.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Json<SettingsResponse>, HttpError> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(get_settings(&persistence, year)?))
}

/// Handler for PUT `/preferences/{year}/{teacher_id}` endpoint.
async fn handle_submit_preference(
    AxumState(app_state): AxumState<AppState>,
    Path((year, teacher_id)): Path<(u16, i64)>,
    Json(req): Json<SubmitPreferenceRequest>,
) -> Result<Json<SubmitPreferenceResponse>, HttpError> {
    info!(year, teacher_id, "Handling submit_preference request");
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(submit_preference(
        &mut persistence,
        year,
        teacher_id,
        req,
    )?))
}

/// Handler for GET `/preferences/{year}` endpoint.
async fn handle_list_preferences(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Json<ListPreferencesResponse>, HttpError> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(list_preferences(&persistence, year)?))
}

/// Handler for DELETE `/preferences/{year}` endpoint.
async fn handle_clear_preferences(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Json<ClearPreferencesResponse>, HttpError> {
    info!(year, "Handling clear_preferences request");
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(clear_preferences(&mut persistence, year)?))
}

/// Handler for POST `/assign/{year}` endpoint.
///
/// Holds the year's run lock from snapshot to commit. The store lock is
/// released while the engine runs.
async fn handle_run_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
    Json(req): Json<TriggerRunRequest>,
) -> Result<Json<TriggerRunResponse>, HttpError> {
    info!(year, actor_id = ?req.actor_id, "Handling run_assignment request");

    let year_lock: Arc<Mutex<()>> = app_state.run_lock(year).await;
    let run_guard: MutexGuard<'_, ()> = year_lock.lock().await;

    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let snapshot: Snapshot = snapshot_for_run(&persistence, year)?;
    drop(persistence);

    let result: RunResult = compute_run(&snapshot, year, &app_state.config, &req)?;

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let response: TriggerRunResponse = commit_run(&mut persistence, result)?;
    drop(persistence);
    drop(run_guard);

    if response.complete {
        info!(year, placed = response.placed, "Assignment run complete");
    } else {
        warn!(
            year,
            unplaced = response.unplaced_teachers.len(),
            "Assignment run finished with unplaced teachers"
        );
    }

    Ok(Json(response))
}

/// Handler for GET `/assignments/{year}` endpoint.
async fn handle_get_assignments(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Json<AssignmentsResponse>, HttpError> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(get_assignments(&persistence, year)?))
}

/// Handler for GET `/assignments/{year}/export` endpoint.
///
/// Returns the stored result as a CSV attachment.
async fn handle_export_assignments(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Response, HttpError> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let csv: String = export_assignments(&persistence, year)?;
    drop(persistence);

    let headers: [(header::HeaderName, String); 2] = [
        (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"assignments_{year}.csv\""),
        ),
    ];
    Ok((headers, csv).into_response())
}

/// Handler for GET `/audit/{year}` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<u16>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    Ok(Json(get_audit_timeline(&persistence, year)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/teachers",
            put(handle_replace_roster).get(handle_list_teachers),
        )
        .route(
            "/settings/{year}",
            put(handle_replace_settings).get(handle_get_settings),
        )
        .route(
            "/preferences/{year}",
            get(handle_list_preferences).delete(handle_clear_preferences),
        )
        .route(
            "/preferences/{year}/{teacher_id}",
            put(handle_submit_preference),
        )
        .route("/assign/{year}", post(handle_run_assignment))
        .route("/assignments/{year}", get(handle_get_assignments))
        .route(
            "/assignments/{year}/export",
            get(handle_export_assignments),
        )
        .route("/audit/{year}", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Grade Assign Server");

    let persistence: Persistence = if let Some(seed_path) = &args.seed {
        info!("Seeding store from: {}", seed_path.display());
        Persistence::from_seed(SeedData::from_file(seed_path)?)
    } else {
        info!("Starting with an empty store");
        Persistence::new_in_memory()
    };

    let config: EngineConfig = args.engine_config();
    info!(
        no_preference_policy = %config.no_preference_policy,
        enforce_rotation = config.enforce_rotation,
        grade_heads_per_grade = config.grade_heads_per_grade,
        "Engine configured"
    );

    let app: Router = build_router(AppState::new(persistence, config));

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
