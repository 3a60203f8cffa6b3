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
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use slate_api::{
    ApiError, CreateExamSchedulesRequest, CreateExamSchedulesResponse, CreateSchedulesRequest,
    CreateSchedulesResponse, DeleteExamScheduleResponse, DeleteScheduleResponse,
    ListExamSchedulesRequest, ListExamSchedulesResponse, ListSchedulesRequest,
    ListSchedulesResponse, LogNotifier, NotificationSink, UpdateExamScheduleRequest,
    UpdateExamScheduleResponse, UpdateScheduleRequest, UpdateScheduleResponse,
    create_exam_schedules, create_schedules, delete_exam_schedule, delete_schedule,
    list_exam_schedules, list_schedules, update_exam_schedule, update_schedule,
};
use slate_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Slate Server - HTTP server for the Slate school scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, and the notification sink exam lifecycle
/// events are dispatched through.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for schedules and reference data.
    persistence: Arc<Mutex<Persistence>>,
    /// The notification channel for exam lifecycle events.
    notifier: Arc<dyn NotificationSink + Send + Sync>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status indicator.
    status: String,
}

/// School scope carried as a query parameter on routes without a body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchoolScope {
    /// The school the targeted row must belong to.
    school_id: i64,
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
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. }
            | ApiError::DuplicateSubject { .. }
            | ApiError::AlreadyInactive { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/schedules` endpoint.
///
/// Creates a batch of weekly schedules, all-or-nothing.
async fn handle_create_schedules(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSchedulesRequest>,
) -> Result<(StatusCode, Json<CreateSchedulesResponse>), HttpError> {
    info!(
        school_id = req.school_id,
        items = req.items.len(),
        "Handling create_schedules request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateSchedulesResponse = create_schedules(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/schedules` endpoint.
///
/// Lists active weekly schedules with optional filters and pagination.
async fn handle_list_schedules(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListSchedulesRequest>,
) -> Result<Json<ListSchedulesResponse>, HttpError> {
    info!(school_id = query.school_id, "Handling list_schedules request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSchedulesResponse = list_schedules(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/schedules/{id}` endpoint.
///
/// Applies a merge patch to one weekly schedule row.
async fn handle_update_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Json<UpdateScheduleResponse>, HttpError> {
    info!(schedule_id, "Handling update_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateScheduleResponse = update_schedule(&mut persistence, schedule_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/schedules/{id}` endpoint.
///
/// Soft-deletes one weekly schedule row within the school named in the
/// query; repeating the delete succeeds and reports the row was already
/// inactive.
async fn handle_delete_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(schedule_id): Path<i64>,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<DeleteScheduleResponse>, HttpError> {
    info!(
        schedule_id,
        school_id = scope.school_id,
        "Handling delete_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteScheduleResponse =
        delete_schedule(&mut persistence, scope.school_id, schedule_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/exam-schedules` endpoint.
///
/// Creates a batch of exam schedules with per-item outcomes.
async fn handle_create_exam_schedules(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateExamSchedulesRequest>,
) -> Result<(StatusCode, Json<CreateExamSchedulesResponse>), HttpError> {
    info!(
        school_id = req.school_id,
        exam_type = %req.exam_type,
        year = req.year,
        items = req.items.len(),
        "Handling create_exam_schedules request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut persistence, app_state.notifier.as_ref(), &req)?;
    drop(persistence);

    // Partial success is 201; a batch where nothing succeeded is 400.
    let status: StatusCode = if response.created.is_empty() && !response.errors.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(response)))
}

/// Handler for GET `/exam-schedules` endpoint.
///
/// Lists exam schedules with optional filters.
async fn handle_list_exam_schedules(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListExamSchedulesRequest>,
) -> Result<Json<ListExamSchedulesResponse>, HttpError> {
    info!(
        school_id = query.school_id,
        "Handling list_exam_schedules request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListExamSchedulesResponse = list_exam_schedules(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/exam-schedules/{id}` endpoint.
///
/// Applies a merge patch to one exam schedule row.
async fn handle_update_exam_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(exam_schedule_id): Path<i64>,
    Json(req): Json<UpdateExamScheduleRequest>,
) -> Result<Json<UpdateExamScheduleResponse>, HttpError> {
    info!(exam_schedule_id, "Handling update_exam_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateExamScheduleResponse = update_exam_schedule(
        &mut persistence,
        app_state.notifier.as_ref(),
        exam_schedule_id,
        &req,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/exam-schedules/{id}` endpoint.
///
/// Deletes one exam schedule row within the school named in the query
/// and notifies affected parties.
async fn handle_delete_exam_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(exam_schedule_id): Path<i64>,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<DeleteExamScheduleResponse>, HttpError> {
    info!(
        exam_schedule_id,
        school_id = scope.school_id,
        "Handling delete_exam_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteExamScheduleResponse = delete_exam_schedule(
        &mut persistence,
        app_state.notifier.as_ref(),
        scope.school_id,
        exam_schedule_id,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/schedules", post(handle_create_schedules))
        .route("/schedules", get(handle_list_schedules))
        .route("/schedules/{id}", put(handle_update_schedule))
        .route("/schedules/{id}", delete(handle_delete_schedule))
        .route("/exam-schedules", post(handle_create_exam_schedules))
        .route("/exam-schedules", get(handle_list_exam_schedules))
        .route("/exam-schedules/{id}", put(handle_update_exam_schedule))
        .route("/exam-schedules/{id}", delete(handle_delete_exam_schedule))
        .route("/health", get(handle_health))
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

    info!("Initializing Slate Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: Arc::new(LogNotifier),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
