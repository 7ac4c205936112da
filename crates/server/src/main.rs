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
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use rota_api::{
    ApiError, AuditTimelineResponse, CreateWindowRequest, CreateWindowResponse, EditCellsRequest,
    EditCellsResponse, ExtendWindowRequest, ExtendWindowResponse, HolidayCalendar,
    InMemoryHolidayCalendar, ListWindowsResponse, RegenerateWindowResponse, ScheduleGrid,
    SwapEmployeesRequest, SwapEmployeesResponse, WindowCommandRequest, WindowStatusResponse,
    create_window, deactivate_window, edit_cells, extend_window, get_schedule_grid,
    get_schedule_grid_csv, get_window_audit, list_windows, regenerate_window, restore_window,
    swap_employees,
};
use rota_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Rota Server - HTTP server for the Rota shift scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Optional JSON holiday calendar, `{country: {YYYY-MM-DD: name}}`
    #[arg(long)]
    holidays: Option<PathBuf>,
}

/// The store and the audit sink, locked together for a whole request.
struct Store {
    /// Scheduling data.
    persistence: Persistence,
    /// A second handle onto the same database receiving audit events.
    audit: Persistence,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Serializes every load-compute-persist sequence.
    store: Arc<Mutex<Store>>,
    /// Holiday annotations for the grid.
    holidays: Arc<dyn HolidayCalendar + Send + Sync>,
}

impl AppState {
    fn new(persistence: Persistence, holidays: InMemoryHolidayCalendar) -> Result<Self, PersistenceError> {
        let audit: Persistence = persistence.reopen()?;
        Ok(Self {
            store: Arc::new(Mutex::new(Store { persistence, audit })),
            holidays: Arc::new(holidays),
        })
    }
}

/// Query parameters for window listings.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ListWindowsQuery {
    /// Restrict to one site.
    site_id: Option<i64>,
    /// Include soft-deleted windows.
    #[serde(default)]
    include_inactive: bool,
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
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
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

/// Handler for POST `/windows`.
async fn handle_create_window(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateWindowRequest>,
) -> Result<Json<CreateWindowResponse>, HttpError> {
    info!(
        actor_id = %request.context.actor_id,
        site_id = request.site_id,
        matrix_id = request.matrix_id,
        "Handling create_window request"
    );

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: CreateWindowResponse = create_window(persistence, audit, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/windows`.
async fn handle_list_windows(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListWindowsQuery>,
) -> Result<Json<ListWindowsResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ListWindowsResponse =
        list_windows(&mut store.persistence, query.site_id, query.include_inactive)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/regenerate`.
async fn handle_regenerate_window(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<WindowCommandRequest>,
) -> Result<Json<RegenerateWindowResponse>, HttpError> {
    info!(window_id, actor_id = %request.context.actor_id, "Handling regenerate request");

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: RegenerateWindowResponse =
        regenerate_window(persistence, audit, window_id, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/extend`.
async fn handle_extend_window(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<ExtendWindowRequest>,
) -> Result<Json<ExtendWindowResponse>, HttpError> {
    info!(
        window_id,
        extension_start = %request.extension_start,
        extension_end = %request.extension_end,
        "Handling extend request"
    );

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: ExtendWindowResponse = extend_window(persistence, audit, window_id, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/cells`.
async fn handle_edit_cells(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<EditCellsRequest>,
) -> Result<Json<EditCellsResponse>, HttpError> {
    info!(window_id, changes = request.changes.len(), "Handling cell edit request");

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: EditCellsResponse = edit_cells(persistence, audit, window_id, &request)?;
    drop(store);

    if !response.rejected.is_empty() {
        warn!(window_id, rejected = response.rejected.len(), "Cell edits rejected");
    }
    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/swap`.
async fn handle_swap_employees(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<SwapEmployeesRequest>,
) -> Result<Json<SwapEmployeesResponse>, HttpError> {
    info!(
        window_id,
        employee_a = request.employee_a,
        employee_b = request.employee_b,
        "Handling swap request"
    );

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: SwapEmployeesResponse = swap_employees(persistence, audit, window_id, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/deactivate`.
async fn handle_deactivate_window(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<WindowCommandRequest>,
) -> Result<Json<WindowStatusResponse>, HttpError> {
    info!(window_id, actor_id = %request.context.actor_id, "Handling deactivate request");

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: WindowStatusResponse =
        deactivate_window(persistence, audit, window_id, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/windows/{id}/restore`.
async fn handle_restore_window(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
    Json(request): Json<WindowCommandRequest>,
) -> Result<Json<WindowStatusResponse>, HttpError> {
    info!(window_id, actor_id = %request.context.actor_id, "Handling restore request");

    let mut store = app_state.store.lock().await;
    let Store { persistence, audit } = &mut *store;
    let response: WindowStatusResponse = restore_window(persistence, audit, window_id, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/windows/{id}/grid`.
async fn handle_get_grid(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
) -> Result<Json<ScheduleGrid>, HttpError> {
    let mut store = app_state.store.lock().await;
    let grid: ScheduleGrid =
        get_schedule_grid(&mut store.persistence, app_state.holidays.as_ref(), window_id)?;
    drop(store);

    Ok(Json(grid))
}

/// Handler for GET `/windows/{id}/grid.csv`.
async fn handle_get_grid_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut store = app_state.store.lock().await;
    let csv: String =
        get_schedule_grid_csv(&mut store.persistence, app_state.holidays.as_ref(), window_id)?;
    drop(store);

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

/// Handler for GET `/windows/{id}/audit`.
async fn handle_get_window_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(window_id): Path<i64>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let timeline: AuditTimelineResponse = get_window_audit(&mut store.persistence, window_id)?;
    drop(store);

    Ok(Json(timeline))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/windows", post(handle_create_window))
        .route("/windows", get(handle_list_windows))
        .route("/windows/{id}/grid", get(handle_get_grid))
        .route("/windows/{id}/grid.csv", get(handle_get_grid_csv))
        .route("/windows/{id}/regenerate", post(handle_regenerate_window))
        .route("/windows/{id}/extend", post(handle_extend_window))
        .route("/windows/{id}/cells", post(handle_edit_cells))
        .route("/windows/{id}/swap", post(handle_swap_employees))
        .route("/windows/{id}/deactivate", post(handle_deactivate_window))
        .route("/windows/{id}/restore", post(handle_restore_window))
        .route("/windows/{id}/audit", get(handle_get_window_audit))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rota Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let holidays: InMemoryHolidayCalendar = match &args.holidays {
        Some(path) => InMemoryHolidayCalendar::from_json_file(path)?,
        None => {
            info!("No holiday calendar configured; grids will carry no holidays");
            InMemoryHolidayCalendar::new()
        }
    };

    let app_state: AppState = AppState::new(persistence, holidays)?;
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
