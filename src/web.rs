//! Web dashboard and JSON API.
//!
//! ## Endpoints
//!
//! - `GET /` - HTML dashboard
//! - `GET /api/tasks` - task collection
//! - `POST /api/tasks` - create a task from `{name, platform?, frequency?}`
//! - `POST /api/tasks/{selector}/toggle` - activate/pause a task
//! - `DELETE /api/tasks/{selector}` - delete a task
//! - `GET /api/logs` - activity log tail
//! - `GET /api/platforms` - platform connection status
//! - `POST /api/notes` - append `{text}` to today's report
//!
//! Store calls are blocking file I/O and run on the blocking pool; the store
//! lock serializes concurrent mutations.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

use crate::dashboard::DashboardView;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::task::{NewTask, TaskQuery};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct AppState {
    deck: Arc<Deck>,
}

/// Build the dashboard router for a deck
pub fn router(deck: Arc<Deck>) -> Router {
    Router::new()
        .route("/", get(handle_dashboard))
        .route("/api/tasks", get(handle_list_tasks).post(handle_create_task))
        .route("/api/tasks/{selector}/toggle", post(handle_toggle_task))
        .route(
            "/api/tasks/{selector}",
            axum::routing::delete(handle_delete_task),
        )
        .route("/api/logs", get(handle_logs))
        .route("/api/platforms", get(handle_platforms))
        .route("/api/notes", post(handle_add_note))
        .with_state(AppState { deck })
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn serve(deck: Arc<Deck>, host: &str, port: u16) -> Result<SocketAddr> {
    let listener = bind(host, port).await?;
    serve_until(deck, listener, shutdown_signal()).await
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let bind_addr = format!("{host}:{port}");
    TcpListener::bind(&bind_addr).await.map_err(|e| {
        Error::OperationFailed(format!("dashboard bind to {bind_addr} failed: {e}"))
    })
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_until<F>(
    deck: Arc<Deck>,
    listener: TcpListener,
    shutdown: F,
) -> Result<SocketAddr>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;

    info!("dashboard listening on http://{addr}");
    deck.log_event("Dashboard started");

    axum::serve(listener, router(Arc::clone(&deck)))
        .with_graceful_shutdown(shutdown)
        .await?;

    deck.log_event("Dashboard stopped");
    Ok(addr)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
            err if err.is_user_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "ok": false, "error": self.0.to_string() }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

/// Run a blocking deck operation on the blocking pool
async fn with_deck<T, F>(state: &AppState, op: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce(&Deck) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let deck = Arc::clone(&state.deck);
    tokio::task::spawn_blocking(move || op(&deck))
        .await
        .map_err(|err| ApiError(Error::OperationFailed(format!("worker failed: {err}"))))?
        .map_err(ApiError)
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /`
async fn handle_dashboard(
    State(state): State<AppState>,
) -> std::result::Result<Html<String>, ApiError> {
    let html = with_deck(&state, |deck| {
        let tasks = deck.tasks()?;
        let logs = deck.recent_logs(deck.config().web.dashboard_log_lines)?;
        DashboardView::build(&tasks, deck.tokens(), logs, &deck.config().dashboard).render()
    })
    .await?;
    Ok(Html(html))
}

/// `GET /api/tasks`
async fn handle_list_tasks(
    State(state): State<AppState>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let tasks = with_deck(&state, |deck| deck.tasks()).await?;
    Ok(Json(json!({ "ok": true, "tasks": tasks })))
}

/// `POST /api/tasks`
async fn handle_create_task(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewTask>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(new_task) = payload
        .map_err(|rejection| Error::InvalidArgument(format!("invalid body: {rejection}")))?;
    let task = with_deck(&state, move |deck| deck.create_task(new_task)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "task": task }))).into_response())
}

/// `POST /api/tasks/{selector}/toggle`
async fn handle_toggle_task(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let query = TaskQuery::parse(&selector)?;
    let task = with_deck(&state, move |deck| deck.toggle_task(&query)).await?;
    Ok(Json(json!({ "ok": true, "task": task })))
}

/// `DELETE /api/tasks/{selector}`
async fn handle_delete_task(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let query = TaskQuery::parse(&selector)?;
    let task = with_deck(&state, move |deck| deck.delete_task(&query)).await?;
    Ok(Json(json!({ "ok": true, "task": task })))
}

/// `GET /api/logs`
async fn handle_logs(
    State(state): State<AppState>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let logs = with_deck(&state, |deck| {
        deck.recent_logs(deck.config().log.tail_lines)
    })
    .await?;
    Ok(Json(json!({ "ok": true, "logs": logs })))
}

/// `GET /api/platforms`
async fn handle_platforms(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "platforms": state.deck.tokens().statuses() }))
}

#[derive(Debug, Deserialize)]
struct NoteRequest {
    #[serde(default)]
    text: String,
}

/// `POST /api/notes`
async fn handle_add_note(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NoteRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(note) = payload
        .map_err(|rejection| Error::InvalidArgument(format!("invalid body: {rejection}")))?;
    let path = with_deck(&state, move |deck| deck.add_note(&note.text)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "path": path.display().to_string() })),
    )
        .into_response())
}
