//! HTTP history backend for roumate.
//!
//! Serves the REST storage API the tracker clients expect, keyed by
//! `(table, user)`:
//!
//! - `GET    /api/roulette/history?table=&user=` → `{ "history": [...] }`
//! - `POST   /api/roulette/inputs` `{ table, user, inputs }` → `{ "ok": true }`
//! - `DELETE /api/roulette/history?table=&user=` → `{ "ok": true }`
//! - `GET    /api/roulette/stats?table=&user=&window=` → full aggregate report
//! - `GET    /health`
//!
//! Each `(table, user)` pair owns an isolated session backed by a JSON file
//! under the data directory. Batch appends are atomic: one invalid outcome
//! rejects the whole request and nothing lands in history.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use roumate_core::{JsonFileStorage, TableSession, TableVariant};

/// Shared server state: one lazily-opened session per `(table, user)`.
struct AppState {
    data_dir: PathBuf,
    sessions: Mutex<HashMap<(TableVariant, String), TableSession>>,
}

#[derive(Deserialize)]
struct TableUserParams {
    table: String,
    user: Option<String>,
}

#[derive(Deserialize)]
struct StatsParams {
    table: String,
    user: Option<String>,
    window: Option<i64>,
}

#[derive(Deserialize)]
struct InputsRequest {
    table: String,
    user: Option<String>,
    inputs: Vec<u8>,
}

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<u8>,
}

#[derive(Serialize)]
struct OkResponse {
    ok: bool,
    length: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}

fn parse_table(table: &str) -> Result<TableVariant, ApiError> {
    table.parse().map_err(bad_request)
}

/// Users map to directories on disk, so only a conservative charset is
/// accepted.
fn validate_user(user: Option<String>) -> Result<String, ApiError> {
    let user = user.unwrap_or_else(|| "default".to_string());
    if user.is_empty()
        || !user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(bad_request(format!("invalid user id '{user}'")));
    }
    Ok(user)
}

impl AppState {
    /// Run `f` against the session for `(table, user)`, opening and
    /// hydrating it on first touch.
    async fn with_session<T>(
        &self,
        variant: TableVariant,
        user: &str,
        f: impl FnOnce(&mut TableSession) -> T,
    ) -> T {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry((variant, user.to_string()))
            .or_insert_with(|| {
                let dir = self.data_dir.join("users").join(user);
                let storage = JsonFileStorage::new(dir, variant);
                // The server is a storage backend; gating stays client-side.
                TableSession::new(variant, Box::new(storage), None)
            });
        f(session)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableUserParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let variant = parse_table(&params.table)?;
    let user = validate_user(params.user)?;
    let history = state
        .with_session(variant, &user, |s| s.history().to_vec())
        .await;
    Ok(Json(HistoryResponse { history }))
}

async fn handle_inputs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InputsRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let variant = parse_table(&req.table)?;
    let user = validate_user(req.user)?;
    let appended = state
        .with_session(variant, &user, |s| s.enter_many(&req.inputs))
        .await;
    match appended {
        Ok(length) => Ok(Json(OkResponse { ok: true, length })),
        Err(e) => Err(bad_request(e.to_string())),
    }
}

async fn handle_reset(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableUserParams>,
) -> Result<Json<OkResponse>, ApiError> {
    let variant = parse_table(&params.table)?;
    let user = validate_user(params.user)?;
    state
        .with_session(variant, &user, |s| s.reset())
        .await;
    Ok(Json(OkResponse { ok: true, length: 0 }))
}

async fn handle_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let variant = parse_table(&params.table)?;
    let user = validate_user(params.user)?;
    let window = params.window.unwrap_or(0);
    let report = state
        .with_session(variant, &user, |s| {
            s.set_window(window)?;
            Ok::<_, roumate_core::RouletteError>(s.aggregates().clone())
        })
        .await
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(Json(serde_json::json!({
        "table": variant.to_string(),
        "user": user,
        "window": window,
        "report": report,
    })))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let sessions = state.sessions.lock().await;
    Json(serde_json::json!({
        "status": "ok",
        "open_sessions": sessions.len(),
        "version": roumate_core::VERSION,
    }))
}

async fn handle_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Roumate History Server",
        "version": roumate_core::VERSION,
        "endpoints": {
            "/": "This API index",
            "/api/roulette/history": {
                "GET": "Stored history for ?table=&user=",
                "DELETE": "Reset history for ?table=&user=",
            },
            "/api/roulette/inputs": {
                "POST": "Append outcomes: { table, user, inputs } — atomic",
            },
            "/api/roulette/stats": {
                "GET": "Aggregate report for ?table=&user=&window=",
            },
            "/health": "Health check",
        },
        "tables": ["european", "american"],
    }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the axum router over a data directory.
pub fn build_router(data_dir: PathBuf) -> Router {
    let state = Arc::new(AppState {
        data_dir,
        sessions: Mutex::new(HashMap::new()),
    });

    Router::new()
        .route("/", get(handle_index))
        .route(
            "/api/roulette/history",
            get(handle_history).delete(handle_reset),
        )
        .route("/api/roulette/inputs", post(handle_inputs))
        .route("/api/roulette/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the history server until the process exits.
pub async fn run_server(data_dir: PathBuf, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(data_dir);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app).await
}
