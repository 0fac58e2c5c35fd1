//! Axum HTTP server for the grid guessing game.
//!
//! Handlers share one injected round store (`Arc<dyn RoundStore>`); there is
//! no per-session state, so concurrent rounds overwrite each other and the
//! latest `save` wins.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Start a round: generate grid, store secret, render page |
//! | GET | `/restart` | Cosmetic pause, then `{"status":"success"}` |
//! | POST | `/check` | Check `{"number": n}` against the stored secret |
//! | GET | `/health` | Health check |

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::error::{GameError, StoreError};
use crate::grid::generate;
use crate::render::render_page;
use crate::storage::RoundStore;
use crate::verifier::{parse_guess, verify};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RoundStore>,
    /// Pause applied by `/restart`. Zero skips the sleep.
    pub restart_delay: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn RoundStore>, restart_delay: Duration) -> Self {
        Self {
            store,
            restart_delay,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_home))
        .route("/restart", get(handle_restart))
        .route("/check", post(handle_check))
        .route("/health", get(handle_health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── Request/Response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct CheckRequest {
    #[serde(default)]
    number: Option<serde_json::Value>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg })))
}

fn game_error(err: GameError) -> ApiError {
    match &err {
        GameError::StoreUnavailable(e) => error!(error = %e, "round store failure"),
        GameError::InvalidInput(msg) => debug!(%msg, "rejected guess"),
    }
    error_response(err.status_code(), &err.to_string())
}

/// Run a store operation on the blocking pool; rusqlite calls block.
async fn run_blocking<T, F>(f: F) -> Result<T, GameError>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(StoreError::from)?
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let round = generate(&mut rand::rng());
    let secret = i64::from(round.secret);
    let store = Arc::clone(&state.store);
    run_blocking(move || Ok(store.save(secret)?))
        .await
        .map_err(game_error)?;
    info!(cells = round.grid.len(), "round started");
    debug!(secret = round.secret, "secret stored");
    Ok(Html(render_page(&round)))
}

async fn handle_restart(State(state): State<AppState>) -> Json<serde_json::Value> {
    if !state.restart_delay.is_zero() {
        tokio::time::sleep(state.restart_delay).await;
    }
    Json(serde_json::json!({ "status": "success" }))
}

// ── POST handlers ───────────────────────────────────────────────────

async fn handle_check(
    State(state): State<AppState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Unreadable bodies keep axum's status (400/415/422) but get a JSON error.
    let Json(req) = body.map_err(|rejection| {
        let err = GameError::InvalidInput(rejection.body_text());
        debug!(error = %err, "rejected check body");
        error_response(rejection.status(), &err.to_string())
    })?;
    let raw = req
        .number
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing number"))?;
    let guess = parse_guess(&raw).map_err(game_error)?;
    let store = Arc::clone(&state.store);
    let outcome = run_blocking(move || verify(store.as_ref(), guess))
        .await
        .map_err(game_error)?;
    Ok(Json(serde_json::json!({ "status": outcome })))
}
