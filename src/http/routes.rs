//! HTTP route handlers.
//!
//! The track pipeline and speed scraper block on network I/O, so they run on
//! tokio's blocking pool.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::assets::{list_tile_sets, read_waypoints};
use crate::error::Result;
use crate::speed::fetch_speed;

use super::server::AppState;
use super::types::{ErrorResponse, SpeedResponse, TrackResponse};

/// GET /get_track_data
pub async fn get_track_data(State(state): State<AppState>) -> Response {
    let fetcher = state.fetcher.clone();
    match run_blocking(move || fetcher.get_track()).await {
        Ok(outcome) => Json(TrackResponse::ok(outcome.points)).into_response(),
        Err(message) => {
            error!(error = %message, "No track available");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TrackResponse::failed(message)),
            )
                .into_response()
        }
    }
}

/// GET /get_speed
pub async fn get_speed(State(state): State<AppState>) -> Response {
    let source = state.source.clone();
    let url = state.config.effective_speed_url();
    match run_blocking(move || fetch_speed(source.as_ref(), &url)).await {
        Ok(speed) => Json(SpeedResponse { speed }).into_response(),
        Err(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(message)),
        )
            .into_response(),
    }
}

/// GET /get_waypoints
pub async fn get_waypoints(State(state): State<AppState>) -> Response {
    let path = state.config.waypoints_path.clone();
    let (status, body) = match run_blocking(move || read_waypoints(&path)).await {
        Ok(text) => (StatusCode::OK, text),
        Err(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
    };

    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response()
}

/// GET /tile_sets
pub async fn tile_sets(State(state): State<AppState>) -> Response {
    let root = state.config.tiles_root.clone();
    match run_blocking(move || list_tile_sets(&root)).await {
        Ok(names) => Json(names).into_response(),
        Err(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(message)),
        )
            .into_response(),
    }
}

/// GET /ping
pub async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Runs `f` on the blocking pool, reducing any failure to its message.
async fn run_blocking<T, F>(f: F) -> std::result::Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            warn!(code = %err.code, "{}", err);
            Err(err.message)
        }
        Err(join_err) => Err(format!("Worker task failed: {}", join_err)),
    }
}
