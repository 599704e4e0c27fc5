//! HTTP server for the map client.
//!
//! Builds the axum router over shared state and runs it until ctrl-c.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ErrorCode, Result, TrackError};
use crate::track::{FetchSettings, TrackFetcher, TrackSource};

use super::routes::{get_speed, get_track_data, get_waypoints, ping, tile_sets};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached track pipeline.
    pub fetcher: Arc<TrackFetcher>,
    /// Upstream source, also used for the status page.
    pub source: Arc<dyn TrackSource>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates state whose fetcher and speed scraper share `source`.
    pub fn new(config: ServerConfig, source: Arc<dyn TrackSource>) -> Self {
        let fetcher = TrackFetcher::new(source.clone(), FetchSettings::from(&config));
        Self {
            fetcher: Arc::new(fetcher),
            source,
            config: Arc::new(config),
        }
    }
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    let tiles = ServeDir::new(&state.config.tiles_root);
    let index = ServeFile::new(&state.config.index_page);

    Router::new()
        .route("/get_track_data", get(get_track_data))
        .route("/get_speed", get(get_speed))
        .route("/get_waypoints", get(get_waypoints))
        .route("/tile_sets", get(tile_sets))
        .route("/ping", get(ping))
        .nest_service("/tiles", tiles)
        .route_service("/", index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router on `state.config.bind` until ctrl-c.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.bind.parse().map_err(|e| {
        TrackError::with_source(
            ErrorCode::InvalidConfig,
            format!("Invalid bind address {}", state.config.bind),
            e,
        )
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        TrackError::with_source(
            ErrorCode::InvalidConfig,
            format!("Failed to bind {}", addr),
            e,
        )
    })?;

    info!(%addr, "HTTP server listening");

    let app = create_router(state);
    tokio::select! {
        result = axum::serve(listener, app) => {
            result.map_err(|e| {
                TrackError::with_source(ErrorCode::InvalidConfig, "Server error", e)
            })?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("HTTP server stopped");
    Ok(())
}
