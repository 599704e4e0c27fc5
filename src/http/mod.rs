//! HTTP API for the browser map client.
//!
//! Routes:
//! - `GET /get_track_data`: current track, cached or fallback
//! - `GET /get_speed`: speed over ground scraped from the status page
//! - `GET /get_waypoints`: raw waypoints file
//! - `GET /tile_sets`: available tile set names
//! - `GET /tiles/*`: tile files
//! - `GET /`: map page
//! - `GET /ping`: liveness check

pub mod routes;
pub mod server;
pub mod types;

pub use server::{create_router, run_server, AppState};
pub use types::{ErrorResponse, SpeedResponse, TrackResponse};
