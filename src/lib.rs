//! vessel-track: live research-vessel track server.
//!
//! Scrapes the vessel's current track from an upstream web page, caches it
//! for a few minutes, falls back to a bundled default track when upstream is
//! unavailable, and serves it with speed, waypoints and map tiles to a
//! browser map client.
//!
//! # Modules
//!
//! - [`track`]: Scrape-parse-cache pipeline (TrackFetcher, TrackSource)
//! - [`cache`]: Time-windowed track cache
//! - [`speed`]: Speed over ground scraping
//! - [`assets`]: Waypoints file and tile-set listing
//! - [`http`]: axum router and server
//! - [`config`]: Runtime configuration (ServerConfig)
//! - [`error`]: Error types and codes (TrackError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vessel_track::{FetchSettings, HttpSource, ServerConfig, TrackFetcher};
//!
//! let config = ServerConfig::from_env();
//! let source = Arc::new(HttpSource::new(config.request_timeout())?);
//! let fetcher = TrackFetcher::new(source, FetchSettings::from(&config));
//!
//! let outcome = fetcher.get_track()?;
//! println!("{} points from {}", outcome.points.len(), outcome.origin.as_str());
//! ```

pub mod assets;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod speed;
pub mod track;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::ServerConfig;
pub use error::{ErrorCode, Result, TrackError};
pub use track::{FetchSettings, HttpSource, TrackFetcher, TrackOrigin, TrackOutcome, TrackSource};
pub use types::TrackPoint;
