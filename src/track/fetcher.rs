//! Track fetcher: the scrape-parse-cache pipeline.
//!
//! On a cache miss the fetcher loads the upstream index page, follows the
//! first `.xy` link, parses the data file and caches the result. Any failure
//! along the way degrades to the bundled default track without touching the
//! cache, so the next call retries upstream.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::cache::TrackCache;
use crate::config::ServerConfig;
use crate::error::{Result, TrackError};
use crate::types::TrackPoint;

use super::link::{find_xy_link, resolve_link};
use super::parse::{parse_fallback, parse_xy};
use super::source::TrackSource;

/// Where the points of a [`TrackOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOrigin {
    /// Served from the cache without network I/O.
    Cache,
    /// Freshly fetched from upstream.
    Remote,
    /// Loaded from the default track file after an upstream failure.
    Fallback,
}

impl TrackOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackOrigin::Cache => "cache",
            TrackOrigin::Remote => "remote",
            TrackOrigin::Fallback => "fallback",
        }
    }
}

/// Result of a successful [`TrackFetcher::get_track`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackOutcome {
    pub points: Vec<TrackPoint>,
    pub origin: TrackOrigin,
}

impl TrackOutcome {
    /// One-line provenance report, e.g. `Track: 12 points (fallback)`.
    pub fn summary(&self) -> String {
        format!("Track: {} points ({})", self.points.len(), self.origin.as_str())
    }
}

/// Settings the fetcher needs, split out of [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Base URL that `.xy` links are resolved against.
    pub base_url: String,
    /// Full URL of the index page listing the `.xy` file.
    pub track_page_url: String,
    /// Default track file used when upstream fails.
    pub fallback_path: PathBuf,
    /// How long a successful fetch stays fresh.
    pub refresh_interval: Duration,
}

impl From<&ServerConfig> for FetchSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            track_page_url: config.track_page_url(),
            fallback_path: config.fallback_track_path.clone(),
            refresh_interval: config.refresh_interval(),
        }
    }
}

/// Produces the vessel's current track, at most one upstream fetch at a time.
pub struct TrackFetcher {
    source: Arc<dyn TrackSource>,
    settings: FetchSettings,
    /// Held for the whole check-refresh-replace sequence.
    cache: Mutex<TrackCache>,
}

impl TrackFetcher {
    /// Creates a fetcher with an empty cache.
    pub fn new(source: Arc<dyn TrackSource>, settings: FetchSettings) -> Self {
        Self {
            source,
            settings,
            cache: Mutex::new(TrackCache::new()),
        }
    }

    /// Returns the current track.
    ///
    /// Only fails with `FallbackFailure`, when upstream failed and the
    /// default track could not be loaded either.
    pub fn get_track(&self) -> Result<TrackOutcome> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        if let Some(points) = cache.fresh(now, self.settings.refresh_interval) {
            debug!(points = points.len(), "Using cached track data");
            return Ok(TrackOutcome {
                points: points.to_vec(),
                origin: TrackOrigin::Cache,
            });
        }

        info!(url = %self.settings.track_page_url, "Fetching fresh track data");
        match self.fetch_remote() {
            Ok(points) => {
                info!(points = points.len(), "Fetched track from upstream");
                cache.replace(points.clone(), now);
                Ok(TrackOutcome {
                    points,
                    origin: TrackOrigin::Remote,
                })
            }
            Err(err) => {
                // The fallback never touches the cache
                drop(cache);
                warn!(code = %err.code, error = %err.message, "Upstream track fetch failed, using default track");
                let points = self.load_fallback()?;
                info!(points = points.len(), "Loaded default track");
                Ok(TrackOutcome {
                    points,
                    origin: TrackOrigin::Fallback,
                })
            }
        }
    }

    /// Returns when the cache was last filled from upstream.
    pub fn last_fetch(&self) -> Option<Instant> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fetched_at()
    }

    fn fetch_remote(&self) -> Result<Vec<TrackPoint>> {
        let page_url = &self.settings.track_page_url;
        let html = self.source.fetch_text(page_url)?;

        let href = find_xy_link(&html).ok_or_else(|| TrackError::link_not_found(page_url))?;
        let xy_url = resolve_link(&self.settings.base_url, &href)?;

        info!(url = %xy_url, "Fetching .xy file");
        let body = self.source.fetch_text(&xy_url)?;
        if body.trim().is_empty() {
            return Err(TrackError::empty_payload(&xy_url));
        }

        Ok(parse_xy(&body))
    }

    fn load_fallback(&self) -> Result<Vec<TrackPoint>> {
        let path = &self.settings.fallback_path;
        let text = fs::read_to_string(path)
            .map_err(|e| TrackError::fallback_failure(format!("{}: {}", path.display(), e)))?;

        let points = parse_fallback(&text);
        if points.is_empty() {
            return Err(TrackError::fallback_failure(format!(
                "no points in {}",
                path.display()
            )));
        }

        Ok(points)
    }
}
