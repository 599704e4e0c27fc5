//! Server configuration module.
//!
//! Contains the runtime configuration for vessel-track: where the upstream
//! pages live, where the local assets are, and how the track cache behaves.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Host serving the vessel's track and status pages.
pub const DEFAULT_BASE_URL: &str = "http://www.atlantis.whoi.edu";

/// Path of the page that links to the current `.xy` track file.
pub const DEFAULT_TRACK_PAGE: &str = "/cgi-bin/imet/get_tracks";

/// Path of the status page carrying the speed over ground.
pub const DEFAULT_SPEED_PAGE: &str = "/cgi-bin/imet/get_status";

/// Minimum time between two remote track fetches.
pub const DEFAULT_REFRESH_SECS: u64 = 240;

/// Timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the server.
///
/// Loaded from environment variables at startup, then overridden by
/// command-line arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind: String,

    /// Base URL of the upstream host. `.xy` links are resolved against it.
    pub base_url: String,

    /// Path of the track index page, appended to `base_url`.
    pub track_page_path: String,

    /// Full URL of the status page.
    /// If None, `DEFAULT_SPEED_PAGE` under `base_url` is used.
    pub speed_url: Option<String>,

    /// Bundled track served when the upstream pipeline fails.
    pub fallback_track_path: PathBuf,

    /// Plain-text waypoints file served verbatim.
    pub waypoints_path: PathBuf,

    /// Directory holding one subdirectory per tile set.
    pub tiles_root: PathBuf,

    /// Map UI page served at `/`.
    pub index_page: PathBuf,

    /// Seconds a successful remote fetch stays fresh.
    pub refresh_interval_secs: u64,

    /// Seconds before an outbound request is abandoned.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Creates a new ServerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ServerConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `VESSEL_TRACK_BIND` - Listen address (e.g. `127.0.0.1:8080`)
    /// - `VESSEL_TRACK_BASE_URL` - Upstream host
    /// - `VESSEL_TRACK_PAGE` - Path of the track index page
    /// - `VESSEL_TRACK_SPEED_URL` - Full URL of the status page
    /// - `VESSEL_TRACK_FALLBACK` - Default track file
    /// - `VESSEL_TRACK_WAYPOINTS` - Waypoints file
    /// - `VESSEL_TRACK_TILES` - Tiles root directory
    /// - `VESSEL_TRACK_INDEX_PAGE` - Map UI page
    /// - `VESSEL_TRACK_REFRESH_SECS` - Cache refresh interval
    /// - `VESSEL_TRACK_TIMEOUT_SECS` - Outbound request timeout
    ///
    /// Falls back to defaults for unset or unparsable variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bind) = std::env::var("VESSEL_TRACK_BIND") {
            if bind.parse::<SocketAddr>().is_ok() {
                config.bind = bind;
            }
        }

        if let Ok(url) = std::env::var("VESSEL_TRACK_BASE_URL") {
            config.base_url = url;
        }

        if let Ok(page) = std::env::var("VESSEL_TRACK_PAGE") {
            config.track_page_path = page;
        }

        if let Ok(url) = std::env::var("VESSEL_TRACK_SPEED_URL") {
            config.speed_url = Some(url);
        }

        if let Ok(path) = std::env::var("VESSEL_TRACK_FALLBACK") {
            config.fallback_track_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("VESSEL_TRACK_WAYPOINTS") {
            config.waypoints_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("VESSEL_TRACK_TILES") {
            config.tiles_root = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("VESSEL_TRACK_INDEX_PAGE") {
            config.index_page = PathBuf::from(path);
        }

        if let Ok(secs) = std::env::var("VESSEL_TRACK_REFRESH_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.refresh_interval_secs = secs;
            }
        }

        if let Ok(secs) = std::env::var("VESSEL_TRACK_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                if secs > 0 {
                    config.request_timeout_secs = secs;
                }
            }
        }

        config
    }

    /// Returns the full URL of the track index page.
    pub fn track_page_url(&self) -> String {
        format!("{}{}", self.base_url, self.track_page_path)
    }

    /// Returns the effective status page URL.
    pub fn effective_speed_url(&self) -> String {
        match self.speed_url {
            Some(ref url) => url.clone(),
            None => format!("{}{}", self.base_url, DEFAULT_SPEED_PAGE),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if let Err(e) = self.bind.parse::<SocketAddr>() {
            return Some(format!("invalid bind address {}: {}", self.bind, e));
        }

        if let Err(e) = reqwest::Url::parse(&self.base_url) {
            return Some(format!("invalid base URL {}: {}", self.base_url, e));
        }

        if !self.track_page_path.starts_with('/') {
            return Some(format!(
                "track page path must start with '/': {}",
                self.track_page_path
            ));
        }

        if let Some(ref url) = self.speed_url {
            if let Err(e) = reqwest::Url::parse(url) {
                return Some(format!("invalid speed URL {}: {}", url, e));
            }
        }

        if self.request_timeout_secs == 0 {
            return Some("request timeout must be > 0".to_string());
        }

        None
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            track_page_path: DEFAULT_TRACK_PAGE.to_string(),
            speed_url: None,
            fallback_track_path: PathBuf::from("data/default_track.xy"),
            waypoints_path: PathBuf::from("data/waypoints.txt"),
            tiles_root: PathBuf::from("tiles"),
            index_page: PathBuf::from("templates/index.html"),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::new();
        assert!(config.validate().is_none());
        assert_eq!(config.refresh_interval(), Duration::from_secs(240));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn track_page_url_joins_base_and_path() {
        let config = ServerConfig::new();
        assert_eq!(
            config.track_page_url(),
            "http://www.atlantis.whoi.edu/cgi-bin/imet/get_tracks"
        );
    }

    #[test]
    fn speed_url_defaults_under_base() {
        let mut config = ServerConfig::new();
        config.base_url = "http://upstream.test".to_string();
        assert_eq!(
            config.effective_speed_url(),
            "http://upstream.test/cgi-bin/imet/get_status"
        );

        config.speed_url = Some("http://status.test/now".to_string());
        assert_eq!(config.effective_speed_url(), "http://status.test/now");
    }

    #[test]
    fn config_validation() {
        let mut config = ServerConfig::new();

        config.bind = "not an address".to_string();
        assert!(config.validate().is_some());
        config.bind = "127.0.0.1:8080".to_string();
        assert!(config.validate().is_none());

        config.base_url = "no scheme".to_string();
        assert!(config.validate().is_some());
        config.base_url = DEFAULT_BASE_URL.to_string();

        config.track_page_path = "relative/page".to_string();
        assert!(config.validate().is_some());
        config.track_page_path = DEFAULT_TRACK_PAGE.to_string();

        config.request_timeout_secs = 0;
        assert!(config.validate().is_some());
    }

    #[test]
    fn from_env_defaults() {
        // No VESSEL_TRACK_* variables are set in the test environment
        let config = ServerConfig::from_env();
        assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_SECS);
        assert!(config.speed_url.is_none());
    }
}
