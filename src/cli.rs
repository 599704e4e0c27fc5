//! Command-line interface.
//!
//! Every flag overrides the matching `VESSEL_TRACK_*` environment variable.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ServerConfig;

/// vessel-track: serve a research vessel's live track to a map client
#[derive(Parser, Debug)]
#[command(name = "vessel-track")]
#[command(about = "Serve a research vessel's live track, speed and map tiles")]
#[command(version)]
pub struct Cli {
    /// Address to listen on (e.g. 0.0.0.0:5000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Upstream host serving the track and status pages
    #[arg(long)]
    pub base_url: Option<String>,

    /// Full URL of the status page carrying SOG
    #[arg(long)]
    pub speed_url: Option<String>,

    /// Default track file used when upstream fails
    #[arg(long)]
    pub fallback: Option<PathBuf>,

    /// Waypoints file served at /get_waypoints
    #[arg(long)]
    pub waypoints: Option<PathBuf>,

    /// Directory of tile sets served under /tiles
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// Map page served at /
    #[arg(long)]
    pub index_page: Option<PathBuf>,

    /// Seconds a fetched track stays cached
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Timeout for upstream requests in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Fetch the track once, print it as JSON and exit
    #[arg(long)]
    pub print_track: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns true if running in one-shot print mode.
    pub fn is_print_mode(&self) -> bool {
        self.print_track
    }

    /// Applies the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(ref bind) = self.bind {
            config.bind = bind.clone();
        }
        if let Some(ref url) = self.base_url {
            config.base_url = url.clone();
        }
        if let Some(ref url) = self.speed_url {
            config.speed_url = Some(url.clone());
        }
        if let Some(ref path) = self.fallback {
            config.fallback_track_path = path.clone();
        }
        if let Some(ref path) = self.waypoints {
            config.waypoints_path = path.clone();
        }
        if let Some(ref path) = self.tiles {
            config.tiles_root = path.clone();
        }
        if let Some(ref path) = self.index_page {
            config.index_page = path.clone();
        }
        if let Some(secs) = self.refresh_secs {
            config.refresh_interval_secs = secs;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
    }
}
