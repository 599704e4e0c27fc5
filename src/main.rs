//! vessel-track: live research-vessel track server.
//!
//! This binary can run in two modes:
//! - Server mode (default): HTTP API and map client
//! - Print mode (`--print-track`): fetch the track once and print it

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vessel_track::cli::Cli;
use vessel_track::http::{run_server, AppState, TrackResponse};
use vessel_track::{FetchSettings, HttpSource, ServerConfig, TrackError, TrackFetcher, TrackSource};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse_args();
    let mut config = ServerConfig::from_env();
    cli.apply_to(&mut config);

    if let Some(reason) = config.validate() {
        return Err(TrackError::invalid_config(reason).into());
    }

    // The blocking client has to be built outside the async runtime
    let source: Arc<dyn TrackSource> = Arc::new(HttpSource::new(config.request_timeout())?);

    if cli.is_print_mode() {
        run_print_mode(&config, source)
    } else {
        run_server_mode(config, source)
    }
}

/// Fetches the track once and prints it to stdout.
fn run_print_mode(config: &ServerConfig, source: Arc<dyn TrackSource>) -> anyhow::Result<()> {
    let fetcher = TrackFetcher::new(source, FetchSettings::from(config));
    let outcome = fetcher.get_track()?;

    eprintln!("{}", outcome.summary());

    let json = serde_json::to_string_pretty(&TrackResponse::ok(outcome.points))
        .context("Failed to serialize track")?;
    println!("{}", json);
    Ok(())
}

/// Runs the HTTP server until ctrl-c.
fn run_server_mode(config: ServerConfig, source: Arc<dyn TrackSource>) -> anyhow::Result<()> {
    info!(
        bind = %config.bind,
        track_page = %config.track_page_url(),
        speed_page = %config.effective_speed_url(),
        fallback = %config.fallback_track_path.display(),
        refresh_secs = config.refresh_interval_secs,
        "Starting vessel-track"
    );

    // Declared first so it outlives the runtime and the client drops outside it
    let state = AppState::new(config, source);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(run_server(state.clone()))?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vessel_track=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
