//! Upstream text sources.
//!
//! The track pipeline and the speed scraper only ever need "GET this URL and
//! hand me the body". That seam is the [`TrackSource`] trait so tests can
//! swap in fakes.

use std::time::Duration;

use crate::error::{ErrorCode, Result, TrackError};

/// Something that can fetch the body of a URL as text.
pub trait TrackSource: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// Network failures and non-2xx statuses are `UpstreamUnavailable`.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP source backed by `reqwest`.
///
/// Must be built outside of an async context; calls are expected to run on
/// a blocking thread.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Creates a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vessel-track/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TrackError::with_source(
                    ErrorCode::UpstreamUnavailable,
                    format!("Failed to create HTTP client: {}", e),
                    e,
                )
            })?;

        Ok(Self { client })
    }
}

impl TrackSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TrackError::upstream_unavailable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackError::upstream_unavailable(
                url,
                format!("HTTP {}", status),
            ));
        }

        response
            .text()
            .map_err(|e| TrackError::upstream_unavailable(url, e))
    }
}
