//! Error types for vessel-track.
//!
//! Defines the error codes produced by the track pipeline, the speed scraper
//! and the static asset readers, plus the shared `TrackError` type.

use std::fmt;

/// Error codes identifying what went wrong.
///
/// The first three never leave the track pipeline: they trigger the
/// fallback path instead. Everything else can reach the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Upstream page or data file could not be fetched.
    /// Trigger: network error, timeout, or non-2xx status.
    UpstreamUnavailable,

    /// Index page has no hyperlink to a `.xy` data file.
    LinkNotFound,

    /// Data file was fetched but contained no lines.
    EmptyPayload,

    /// Bundled default track file missing or yielded no points.
    FallbackFailure,

    /// Status page fetched but no SOG value could be found.
    SpeedNotFound,

    /// Local waypoints file or tiles directory could not be read.
    AssetUnavailable,

    /// Configuration failed validation.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::LinkNotFound => "LINK_NOT_FOUND",
            ErrorCode::EmptyPayload => "EMPTY_PAYLOAD",
            ErrorCode::FallbackFailure => "FALLBACK_FAILURE",
            ErrorCode::SpeedNotFound => "SPEED_NOT_FOUND",
            ErrorCode::AssetUnavailable => "ASSET_UNAVAILABLE",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::UpstreamUnavailable => {
                "Check network access to the upstream host; the next request \
                 after the refresh window will try again"
            }
            ErrorCode::LinkNotFound => {
                "The track page markup may have changed; verify VESSEL_TRACK_PAGE \
                 points at the page listing the .xy file"
            }
            ErrorCode::EmptyPayload => "The upstream data file is empty; try again later",
            ErrorCode::FallbackFailure => {
                "Make sure the default track file exists and contains \
                 'lon lat' lines (set VESSEL_TRACK_FALLBACK to override its path)"
            }
            ErrorCode::SpeedNotFound => {
                "The status page markup may have changed; verify VESSEL_TRACK_SPEED_URL"
            }
            ErrorCode::AssetUnavailable => {
                "Check that the waypoints file and tiles directory exist and are readable"
            }
            ErrorCode::InvalidConfig => "Fix the offending setting and restart",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for vessel-track operations.
#[derive(Debug)]
pub struct TrackError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TrackError {
    /// Creates a new TrackError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new TrackError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an UPSTREAM_UNAVAILABLE error.
    pub fn upstream_unavailable(url: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UpstreamUnavailable,
            format!("Failed to fetch {}: {}", url, reason),
        )
    }

    /// Creates a LINK_NOT_FOUND error.
    pub fn link_not_found(page_url: &str) -> Self {
        Self::new(
            ErrorCode::LinkNotFound,
            format!("No .xy link found on {}", page_url),
        )
    }

    /// Creates an EMPTY_PAYLOAD error.
    pub fn empty_payload(url: &str) -> Self {
        Self::new(ErrorCode::EmptyPayload, format!("No lines in {}", url))
    }

    /// Creates a FALLBACK_FAILURE error.
    pub fn fallback_failure(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FallbackFailure,
            format!("Failed to load default track: {}", reason.into()),
        )
    }

    /// Creates a SPEED_NOT_FOUND error.
    pub fn speed_not_found() -> Self {
        Self::new(ErrorCode::SpeedNotFound, "Speed not found in status page")
    }

    /// Creates an ASSET_UNAVAILABLE error.
    pub fn asset_unavailable(
        what: impl fmt::Display,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let message = format!("Failed to read {}: {}", what, source);
        Self::with_source(ErrorCode::AssetUnavailable, message, source)
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, reason)
    }
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using TrackError.
pub type Result<T> = std::result::Result<T, TrackError>;
