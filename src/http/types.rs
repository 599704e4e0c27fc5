//! Response bodies served by the HTTP API.

use serde::{Deserialize, Serialize};

use crate::types::TrackPoint;

/// Body of `GET /get_track_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub track: Vec<TrackPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackResponse {
    pub fn ok(track: Vec<TrackPoint>) -> Self {
        Self { track, error: None }
    }

    /// Empty track plus the reason nothing could be served.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            track: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Body of a successful `GET /get_speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedResponse {
    /// Speed over ground in knots.
    pub speed: f64,
}

/// Generic `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_track_has_no_error_key() {
        let json = serde_json::to_value(TrackResponse::ok(vec![TrackPoint::new(41.5, -70.6)]))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "track": [{ "lat": 41.5, "lng": -70.6 }] })
        );
    }

    #[test]
    fn failed_track_is_empty_with_error() {
        let json = serde_json::to_value(TrackResponse::failed("no default track")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "track": [], "error": "no default track" })
        );
    }
}
