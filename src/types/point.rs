//! Track point type.
//!
//! One GPS fix of the vessel. Coordinates are passed through exactly as
//! parsed, with no range checks.

use serde::{Deserialize, Serialize};

/// A single position on the vessel's track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl TrackPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a point from `lon, lat` ordering, as used by `.xy` files.
    pub fn from_lon_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }
}
