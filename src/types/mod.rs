//! Core types for vessel-track.
//!
//! - [`TrackPoint`]: One lat/lng position on the vessel's track

mod point;

pub use point::TrackPoint;
