//! Cache module for track data.
//!
//! Provides the time-windowed cache behind the track fetcher.

pub mod tracks;

pub use tracks::TrackCache;
