//! Track cache with a freshness window.
//!
//! Holds the points from the last successful remote fetch together with the
//! instant they were fetched. Both fields are only ever replaced together.

use std::time::{Duration, Instant};

use crate::types::TrackPoint;

/// The most recent remotely fetched track.
#[derive(Debug, Default)]
pub struct TrackCache {
    /// Points from the last successful fetch.
    points: Vec<TrackPoint>,
    /// When they were fetched. None until the first successful fetch.
    fetched_at: Option<Instant>,
}

impl TrackCache {
    /// Creates an empty cache with no fetch recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached points if they are younger than `max_age` at `now`.
    ///
    /// An empty cache is never fresh, so a fetch that produced no points is
    /// retried on the next call.
    pub fn fresh(&self, now: Instant, max_age: Duration) -> Option<&[TrackPoint]> {
        let fetched_at = self.fetched_at?;
        if self.points.is_empty() {
            return None;
        }
        if now.saturating_duration_since(fetched_at) < max_age {
            Some(&self.points)
        } else {
            None
        }
    }

    /// Replaces the cached points and timestamp in one step.
    pub fn replace(&mut self, points: Vec<TrackPoint>, fetched_at: Instant) {
        *self = Self {
            points,
            fetched_at: Some(fetched_at),
        };
    }

    /// Returns when the cache was last filled.
    pub fn fetched_at(&self) -> Option<Instant> {
        self.fetched_at
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
