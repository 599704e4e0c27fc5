//! Track acquisition pipeline.
//!
//! - [`source`]: upstream fetch seam and its `reqwest` implementation
//! - [`link`]: finding and resolving the `.xy` link on the index page
//! - [`parse`]: `.xy` and default track file parsers
//! - [`fetcher`]: the cached, fallback-protected pipeline itself

pub mod fetcher;
pub mod link;
pub mod parse;
pub mod source;

pub use fetcher::{FetchSettings, TrackFetcher, TrackOrigin, TrackOutcome};
pub use source::{HttpSource, TrackSource};
