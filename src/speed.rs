//! Speed over ground scraping.
//!
//! The status page shows something like `SOG: ... <b> 10.4 knots`, with
//! arbitrary markup in between. The first match wins.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, TrackError};
use crate::track::TrackSource;

const SOG_PATTERN: &str = r"(?is)SOG:.*?<b>\s*([-+]?\d+(?:\.\d+)?)\s*(?:</b>\s*)?knots";

fn sog_regex() -> &'static Regex {
    static SOG: OnceLock<Regex> = OnceLock::new();
    SOG.get_or_init(|| Regex::new(SOG_PATTERN).expect("SOG pattern compiles"))
}

/// Extracts the speed in knots from status page markup.
pub fn parse_speed(html: &str) -> Result<f64> {
    let captures = sog_regex()
        .captures(html)
        .ok_or_else(TrackError::speed_not_found)?;

    captures[1]
        .parse::<f64>()
        .map_err(|_| TrackError::speed_not_found())
}

/// Fetches the status page at `url` and extracts the speed.
pub fn fetch_speed(source: &dyn TrackSource, url: &str) -> Result<f64> {
    let html = source.fetch_text(url)?;
    match parse_speed(&html) {
        Ok(speed) => {
            debug!(speed, "Parsed speed over ground");
            Ok(speed)
        }
        Err(err) => {
            warn!(url, "No SOG value on status page");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct StaticPage(&'static str);

    impl TrackSource for StaticPage {
        fn fetch_text(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Unreachable;

    impl TrackSource for Unreachable {
        fn fetch_text(&self, url: &str) -> Result<String> {
            Err(TrackError::upstream_unavailable(url, "timed out"))
        }
    }

    #[test]
    fn parses_simple_sog() {
        assert_eq!(parse_speed("SOG: <b>10.4 knots</b>").unwrap(), 10.4);
    }

    #[test]
    fn allows_intervening_markup_and_case() {
        let html = r#"<tr><td>sog:</td>
            <td class="v"><font color=red><B> 11 </B> Knots</font></td></tr>"#;
        assert_eq!(parse_speed(html).unwrap(), 11.0);
    }

    #[test]
    fn first_match_wins() {
        let html = "SOG: <b>3.5 knots</b> ... SOG: <b>9.9 knots</b>";
        assert_eq!(parse_speed(html).unwrap(), 3.5);
    }

    #[test]
    fn missing_sog_is_not_found() {
        let err = parse_speed("<b>COG: 270 degrees</b>").unwrap_err();
        assert_eq!(err.code, ErrorCode::SpeedNotFound);

        let err = parse_speed("SOG: <b>n/a knots</b>").unwrap_err();
        assert_eq!(err.code, ErrorCode::SpeedNotFound);
    }

    #[test]
    fn fetch_speed_uses_source() {
        let speed = fetch_speed(&StaticPage("SOG: <b> 0.0 knots"), "http://status.test").unwrap();
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn fetch_failure_is_upstream_unavailable() {
        let err = fetch_speed(&Unreachable, "http://status.test").unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamUnavailable);
    }
}
