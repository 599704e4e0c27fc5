//! Track file parsers.
//!
//! Two formats are understood:
//! - upstream `.xy` files: `lon,lat` per line, exactly two comma-separated
//!   numbers, anything else skipped
//! - the bundled default track: `lon lat [...]` per line, separated by
//!   commas and/or whitespace, extra columns ignored

use crate::types::TrackPoint;

/// Parses an upstream `.xy` body into points, skipping malformed lines.
pub fn parse_xy(body: &str) -> Vec<TrackPoint> {
    body.trim().lines().filter_map(parse_xy_line).collect()
}

/// Parses one `lon,lat` line.
///
/// Returns None unless the line splits into exactly two numeric tokens.
pub fn parse_xy_line(line: &str) -> Option<TrackPoint> {
    let mut tokens = line.trim().split(',');
    let (Some(lng), Some(lat), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };

    let lng = lng.trim().parse::<f64>().ok()?;
    let lat = lat.trim().parse::<f64>().ok()?;
    Some(TrackPoint::from_lon_lat(lng, lat))
}

/// Parses the default track file format into points.
pub fn parse_fallback(text: &str) -> Vec<TrackPoint> {
    text.lines().filter_map(parse_fallback_line).collect()
}

/// Parses one `lon lat [...]` line.
///
/// Returns None if the line has fewer than two tokens or either of the
/// first two is not a number.
pub fn parse_fallback_line(line: &str) -> Option<TrackPoint> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    let lng = tokens.next()?.parse::<f64>().ok()?;
    let lat = tokens.next()?.parse::<f64>().ok()?;
    Some(TrackPoint::from_lon_lat(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xy_first_token_is_longitude() {
        let point = parse_xy_line("-70.671234,41.523456").unwrap();
        assert_eq!(point.lng, -70.671234);
        assert_eq!(point.lat, 41.523456);
    }

    #[test]
    fn xy_mixed_lines() {
        let body = "41.5, -70.6\nbad,data,x\n42.0,-71.0\n";
        assert_eq!(
            parse_xy(body),
            vec![
                TrackPoint::from_lon_lat(41.5, -70.6),
                TrackPoint::from_lon_lat(42.0, -71.0),
            ]
        );
    }

    #[test]
    fn xy_rejects_malformed_lines() {
        assert!(parse_xy_line("").is_none());
        assert!(parse_xy_line("41.5").is_none());
        assert!(parse_xy_line("41.5 -70.6").is_none());
        assert!(parse_xy_line("41.5,-70.6,0").is_none());
        assert!(parse_xy_line("41.5,,-70.6").is_none());
        assert!(parse_xy_line("41.5,").is_none());
        assert!(parse_xy_line("north,-70.6").is_none());
    }

    #[test]
    fn xy_malformed_line_does_not_affect_neighbours() {
        let body = "1.0,2.0\n3.0;4.0\n5.0,6.0";
        let points = parse_xy(body);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], TrackPoint::from_lon_lat(1.0, 2.0));
        assert_eq!(points[1], TrackPoint::from_lon_lat(5.0, 6.0));
    }

    #[test]
    fn xy_handles_crlf_and_padding() {
        let points = parse_xy("  -70.5 , 41.25 \r\n-70.4,41.3\r\n");
        assert_eq!(
            points,
            vec![
                TrackPoint::from_lon_lat(-70.5, 41.25),
                TrackPoint::from_lon_lat(-70.4, 41.3),
            ]
        );
    }

    #[test]
    fn xy_out_of_range_values_pass_through() {
        let point = parse_xy_line("500.0,-95.5").unwrap();
        assert_eq!(point.lng, 500.0);
        assert_eq!(point.lat, -95.5);
    }

    #[test]
    fn fallback_accepts_commas_and_whitespace() {
        let text = "-70.67 41.52\n-70.66,41.53\n-70.65 ,\t41.54 12.5 extra\n";
        assert_eq!(
            parse_fallback(text),
            vec![
                TrackPoint::from_lon_lat(-70.67, 41.52),
                TrackPoint::from_lon_lat(-70.66, 41.53),
                TrackPoint::from_lon_lat(-70.65, 41.54),
            ]
        );
    }

    #[test]
    fn fallback_skips_short_or_non_numeric_lines() {
        assert!(parse_fallback_line("").is_none());
        assert!(parse_fallback_line("   ").is_none());
        assert!(parse_fallback_line("-70.67").is_none());
        assert!(parse_fallback_line("# lon lat").is_none());
        assert!(parse_fallback_line("-70.67 north").is_none());
    }
}
