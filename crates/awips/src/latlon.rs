//! Polygons and storm motion
//!
//! Warnings outline the threatened area with a polygon:
//!
//! ```txt
//! LAT...LON 4305 8826 4311 8799 4290 8797 4284 8826
//!       4301 8830
//! TIME...MOT...LOC 2254Z 246DEG 32KT 4300 8818
//! ```
//!
//! Coordinates are degrees times 100. Longitudes are west and are
//! decoded as negative numbers. Longitudes of 100° and more use
//! five digits.
//!
//! The Storm Prediction Center packs each point into a single
//! eight-digit group, `LLLLOOOO`. Longitudes of 100° and more drop
//! their leading `1`.

use chrono::{DateTime, Utc};
use log::debug;

use crate::datetime;

/// Polygon marker
const LATLON_MARKER: &str = "LAT...LON";

/// Storm motion marker
const TML_MARKER: &str = "TIME...MOT...LOC";

/// A polygon of (latitude, longitude) points
///
/// Points are listed in the order transmitted. NWS polygons are
/// usually, but not always, closed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatLon {
    /// (latitude, longitude) pairs, in degrees
    pub polygon: Vec<(f64, f64)>,
}

/// Storm time, motion, and location
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeMotLoc {
    /// The time as transmitted, `HHMMZ`
    pub original_time: String,

    /// Observation time (UTC)
    pub time: DateTime<Utc>,

    /// Direction the storm is moving *from*, in degrees
    pub direction: u16,

    /// Storm speed, in knots
    pub speed: u16,

    /// Storm location: one point, or a line of points
    pub location: Vec<(f64, f64)>,
}

impl LatLon {
    /// Find and decode the `LAT...LON` polygon in `text`
    ///
    /// Returns `None` if there is no polygon, or if it cannot be
    /// decoded.
    ///
    /// ```
    /// use awips::LatLon;
    ///
    /// let latlon = LatLon::parse("LAT...LON 4305 8826 4311 8799\n      4290 10123\n").unwrap();
    /// assert_eq!(
    ///     latlon.polygon,
    ///     &[(43.05, -88.26), (43.11, -87.99), (42.90, -101.23)]
    /// );
    /// ```
    pub fn parse(text: &str) -> Option<LatLon> {
        let start = text.find(LATLON_MARKER)? + LATLON_MARKER.len();
        let mut lines = text[start..].lines();

        // the polygon may wrap onto lines which hold only coordinates
        let first = lines.next().unwrap_or_default();
        let mut tokens: Vec<&str> = first
            .split_whitespace()
            .take_while(|t| is_coordinate(t))
            .collect();
        if tokens.len() == first.split_whitespace().count() {
            for line in lines {
                let more: Vec<&str> = line.split_whitespace().collect();
                if more.is_empty() || !more.iter().all(|t| is_coordinate(t)) {
                    break;
                }
                tokens.extend(more);
            }
        }

        let polygon = parse_points(&tokens);
        if polygon.is_none() {
            debug!("latlon: undecodable polygon \"{}\"", tokens.join(" "));
        }

        polygon.map(|polygon| LatLon { polygon })
    }

    /// True if the first and last points are the same
    pub fn is_closed(&self) -> bool {
        self.polygon.len() > 1 && self.polygon.first() == self.polygon.last()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.polygon.len()
    }

    /// True if there are no points
    pub fn is_empty(&self) -> bool {
        self.polygon.is_empty()
    }
}

impl TimeMotLoc {
    /// Find and decode the `TIME...MOT...LOC` line in `text`
    ///
    /// The time of day is placed on the calendar near `issued`.
    /// Returns `None` if the line is absent or cannot be decoded.
    pub fn parse(text: &str, issued: &DateTime<Utc>) -> Option<TimeMotLoc> {
        let start = text.find(TML_MARKER)? + TML_MARKER.len();
        let mut tokens = text[start..].lines().next()?.split_whitespace();

        let original_time = tokens.next()?;
        let direction = tokens.next()?.strip_suffix("DEG")?.parse().ok()?;
        let speed = tokens.next()?.strip_suffix("KT")?.parse().ok()?;
        let location: Vec<&str> = tokens.take_while(|t| is_coordinate(t)).collect();
        let location = parse_points(&location)?;

        let fields = datetime::parse_hour_minute(original_time.strip_suffix('Z')?)?;
        let time = datetime::resolve_hour_minute(fields, issued).ok()?;

        Some(TimeMotLoc {
            original_time: original_time.to_owned(),
            time,
            direction,
            speed,
            location,
        })
    }
}

// Decode coordinate tokens: either pairs of LLLL OOOO[O] or
// packed LLLLOOOO groups
fn parse_points(tokens: &[&str]) -> Option<Vec<(f64, f64)>> {
    if tokens.is_empty() {
        return None;
    }

    if tokens.iter().all(|t| t.len() == 8) {
        return tokens
            .iter()
            .map(|t| {
                let lat = hundredths(&t[..4])?;
                let mut lon = hundredths(&t[4..])?;
                if lon < 40.0 {
                    lon += 100.0;
                }
                Some((lat, -lon))
            })
            .collect();
    }

    if tokens.len() % 2 != 0 {
        return None;
    }

    tokens
        .chunks_exact(2)
        .map(|pair| {
            let lat = hundredths(pair[0])?;
            let lon = hundredths(pair[1])?;
            Some((lat, -lon))
        })
        .collect()
}

// LLLL, OOOO, OOOOO, or LLLLOOOO
fn is_coordinate(token: &str) -> bool {
    matches!(token.len(), 4 | 5 | 8) && token.bytes().all(|b| b.is_ascii_digit())
}

fn hundredths(token: &str) -> Option<f64> {
    if !(4..=5).contains(&token.len()) {
        return None;
    }
    let val: u32 = token.parse().ok()?;
    Some(val as f64 / 100.0)
}
