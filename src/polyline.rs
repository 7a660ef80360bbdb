//! Encoded polyline codec and route geometry types.
//!
//! Directions providers hand back route geometry in the compact Google
//! polyline format (precision 5). This module decodes that format into
//! coordinate sequences, re-encodes sequences, and picks a representative
//! point of a path for marker placement.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-point scale of the encoding (5 decimal digits).
const SCALE: f64 = 1e5;

/// Offset added to every 6-bit chunk to land in printable ASCII.
const CHAR_OFFSET: u8 = 63;

const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION_BIT: u64 = 0x20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("encoded polyline ends mid-value at byte {position}")]
    UnexpectedEnd { position: usize },

    #[error("invalid character {character:?} at byte {position}")]
    InvalidCharacter { position: usize, character: char },

    #[error("value starting at byte {position} does not fit in 64 bits")]
    Overflow { position: usize },

    #[error("coordinate pair {index} is outside the encodable range")]
    OutOfRange { index: usize },
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A route geometry as an ordered sequence of decoded coordinates.
///
/// Order is traversal order along the route. Encoding to/from the compact
/// polyline format happens at the boundary (directions responses, cached
/// path files); everything in between works on points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoPath {
    points: Vec<GeoPoint>,
}

impl GeoPath {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Two-point path used whenever no road geometry is available.
    pub fn straight_line(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self::new(vec![origin, destination])
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    /// Representative waypoint for a marker. See [`midpoint`].
    pub fn midpoint(&self) -> GeoPoint {
        midpoint(&self.points)
    }

    pub fn encode(&self) -> Result<String, PolylineError> {
        encode(&self.points)
    }
}

impl From<Vec<GeoPoint>> for GeoPath {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromStr for GeoPath {
    type Err = PolylineError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        decode(encoded)
    }
}

/// Decodes an encoded polyline into its coordinate sequence.
///
/// An empty string is a valid, empty path. Malformed input is rejected
/// instead of producing partial coordinates.
pub fn decode(encoded: &str) -> Result<GeoPath, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while cursor < bytes.len() {
        lat = accumulate(lat, bytes, &mut cursor)?;
        // A latitude without its longitude is a truncated pair.
        lng = accumulate(lng, bytes, &mut cursor)?;

        points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
    }

    Ok(GeoPath::new(points))
}

/// Adds the next delta to a running total, rejecting totals past `i64`.
fn accumulate(total: i64, bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let position = *cursor;
    let delta = read_value(bytes, cursor)?;
    total
        .checked_add(delta)
        .ok_or(PolylineError::Overflow { position })
}

/// Reads one zig-zag varint starting at `cursor`, advancing it past the value.
fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut result: u64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*cursor) else {
            return Err(PolylineError::UnexpectedEnd { position: *cursor });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *cursor,
                character: char::from(byte),
            });
        }
        let chunk = u64::from(byte - CHAR_OFFSET);
        let payload = chunk & CHUNK_MASK;
        // Payload bits shifted past bit 63 would be dropped silently.
        if shift >= u64::BITS || (payload << shift) >> shift != payload {
            return Err(PolylineError::Overflow { position: start });
        }
        result |= payload << shift;
        shift += 5;
        *cursor += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encodes a coordinate sequence into the compact polyline format.
///
/// Every coordinate must be finite with `|degrees| * 1e5` inside `i64`, and
/// consecutive fixed-point values must differ by no more than `i64` holds.
/// Real coordinates are far inside that range; anything outside it is
/// reported as [`PolylineError::OutOfRange`] with the offending pair index.
pub fn encode(points: &[GeoPoint]) -> Result<String, PolylineError> {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for (index, point) in points.iter().enumerate() {
        let out_of_range = PolylineError::OutOfRange { index };
        let lat = to_fixed(point.latitude).ok_or_else(|| out_of_range.clone())?;
        let lng = to_fixed(point.longitude).ok_or_else(|| out_of_range.clone())?;
        let delta_lat = lat.checked_sub(prev_lat).ok_or_else(|| out_of_range.clone())?;
        let delta_lng = lng.checked_sub(prev_lng).ok_or(out_of_range)?;

        write_value(&mut out, delta_lat);
        write_value(&mut out, delta_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(out)
}

fn to_fixed(degrees: f64) -> Option<i64> {
    let scaled = (degrees * SCALE).round();
    // i64::MIN is exactly representable as f64, i64::MAX rounds up to 2^63.
    if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
        Some(scaled as i64)
    } else {
        None
    }
}

/// Zig-zag maps every `i64` onto a `u64`, so no bit of `delta` is lost.
fn write_value(out: &mut String, delta: i64) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (value & CHUNK_MASK)) as u8;
        out.push(char::from(chunk + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}

/// Picks the waypoint at index `len / 2` as the path's representative point.
///
/// This is positional, not geometric: the result always lies on the path,
/// which is what marker placement needs. An empty path yields `{0, 0}`,
/// meaning "no point", not a location.
pub fn midpoint(path: &[GeoPoint]) -> GeoPoint {
    path.get(path.len() / 2).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_decode_reference_vector() {
        let path = decode(REFERENCE).unwrap();
        assert_eq!(path.points(), &reference_points()[..]);
    }

    #[test]
    fn test_decode_empty() {
        let path = decode("").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_encode_reference_vector() {
        assert_eq!(encode(&reference_points()).unwrap(), REFERENCE);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]).unwrap(), "");
    }

    #[test]
    fn test_decode_single_zero_point() {
        // "?" encodes a zero delta.
        let path = decode("??").unwrap();
        assert_eq!(path.points(), &[GeoPoint::new(0.0, 0.0)]);
    }

    #[test]
    fn test_decode_truncated_continuation() {
        // '_' carries the continuation bit and nothing follows it.
        let err = decode("_").unwrap_err();
        assert_eq!(err, PolylineError::UnexpectedEnd { position: 1 });
    }

    #[test]
    fn test_decode_missing_longitude() {
        let err = decode("_p~iF").unwrap_err();
        assert_eq!(err, PolylineError::UnexpectedEnd { position: 5 });
    }

    #[test]
    fn test_decode_invalid_character() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert_eq!(
            err,
            PolylineError::InvalidCharacter {
                position: 5,
                character: ' '
            }
        );
    }

    #[test]
    fn test_decode_non_ascii_rejected() {
        let err = decode("é").unwrap_err();
        assert!(matches!(err, PolylineError::InvalidCharacter { position: 0, .. }));
    }

    #[test]
    fn test_decode_overflow() {
        let encoded = "_".repeat(20);
        let err = decode(&encoded).unwrap_err();
        assert_eq!(err, PolylineError::Overflow { position: 0 });
    }

    #[test]
    fn test_decode_rejects_bits_past_sixty_four() {
        // Twelve full chunks reach shift 60; '^' carries 5 payload bits there.
        let err = decode("~~~~~~~~~~~~^?").unwrap_err();
        assert_eq!(err, PolylineError::Overflow { position: 0 });
    }

    #[test]
    fn test_decode_accepts_full_sixty_four_bit_value() {
        // Same prefix, but 'N' carries only the 4 bits that still fit.
        let path = decode("}~~~~~~~~~~~N?").unwrap();
        assert_eq!(path.first(), Some(GeoPoint::new(i64::MAX as f64 / SCALE, 0.0)));
    }

    #[test]
    fn test_decode_running_total_overflow() {
        // Each value is i64::MAX on its own; the second latitude pushes the
        // running total past it.
        let max = "}~~~~~~~~~~~N";
        let err = decode(&format!("{max}?{max}?")).unwrap_err();
        assert_eq!(err, PolylineError::Overflow { position: 14 });
    }

    #[test]
    fn test_encode_rejects_unrepresentable_delta() {
        let points = [GeoPoint::new(-9e13, 0.0), GeoPoint::new(9e13, 0.0)];
        assert_eq!(encode(&points), Err(PolylineError::OutOfRange { index: 1 }));
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert_eq!(
            encode(&[GeoPoint::new(1.0, 2.0), GeoPoint::new(f64::NAN, 0.0)]),
            Err(PolylineError::OutOfRange { index: 1 })
        );
        assert_eq!(
            encode(&[GeoPoint::new(0.0, f64::INFINITY)]),
            Err(PolylineError::OutOfRange { index: 0 })
        );
        assert_eq!(encode(&[GeoPoint::new(1e300, 0.0)]), Err(PolylineError::OutOfRange { index: 0 }));
    }

    #[test]
    fn test_encode_extreme_negative_delta_round_trips() {
        // Smallest fixed-point value reachable from zero in one step.
        let point = GeoPoint::new(-9.2e13, 0.0);
        let fixed = to_fixed(point.latitude).unwrap();
        let decoded = decode(&encode(&[point]).unwrap()).unwrap();
        assert_eq!(decoded.points(), &[GeoPoint::new(fixed as f64 / SCALE, 0.0)]);
    }

    #[test]
    fn test_from_str() {
        let path: GeoPath = REFERENCE.parse().unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_midpoint_empty_is_origin() {
        assert_eq!(midpoint(&[]), GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_midpoint_singleton() {
        let p = GeoPoint::new(7.29, 80.63);
        assert_eq!(midpoint(&[p]), p);
    }

    #[test]
    fn test_midpoint_picks_upper_middle_index() {
        let points = reference_points();
        assert_eq!(midpoint(&points[..2]), points[1]);
        assert_eq!(midpoint(&points), points[1]);
    }

    #[test]
    fn test_straight_line() {
        let a = GeoPoint::new(1.0, 2.0);
        let b = GeoPoint::new(3.0, 4.0);
        let path = GeoPath::straight_line(a, b);
        assert_eq!(path.first(), Some(a));
        assert_eq!(path.last(), Some(b));
        assert_eq!(path.midpoint(), b);
    }

    #[test]
    fn test_geo_point_serde_shape() {
        let json = serde_json::to_string(&GeoPoint::new(6.9, 79.8)).unwrap();
        assert_eq!(json, r#"{"lat":6.9,"lng":79.8}"#);

        let parsed: GeoPoint = serde_json::from_str(r#"{"latitude":6.9,"longitude":79.8}"#).unwrap();
        assert_eq!(parsed, GeoPoint::new(6.9, 79.8));
    }

    #[test]
    fn test_geo_path_serializes_as_array() {
        let path = GeoPath::new(vec![GeoPoint::new(1.5, 2.5)]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"lat":1.5,"lng":2.5}]"#);
    }
}
