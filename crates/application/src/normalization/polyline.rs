//! Encoded polyline codec at 1e6 precision
//!
//! Each coordinate is stored as a zig-zag encoded delta from the previous
//! point, split into 5-bit chunks offset by 63 so every chunk is printable
//! ASCII (`?` to `~`). The first value of a point is the longitude, the
//! second the latitude.
//!
//! Transit routes arrive as several segments joined with `;`. The separator
//! may only appear between points and the running accumulators carry over
//! it, so a joined string decodes to one continuous sequence.

use domain::{DomainError, GeoPoint};

/// Fixed-point scale used by the routing provider
pub const PRECISION: f64 = 1_000_000.0;

/// Separator between transit segments
pub const SEGMENT_SEPARATOR: char = ';';

const SEPARATOR_BYTE: u8 = b';';
const CHUNK_OFFSET: u8 = 63;
const MAX_CHUNK_BYTE: u8 = CHUNK_OFFSET + 0x3f;
const CONTINUATION_BIT: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;
/// Seven chunks cover any delta between two valid coordinates at 1e6
const MAX_SHIFT: u32 = 30;

/// Decode a polyline into points in travel order
///
/// An empty string decodes to an empty sequence. Empty transit segments
/// (`";;"`, leading or trailing separators) are skipped.
///
/// # Errors
///
/// Returns [`DomainError::MalformedPolyline`] when the input contains a byte
/// outside the chunk alphabet, ends in the middle of a point, carries a
/// chunk too long for any coordinate, or decodes to a point outside valid
/// longitude/latitude ranges.
pub fn decode_polyline(text: &str) -> Result<Vec<GeoPoint>, DomainError> {
    let bytes = text.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lng_acc: i64 = 0;
    let mut lat_acc: i64 = 0;

    while index < bytes.len() {
        if bytes[index] == SEPARATOR_BYTE {
            index += 1;
            continue;
        }

        let point_start = index;
        lng_acc += read_delta(bytes, &mut index)?;
        lat_acc += read_delta(bytes, &mut index)?;
        points.push(to_point(lng_acc, lat_acc, point_start)?);
    }

    Ok(points)
}

/// Encode points into a polyline, the inverse of [`decode_polyline`]
///
/// Coordinates are rounded to the nearest 1e-6 degree.
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut previous_lng: i64 = 0;
    let mut previous_lat: i64 = 0;

    for point in points {
        let lng = to_fixed(point.longitude());
        let lat = to_fixed(point.latitude());
        push_delta(lng - previous_lng, &mut encoded);
        push_delta(lat - previous_lat, &mut encoded);
        previous_lng = lng;
        previous_lat = lat;
    }

    encoded
}

fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DomainError> {
    let start = *index;
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(malformed(start, "input ends inside a point"));
        };
        if !(CHUNK_OFFSET..=MAX_CHUNK_BYTE).contains(&byte) {
            return Err(malformed(
                *index,
                format!("byte 0x{byte:02x} is not a polyline chunk"),
            ));
        }
        if shift > MAX_SHIFT {
            return Err(malformed(start, "coordinate chunk is too long"));
        }

        let chunk = u64::from(byte - CHUNK_OFFSET);
        value |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    // value < 2^35, so the shifted magnitude always fits
    let magnitude = i64::try_from(value >> 1)
        .map_err(|_| malformed(start, "coordinate chunk is too long"))?;
    Ok(if value & 1 == 1 { !magnitude } else { magnitude })
}

#[allow(clippy::cast_precision_loss)]
fn to_point(lng_acc: i64, lat_acc: i64, position: usize) -> Result<GeoPoint, DomainError> {
    let longitude = lng_acc as f64 / PRECISION;
    let latitude = lat_acc as f64 / PRECISION;
    GeoPoint::from_lng_lat(longitude, latitude).map_err(|_| {
        malformed(
            position,
            format!("decoded point ({longitude}, {latitude}) is outside valid ranges"),
        )
    })
}

#[allow(clippy::cast_possible_truncation)]
fn to_fixed(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

#[allow(clippy::cast_sign_loss)]
fn push_delta(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= CONTINUATION_BIT {
        out.push(chunk_char((value & CHUNK_MASK) | CONTINUATION_BIT));
        value >>= 5;
    }
    out.push(chunk_char(value));
}

#[allow(clippy::cast_possible_truncation)]
fn chunk_char(chunk: u64) -> char {
    char::from(chunk as u8 + CHUNK_OFFSET)
}

fn malformed(position: usize, reason: impl Into<String>) -> DomainError {
    DomainError::MalformedPolyline {
        position,
        reason: reason.into(),
    }
}
