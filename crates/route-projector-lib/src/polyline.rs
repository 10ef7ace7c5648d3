//! Encoded polyline codec
//!
//! The format stores each coordinate as a signed delta from the previous one, scaled by
//! 1e5, zigzag-encoded and split into 5-bit chunks (least significant first). Every chunk
//! except the last carries the continuation bit `0x20`, and each chunk is offset by 63 so
//! the result is printable ASCII.

use crate::{DecodeError, RoutePoint, utils::POLYLINE_PRECISION};

/// Smallest byte of the encoded alphabet (`'?'`)
const CHUNK_OFFSET: u8 = 63;

/// Largest byte of the encoded alphabet (`'~'`)
const MAX_ENCODED_BYTE: u8 = 126;

const CONTINUATION_BIT: i64 = 0x20;

const CHUNK_MASK: i64 = 0x1f;

/// A 32-bit value never needs more than 7 chunks of 5 bits
const MAX_CHUNKS_PER_VALUE: u32 = 7;

/// Decode an encoded polyline into absolute coordinates
///
/// An empty string decodes to an empty list. Corrupt input is rejected with a
/// [`DecodeError`] instead of being partially decoded.
///
/// # Example
/// ```
/// use route_projector_lib::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn decode_polyline(encoded: &str) -> Result<Vec<RoutePoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    // Each coordinate takes at least two bytes, usually around eight
    let mut points = Vec::with_capacity(bytes.len() / 4);

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(DecodeError::Truncated { position: index });
        }
        lng += next_delta(bytes, &mut index)?;

        points.push(RoutePoint::new(
            lat as f64 / POLYLINE_PRECISION,
            lng as f64 / POLYLINE_PRECISION,
        ));
    }

    Ok(points)
}

/// Read one zigzag-encoded value starting at `index`, advancing past it
#[inline]
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let start = *index;
    let mut result: i64 = 0;

    for chunk_index in 0..MAX_CHUNKS_PER_VALUE {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::Truncated { position: *index });
        };
        if !(CHUNK_OFFSET..=MAX_ENCODED_BYTE).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                position: *index,
                byte,
            });
        }
        *index += 1;

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << (5 * chunk_index);

        if chunk & CONTINUATION_BIT == 0 {
            let delta = if result & 1 != 0 {
                !(result >> 1)
            } else {
                result >> 1
            };
            return Ok(delta);
        }
    }

    Err(DecodeError::Overlong { position: start })
}

/// Encode coordinates into the polyline format
///
/// Coordinates are rounded to 1e-5 degrees before the deltas are taken, so encoding
/// followed by [`decode_polyline`] reproduces the input within that precision.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn encode_polyline(points: &[RoutePoint]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * POLYLINE_PRECISION).round() as i64;
        let lng = (point.lng * POLYLINE_PRECISION).round() as i64;

        push_value(lat - prev_lat, &mut encoded);
        push_value(lng - prev_lng, &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

#[inline]
fn push_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };

    while value >= CONTINUATION_BIT {
        out.push(char::from(
            ((CONTINUATION_BIT | (value & CHUNK_MASK)) as u8) + CHUNK_OFFSET,
        ));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHUNK_OFFSET));
}
