//! Route input types and decoded segments
//!
//! This module provides the geographic point type, the legs handed over by a routing
//! backend, the decoded per-leg segments, and precomputed route totals.

use crate::{Result, decode_polyline, utils};
use geo::{Coord, LineString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic coordinate in WGS84 degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

impl RoutePoint {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether two points coincide within [`utils::SAME_POINT_EPSILON`]
    #[inline]
    pub fn same_as(&self, other: &RoutePoint) -> bool {
        (self.lat - other.lat).abs() <= utils::SAME_POINT_EPSILON
            && (self.lng - other.lng).abs() <= utils::SAME_POINT_EPSILON
    }
}

impl From<RoutePoint> for Coord<f64> {
    #[inline]
    fn from(point: RoutePoint) -> Self {
        Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<Coord<f64>> for RoutePoint {
    #[inline]
    fn from(coord: Coord<f64>) -> Self {
        RoutePoint::new(coord.y, coord.x)
    }
}

/// One leg of a multi-stop route, as produced by the routing backend
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteLeg {
    pub encoded_polyline: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub distance_meters: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub duration_seconds: Option<f64>,
}

impl RouteLeg {
    /// Create a leg with only a polyline
    pub fn new(encoded_polyline: impl Into<String>) -> Self {
        Self {
            encoded_polyline: encoded_polyline.into(),
            distance_meters: None,
            duration_seconds: None,
        }
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Decode this leg's polyline
    pub fn decode(&self) -> Result<Vec<RoutePoint>> {
        Ok(decode_polyline(&self.encoded_polyline)?)
    }
}

/// A decoded leg, ready to be drawn in a single colour
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedSegment {
    /// Decoded coordinates, in drawing order
    pub points: Vec<RoutePoint>,
    /// Stroke colour picked from the palette
    pub color: String,
    /// Index of the originating leg in the input slice
    pub leg_index: usize,
}

impl DecodedSegment {
    pub fn first(&self) -> Option<&RoutePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&RoutePoint> {
        self.points.last()
    }

    /// Length along the segment in meters (Haversine)
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| utils::haversine_distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Convert to a `geo::LineString` (x = longitude, y = latitude)
    pub fn to_line_string(&self) -> LineString<f64> {
        self.points.iter().copied().map(Coord::from).collect()
    }
}

/// Totals for a whole route
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteSummary {
    /// Number of legs in the input
    pub leg_count: usize,
    /// Total distance in meters
    pub total_distance_meters: f64,
    /// Total duration in seconds (legs without a duration contribute nothing)
    pub total_duration_seconds: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteSummary {
    /// Compute totals over all legs
    ///
    /// A leg without `distance_meters` contributes the Haversine length of its polyline,
    /// or nothing if the polyline cannot be decoded.
    pub fn from_legs(legs: &[RouteLeg]) -> Self {
        let mut summary = RouteSummary {
            leg_count: legs.len(),
            ..Default::default()
        };

        for (index, leg) in legs.iter().enumerate() {
            summary.total_distance_meters += match leg.distance_meters {
                Some(meters) => meters,
                None => match leg.decode() {
                    Ok(points) => points
                        .windows(2)
                        .map(|pair| utils::haversine_distance(&pair[0], &pair[1]))
                        .sum(),
                    Err(err) => {
                        tracing::warn!("Leg {index} has no distance and cannot be decoded: {err}");
                        0.0
                    }
                },
            };
            summary.total_duration_seconds += leg.duration_seconds.unwrap_or(0.0);
        }

        summary
    }

    /// Prefer totals the backend reported for the whole route over the per-leg sums
    pub fn with_route_totals(
        mut self,
        distance_meters: Option<f64>,
        duration_seconds: Option<f64>,
    ) -> Self {
        if let Some(meters) = distance_meters {
            self.total_distance_meters = meters;
        }
        if let Some(seconds) = duration_seconds {
            self.total_duration_seconds = seconds;
        }
        self
    }

    /// Total distance in kilometers, formatted with one decimal
    pub fn distance_km(&self) -> String {
        format!("{:.1}", self.total_distance_meters / 1000.0)
    }

    /// Total duration in whole minutes
    pub fn duration_minutes(&self) -> u64 {
        (self.total_duration_seconds / 60.0).round().max(0.0) as u64
    }
}
