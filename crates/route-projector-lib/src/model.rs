//! Render model assembly
//!
//! This module provides the high-level API that turns route legs into coloured
//! segments, markers, bounds and a zoom level. Everything is recomputed on each call;
//! the caller owns whatever it draws.

use crate::{
    Bounds, DecodedSegment, Result, RouteError, RouteLeg, RoutePoint, ZoomFit, compute_bounds,
    fit_zoom_with, utils,
};
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alternating leg colours (FIU blue and dark gold)
pub const DEFAULT_PALETTE: [&str; 2] = ["#003366", "#B8860B"];

/// Which leg junctions get a waypoint marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum JunctionPolicy {
    /// Only where a leg does not start where the previous one ended
    #[default]
    Discontinuities,
    /// At the start of every leg after the first
    EveryLeg,
}

/// Configuration for building render models
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RenderConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Segment colours, assigned by segment index modulo the palette length
    pub palette: Vec<String>,
    /// Zoom search parameters
    pub zoom_fit: ZoomFit,
    /// Waypoint placement at leg junctions
    pub junctions: JunctionPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            zoom_fit: ZoomFit::default(),
            junctions: JunctionPolicy::default(),
        }
    }
}

impl RenderConfig {
    /// Default configuration for a viewport of the given size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RouteError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            ..Default::default()
        })
    }

    pub fn with_palette<I, S>(mut self, palette: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let palette: Vec<String> = palette.into_iter().map(Into::into).collect();
        if palette.is_empty() {
            return Err(RouteError::EmptyPalette);
        }
        self.palette = palette;
        Ok(self)
    }

    pub fn with_junctions(mut self, junctions: JunctionPolicy) -> Self {
        self.junctions = junctions;
        self
    }

    /// Fraction of the viewport the route may occupy, in `(0, 1]`
    pub fn with_padding(mut self, padding: f64) -> Result<Self> {
        if !padding.is_finite() || padding <= 0.0 || padding > 1.0 {
            return Err(RouteError::InvalidPadding(padding));
        }
        self.zoom_fit.padding = padding;
        Ok(self)
    }

    /// Colour of the segment at `index`
    ///
    /// An empty palette (e.g. from a deserialized config) falls back to the default one.
    pub fn segment_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
        } else {
            self.palette[index % self.palette.len()].clone()
        }
    }
}

/// Kind of route marker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarkerKind {
    Start,
    End,
    Waypoint,
}

/// A marker at a geographic position
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteMarker {
    pub position: RoutePoint,
    pub kind: MarkerKind,
}

impl RouteMarker {
    pub fn new(position: RoutePoint, kind: MarkerKind) -> Self {
        Self { position, kind }
    }
}

/// Everything needed to draw a route, in geographic coordinates
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderModel {
    /// Non-empty, de-duplicated, coloured segments
    pub segments: Vec<DecodedSegment>,
    /// Start first, then waypoints in route order, then end
    pub markers: Vec<RouteMarker>,
    /// `None` when there is nothing to draw
    pub bounds: Option<Bounds>,
    /// Zoom that fits `bounds` into the configured viewport
    pub zoom: u8,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Viewport center, the midpoint of the bounds
    pub fn center(&self) -> Option<RoutePoint> {
        self.bounds.map(|b| b.center())
    }

    /// Total number of decoded points across all segments
    pub fn total_points(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    /// Markers of one kind
    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &RouteMarker> {
        self.markers.iter().filter(move |m| m.kind == kind)
    }
}

/// Build the render model for a route
///
/// Legs that fail to decode or decode to nothing are skipped, as are legs whose encoded
/// string repeats an earlier leg. An empty result has no segments, no markers, no
/// bounds and the minimum zoom.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn build_render_model(legs: &[RouteLeg], config: &RenderConfig) -> RenderModel {
    let segments = decode_segments(legs, config);

    let bounds = {
        #[cfg(feature = "profiling")]
        profiling::scope!("model::bounds");
        let all_points: Vec<RoutePoint> = segments
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        compute_bounds(&all_points)
    };

    let zoom = match &bounds {
        Some(bounds) => fit_zoom_with(
            bounds,
            f64::from(config.width),
            f64::from(config.height),
            &config.zoom_fit,
        ),
        None => config.zoom_fit.min_zoom,
    };

    let markers = assemble_markers(&segments, config.junctions);

    tracing::debug!(
        "Built render model: {} of {} legs drawn, {} markers, zoom {}",
        segments.len(),
        legs.len(),
        markers.len(),
        zoom
    );

    RenderModel {
        segments,
        markers,
        bounds,
        zoom,
    }
}

/// Decode, filter and colour the legs
fn decode_segments(legs: &[RouteLeg], config: &RenderConfig) -> Vec<DecodedSegment> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(legs.len());
    let mut segments = Vec::with_capacity(legs.len());

    for (leg_index, leg) in legs.iter().enumerate() {
        if !seen.insert(leg.encoded_polyline.as_str()) {
            tracing::warn!("Skipping leg {leg_index}: duplicate of an earlier leg");
            continue;
        }

        let points = match leg.decode() {
            Ok(points) => points,
            Err(err) => {
                tracing::warn!("Skipping leg {leg_index}: {err}");
                continue;
            }
        };
        if points.is_empty() {
            tracing::debug!("Skipping leg {leg_index}: no points");
            continue;
        }
        if let Some(point) = points.iter().find(|p| !utils::is_valid_wgs84(p)) {
            tracing::warn!(
                "Leg {leg_index} has a point outside WGS84 bounds: ({}, {})",
                point.lat,
                point.lng
            );
        }

        segments.push(DecodedSegment {
            points,
            color: config.segment_color(segments.len()),
            leg_index,
        });
    }

    segments
}

/// Place start, end and junction markers
fn assemble_markers(segments: &[DecodedSegment], junctions: JunctionPolicy) -> Vec<RouteMarker> {
    let (Some(start), Some(last)) = (
        segments.first().and_then(|s| s.first()),
        segments.last().and_then(|s| s.last()),
    ) else {
        return Vec::new();
    };

    // A closed loop or single-point route only gets a start marker
    let end = (!start.same_as(last)).then_some(*last);

    let mut markers = vec![RouteMarker::new(*start, MarkerKind::Start)];

    for pair in segments.windows(2) {
        let (previous, segment) = (&pair[0], &pair[1]);
        let Some(junction) = segment.first() else {
            continue;
        };

        if junction.same_as(start) || end.is_some_and(|end| junction.same_as(&end)) {
            continue;
        }
        if junctions == JunctionPolicy::Discontinuities
            && previous.last().is_some_and(|p| p.same_as(junction))
        {
            continue;
        }
        if markers.iter().any(|m| m.position.same_as(junction)) {
            continue;
        }

        markers.push(RouteMarker::new(*junction, MarkerKind::Waypoint));
    }

    if let Some(end) = end {
        markers.push(RouteMarker::new(end, MarkerKind::End));
    }

    markers
}
