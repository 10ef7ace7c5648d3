//! Bounding region and zoom fitting
//!
//! The zoom search walks from the most zoomed-in level outwards and keeps the first
//! level at which the whole route, projected to Web Mercator pixels, fits inside the
//! padded viewport.

use crate::{RoutePoint, world_pixel};
use geo::{BoundingRect, Coord, MultiPoint, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Degenerate spans are widened to this many degrees before fitting
const ZERO_SPAN_EPSILON: f64 = 1e-5;

/// Geographic bounding box of a route, in WGS84 degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Midpoint of the bounds, used as the viewport center
    #[inline]
    pub fn center(&self) -> RoutePoint {
        RoutePoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Whether `other` lies entirely inside these bounds
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min_lat <= other.min_lat
            && self.max_lat >= other.max_lat
            && self.min_lng <= other.min_lng
            && self.max_lng >= other.max_lng
    }

    /// South-west corner
    #[inline]
    pub fn south_west(&self) -> RoutePoint {
        RoutePoint::new(self.min_lat, self.min_lng)
    }

    /// North-east corner
    #[inline]
    pub fn north_east(&self) -> RoutePoint {
        RoutePoint::new(self.max_lat, self.max_lng)
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }
}

impl From<Bounds> for Rect<f64> {
    fn from(bounds: Bounds) -> Self {
        Rect::new(
            Coord {
                x: bounds.min_lng,
                y: bounds.min_lat,
            },
            Coord {
                x: bounds.max_lng,
                y: bounds.max_lat,
            },
        )
    }
}

/// Parameters of the zoom search
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ZoomFit {
    /// Fraction of each viewport dimension the route may occupy
    pub padding: f64,
    /// Fallback when nothing fits
    pub min_zoom: u8,
    /// Where the search starts
    pub max_zoom: u8,
}

impl Default for ZoomFit {
    fn default() -> Self {
        Self {
            padding: 0.9,
            min_zoom: 2,
            max_zoom: 20,
        }
    }
}

/// Compute the bounding box of a set of points
///
/// Returns `None` for an empty input.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compute_bounds(points: &[RoutePoint]) -> Option<Bounds> {
    let multi_point: MultiPoint<f64> = points.iter().map(|p| Coord::from(*p)).collect();
    multi_point.bounding_rect().map(Bounds::from)
}

/// Pick the highest zoom in `2..=20` at which the bounds fit 90% of the viewport
pub fn fit_zoom(bounds: &Bounds, viewport_width_px: f64, viewport_height_px: f64) -> u8 {
    fit_zoom_with(
        bounds,
        viewport_width_px,
        viewport_height_px,
        &ZoomFit::default(),
    )
}

/// Pick the highest zoom at which the bounds fit the padded viewport
///
/// Zero-span axes are widened to a small epsilon, so a single point resolves to
/// `fit.max_zoom`. Falls back to `fit.min_zoom` if nothing fits.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn fit_zoom_with(
    bounds: &Bounds,
    viewport_width_px: f64,
    viewport_height_px: f64,
    fit: &ZoomFit,
) -> u8 {
    let max_width = viewport_width_px * fit.padding;
    let max_height = viewport_height_px * fit.padding;

    let south_west = bounds.south_west();
    let north_east = RoutePoint::new(
        bounds.max_lat.max(bounds.min_lat + ZERO_SPAN_EPSILON),
        bounds.max_lng.max(bounds.min_lng + ZERO_SPAN_EPSILON),
    );

    for zoom in (fit.min_zoom..=fit.max_zoom).rev() {
        let sw = world_pixel(south_west, zoom);
        let ne = world_pixel(north_east, zoom);
        let span_x = (ne.x - sw.x).abs();
        // Pixel Y grows southwards
        let span_y = (sw.y - ne.y).abs();

        if span_x <= max_width && span_y <= max_height {
            tracing::trace!(zoom, span_x, span_y, "Bounds fit viewport");
            return zoom;
        }
    }

    fit.min_zoom
}
