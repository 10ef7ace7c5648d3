//! Web Mercator projection into viewport pixels
//!
//! Absolute world pixels grow to hundreds of millions at high zoom levels, so points are
//! always expressed relative to the viewport center rather than the world origin.

use crate::{RoutePoint, utils};
use std::f64::consts::{FRAC_PI_4, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in pixel space
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Absolute Web Mercator pixel position of a point at the given zoom
///
/// Latitudes are clamped to [`utils::MAX_LATITUDE`] so the poles stay finite.
#[inline(always)]
pub fn world_pixel(point: RoutePoint, zoom: u8) -> ProjectedPoint {
    let world = utils::world_size(zoom);
    let lat_rad = utils::clamp_latitude(point.lat).to_radians();

    let x = (point.lng + 180.0) / 360.0 * world;
    let y = world / 2.0 - world * (FRAC_PI_4 + lat_rad / 2.0).tan().ln() / (2.0 * PI);

    ProjectedPoint::new(x, y)
}

/// Convert an absolute Web Mercator pixel position back to WGS84
#[inline]
pub fn unproject_world_pixel(x: f64, y: f64, zoom: u8) -> RoutePoint {
    let world = utils::world_size(zoom);
    let lng = x / world * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / world;
    let lat = n.sinh().atan().to_degrees();
    RoutePoint::new(lat, lng)
}

/// Project a point into a viewport centered on `center`
///
/// Returns `viewport / 2 + (pixel(point) - pixel(center))` on each axis.
pub fn project(
    point: RoutePoint,
    zoom: u8,
    center: RoutePoint,
    viewport_width_px: f64,
    viewport_height_px: f64,
) -> ProjectedPoint {
    Projector::new(zoom, center, viewport_width_px, viewport_height_px).project(point)
}

/// Projects many points at a fixed zoom and center
///
/// The center's world pixel is computed once instead of per point.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    zoom: u8,
    center: RoutePoint,
    center_pixel: ProjectedPoint,
    half_width: f64,
    half_height: f64,
}

impl Projector {
    pub fn new(
        zoom: u8,
        center: RoutePoint,
        viewport_width_px: f64,
        viewport_height_px: f64,
    ) -> Self {
        Self {
            zoom,
            center,
            center_pixel: world_pixel(center, zoom),
            half_width: viewport_width_px / 2.0,
            half_height: viewport_height_px / 2.0,
        }
    }

    #[inline]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[inline]
    pub fn center(&self) -> RoutePoint {
        self.center
    }

    /// Viewport pixel position of a point
    #[inline]
    pub fn project(&self, point: RoutePoint) -> ProjectedPoint {
        let pixel = world_pixel(point, self.zoom);
        ProjectedPoint::new(
            self.half_width + (pixel.x - self.center_pixel.x),
            self.half_height + (pixel.y - self.center_pixel.y),
        )
    }

    /// Geographic position under a viewport pixel
    #[inline]
    pub fn unproject(&self, pixel: ProjectedPoint) -> RoutePoint {
        unproject_world_pixel(
            self.center_pixel.x + (pixel.x - self.half_width),
            self.center_pixel.y + (pixel.y - self.half_height),
            self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_pixel_origin() {
        let pixel = world_pixel(RoutePoint::new(0.0, 0.0), 0);
        assert!((pixel.x - 128.0).abs() < 1e-9);
        assert!((pixel.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_world_pixel_edges() {
        let west = world_pixel(RoutePoint::new(0.0, -180.0), 1);
        assert!(west.x.abs() < 1e-9);

        let east = world_pixel(RoutePoint::new(0.0, 180.0), 1);
        assert!((east.x - 512.0).abs() < 1e-9);

        // The clamped pole maps to the top edge
        let north = world_pixel(RoutePoint::new(90.0, 0.0), 1);
        assert!(north.y.is_finite());
        assert!(north.y.abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        let south = world_pixel(RoutePoint::new(25.0, 0.0), 10);
        let north = world_pixel(RoutePoint::new(26.0, 0.0), 10);
        assert!(north.y < south.y);
    }

    #[test]
    fn test_unproject_round_trip() {
        let point = RoutePoint::new(25.7565, -80.376);
        let pixel = world_pixel(point, 17);
        let back = unproject_world_pixel(pixel.x, pixel.y, 17);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lng - point.lng).abs() < 1e-9);
    }

    #[test]
    fn test_center_projects_to_viewport_center() {
        let center = RoutePoint::new(25.7565, -80.376);
        let projected = project(center, 20, center, 640.0, 480.0);
        assert!((projected.x - 320.0).abs() < 1e-6);
        assert!((projected.y - 240.0).abs() < 1e-6);
    }

    #[test]
    fn test_offsets_are_relative_to_center() {
        let center = RoutePoint::new(0.0, 0.0);
        // At zoom 0 the world is 256px wide, so 90 degrees east is 64px
        let projected = project(RoutePoint::new(0.0, 90.0), 0, center, 200.0, 100.0);
        assert!((projected.x - 164.0).abs() < 1e-9);
        assert!((projected.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_projector_unproject() {
        let projector = Projector::new(16, RoutePoint::new(25.7565, -80.376), 640.0, 480.0);
        let point = RoutePoint::new(25.7571, -80.3749);
        let back = projector.unproject(projector.project(point));
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lng - point.lng).abs() < 1e-9);
        assert_eq!(projector.zoom(), 16);
    }
}
