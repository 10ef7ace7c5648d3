//! Utility functions and constants for Web Mercator pixel space and distances

use crate::RoutePoint;

/// Edge length of a single map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Maximum latitude that can be represented in Web Mercator
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Fixed-point scale of the encoded polyline format (5 decimal digits)
pub const POLYLINE_PRECISION: f64 = 1e5;

/// Two coordinates closer than this on both axes are the same point
pub const SAME_POINT_EPSILON: f64 = 1e-6;

/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Size of the whole world in pixels at the given zoom
///
/// # Arguments
/// * `zoom` - Zoom level (0 = the world fits in one tile)
///
/// # Returns
/// `TILE_SIZE * 2^zoom`
#[inline(always)]
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// Clamp a latitude into the range Web Mercator can represent
#[inline(always)]
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Check if a coordinate is a finite WGS84 position
#[inline(always)]
pub fn is_valid_wgs84(point: &RoutePoint) -> bool {
    point.lat.is_finite()
        && point.lng.is_finite()
        && (-90.0..=90.0).contains(&point.lat)
        && (-180.0..=180.0).contains(&point.lng)
}

/// Calculate the Haversine distance between two points in meters
#[inline]
pub fn haversine_distance(p1: &RoutePoint, p2: &RoutePoint) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_doubles_per_zoom() {
        assert_eq!(world_size(0), 256.0);
        assert_eq!(world_size(1), 512.0);
        assert_eq!(world_size(20), 256.0 * 1_048_576.0);
    }

    #[test]
    fn test_clamp_latitude() {
        assert_eq!(clamp_latitude(90.0), MAX_LATITUDE);
        assert_eq!(clamp_latitude(-90.0), -MAX_LATITUDE);
        assert_eq!(clamp_latitude(25.7565), 25.7565);
    }

    #[test]
    fn test_is_valid_wgs84() {
        assert!(is_valid_wgs84(&RoutePoint::new(25.7565, -80.376)));
        assert!(!is_valid_wgs84(&RoutePoint::new(91.0, 0.0)));
        assert!(!is_valid_wgs84(&RoutePoint::new(0.0, f64::NAN)));
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance(&RoutePoint::new(0.0, 0.0), &RoutePoint::new(1.0, 0.0));
        // 2 * PI * R / 360
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let p = RoutePoint::new(51.5074, -0.1278);
        assert!(haversine_distance(&p, &p).abs() < f64::EPSILON);
    }
}
