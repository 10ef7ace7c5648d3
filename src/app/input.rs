//! Route input loading
//!
//! Accepts either a plain array of legs or the response of the routing backend. Of the
//! response, only the first route is used: its legs when present, otherwise its
//! route-level polyline as a single leg.

use super::AppError;
use route_projector_lib::{RouteLeg, RouteSummary};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Either shape the input file may take
#[derive(Deserialize)]
#[serde(untagged)]
enum RouteInput {
    Legs(Vec<RouteLeg>),
    Response(RoutesResponse),
}

/// Subset of the routing backend response that carries the geometry
#[derive(Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    /// Whole-route geometry, requested when the field mask omits legs
    #[serde(default)]
    polyline: Option<ApiPolyline>,
    #[serde(default)]
    distance_meters: Option<f64>,
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLeg {
    #[serde(default)]
    polyline: Option<ApiPolyline>,
    #[serde(default)]
    distance_meters: Option<f64>,
    /// Duration without traffic, e.g. `"95s"`
    #[serde(default)]
    static_duration: Option<String>,
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPolyline {
    #[serde(default)]
    encoded_polyline: String,
}

impl From<ApiLeg> for RouteLeg {
    fn from(leg: ApiLeg) -> Self {
        RouteLeg {
            encoded_polyline: leg.polyline.map(|p| p.encoded_polyline).unwrap_or_default(),
            distance_meters: leg.distance_meters,
            duration_seconds: leg
                .static_duration
                .or(leg.duration)
                .as_deref()
                .and_then(parse_duration),
        }
    }
}

/// Legs to draw plus any totals reported for the route as a whole
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRoute {
    pub legs: Vec<RouteLeg>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
}

impl LoadedRoute {
    /// Route totals, preferring the backend's route-level figures
    pub fn summary(&self) -> RouteSummary {
        RouteSummary::from_legs(&self.legs)
            .with_route_totals(self.distance_meters, self.duration_seconds)
    }
}

impl From<ApiRoute> for LoadedRoute {
    fn from(route: ApiRoute) -> Self {
        let duration_seconds = route.duration.as_deref().and_then(parse_duration);

        let legs = if !route.legs.is_empty() {
            route.legs.into_iter().map(RouteLeg::from).collect()
        } else if let Some(polyline) = route.polyline {
            tracing::debug!("Route has no legs, using its overall polyline");
            vec![RouteLeg {
                encoded_polyline: polyline.encoded_polyline,
                distance_meters: route.distance_meters,
                duration_seconds,
            }]
        } else {
            Vec::new()
        };

        LoadedRoute {
            legs,
            distance_meters: route.distance_meters,
            duration_seconds,
        }
    }
}

/// Parse a duration string such as `"95s"` or `"1.5s"` into seconds
pub fn parse_duration(value: &str) -> Option<f64> {
    value
        .trim()
        .strip_suffix('s')?
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

/// Parse a route from JSON
pub fn parse_route(json: &str) -> Result<LoadedRoute, AppError> {
    match serde_json::from_str::<RouteInput>(json)? {
        RouteInput::Legs(legs) => Ok(LoadedRoute {
            legs,
            ..Default::default()
        }),
        RouteInput::Response(response) => response
            .routes
            .into_iter()
            .next()
            .map(LoadedRoute::from)
            .ok_or(AppError::NoRoutes),
    }
}

/// Read a route from a file, or from stdin when the path is `-`
pub fn read_route(path: &Path) -> Result<LoadedRoute, AppError> {
    let json = if path.as_os_str() == "-" {
        tracing::debug!("Reading route from stdin");
        let mut buffer = String::new();
        std::io::stdin().lock().read_to_string(&mut buffer)?;
        buffer
    } else {
        tracing::debug!("Reading route from {}", path.display());
        std::fs::read_to_string(path)?
    };

    let route = parse_route(&json)?;
    tracing::info!("Loaded {} legs", route.legs.len());
    Ok(route)
}
