//! Output writers: JSON report and standalone SVG
//!
//! These are the drawing surfaces. They only consume the pixel-space scene produced by
//! the library and never redo any projection math.

use super::AppError;
use route_projector_lib::{Bounds, MarkerKind, RenderOutput, RouteSummary};
use serde::Serialize;

/// Stroke width of route paths in pixels
const PATH_STROKE_WIDTH: f64 = 4.0;

/// Marker appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: &'static str,
    pub radius: f64,
    pub title: &'static str,
}

impl MarkerStyle {
    pub fn for_kind(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::Start => MarkerStyle {
                fill: "#27ae60",
                radius: 8.0,
                title: "Route Start",
            },
            MarkerKind::End => MarkerStyle {
                fill: "#e74c3c",
                radius: 8.0,
                title: "Route End",
            },
            MarkerKind::Waypoint => MarkerStyle {
                fill: "#95a5a6",
                radius: 6.0,
                title: "Route Waypoint",
            },
        }
    }
}

/// Everything the JSON output contains
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    summary: &'a RouteSummary,
    bounds: Option<Bounds>,
    zoom: u8,
    scene: &'a RenderOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    basemap_url: Option<&'a str>,
}

/// Serialize the scene and route totals as pretty-printed JSON
pub fn to_json(
    scene: &RenderOutput,
    summary: &RouteSummary,
    bounds: Option<Bounds>,
    zoom: u8,
    basemap_url: Option<&str>,
) -> Result<String, AppError> {
    let report = Report {
        summary,
        bounds,
        zoom,
        scene,
        basemap_url,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Draw the scene as a standalone SVG document
///
/// The basemap, when given, is drawn as an `<image>` under the paths, sized to the
/// viewport.
pub fn to_svg(scene: &RenderOutput, basemap_url: Option<&str>) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = scene.width,
        h = scene.height
    );

    if let Some(url) = basemap_url {
        svg.push_str(&format!(
            "  <image href=\"{}\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"/>\n",
            escape_attr(url),
            scene.width,
            scene.height
        ));
    }

    for path in &scene.paths {
        let points: Vec<String> = path
            .pixel_points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        svg.push_str(&format!(
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
            points.join(" "),
            escape_attr(&path.color),
            PATH_STROKE_WIDTH
        ));
    }

    for marker in &scene.markers {
        let style = MarkerStyle::for_kind(marker.kind);
        svg.push_str(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"1.5\"><title>{}</title></circle>\n",
            marker.pixel_point.x, marker.pixel_point.y, style.radius, style.fill, style.title
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
