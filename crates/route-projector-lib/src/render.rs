//! Pixel-space output for drawing surfaces
//!
//! [`render`] only computes geometry. SVG writers, canvases or a composited static map
//! image consume [`RenderOutput`]; a raster basemap can be requested independently
//! through the [`BasemapRequest`] keyed to the same center and zoom.

use crate::{MarkerKind, ProjectedPoint, Projector, RenderModel, RoutePoint, utils, world_pixel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One segment in viewport pixels
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderPath {
    pub color: String,
    pub pixel_points: Vec<ProjectedPoint>,
}

/// One marker in viewport pixels
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderMarker {
    pub kind: MarkerKind,
    pub pixel_point: ProjectedPoint,
}

/// Drawable primitives for one viewport
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderOutput {
    pub width: u32,
    pub height: u32,
    pub paths: Vec<RenderPath>,
    pub markers: Vec<RenderMarker>,
    /// Raster basemap matching the overlay, `None` for an empty model
    pub basemap: Option<BasemapRequest>,
}

impl RenderOutput {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.markers.is_empty()
    }
}

/// Parameters for fetching a raster basemap that lines up with the overlay
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasemapRequest {
    pub center: RoutePoint,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
}

/// Slippy-map tile address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileId {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl BasemapRequest {
    /// The tile containing the center
    pub fn center_tile(&self) -> TileId {
        let pixel = world_pixel(self.center, self.zoom);
        let tiles_per_side = utils::world_size(self.zoom) / utils::TILE_SIZE;
        let last = tiles_per_side - 1.0;

        TileId {
            zoom: self.zoom,
            x: (pixel.x / utils::TILE_SIZE).floor().clamp(0.0, last) as u32,
            y: (pixel.y / utils::TILE_SIZE).floor().clamp(0.0, last) as u32,
        }
    }

    /// Fill a URL template
    ///
    /// Supported placeholders: `{lat}`, `{lng}`, `{zoom}`, `{width}`, `{height}` and
    /// `{x}`, `{y}` for the center tile. For example
    /// `https://tile.openstreetmap.org/{zoom}/{x}/{y}.png`.
    pub fn url(&self, template: &str) -> String {
        let tile = self.center_tile();
        template
            .replace("{lat}", &format!("{:.6}", self.center.lat))
            .replace("{lng}", &format!("{:.6}", self.center.lng))
            .replace("{zoom}", &self.zoom.to_string())
            .replace("{width}", &self.width.to_string())
            .replace("{height}", &self.height.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

/// Project a render model into viewport pixels
///
/// The viewport is centered on the midpoint of the model's bounds at the model's zoom.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn render(model: &RenderModel, viewport_width_px: u32, viewport_height_px: u32) -> RenderOutput {
    let Some(center) = model.center() else {
        return RenderOutput {
            width: viewport_width_px,
            height: viewport_height_px,
            ..Default::default()
        };
    };

    let projector = Projector::new(
        model.zoom,
        center,
        f64::from(viewport_width_px),
        f64::from(viewport_height_px),
    );

    let paths = model
        .segments
        .iter()
        .map(|segment| RenderPath {
            color: segment.color.clone(),
            pixel_points: segment
                .points
                .iter()
                .map(|p| projector.project(*p))
                .collect(),
        })
        .collect();

    let markers = model
        .markers
        .iter()
        .map(|marker| RenderMarker {
            kind: marker.kind,
            pixel_point: projector.project(marker.position),
        })
        .collect();

    RenderOutput {
        width: viewport_width_px,
        height: viewport_height_px,
        paths,
        markers,
        basemap: Some(BasemapRequest {
            center,
            zoom: model.zoom,
            width: viewport_width_px,
            height: viewport_height_px,
        }),
    }
}
