//! Route Projector Library - Geometry for static route maps
//!
//! This library turns the legs of a multi-stop route, as returned by a routing backend,
//! into pixel-space drawing primitives for a fixed-size viewport. It never touches a
//! drawing API: callers (SVG writers, canvases, map widgets) consume the output.
//!
//! # Architecture
//!
//! - **[`decode_polyline`]**: Encoded polyline strings to [`RoutePoint`] lists
//! - **[`compute_bounds`] / [`fit_zoom`]**: Bounding region and the tightest Web Mercator zoom
//! - **[`project`] / [`Projector`]**: Geographic to viewport pixel coordinates
//! - **[`build_render_model`]**: Coloured segments plus start, end and waypoint markers
//! - **[`render`]**: Pixel paths, pixel markers and a matching [`BasemapRequest`]
//!
//! # Example
//! ```
//! use route_projector_lib::{RenderConfig, RouteLeg, build_render_model, render};
//!
//! let legs = vec![RouteLeg::new("_p~iF~ps|U_ulLnnqC_mqNvxq`@")];
//! let config = RenderConfig::default();
//! let model = build_render_model(&legs, &config);
//! let scene = render(&model, config.width, config.height);
//! assert_eq!(scene.paths.len(), 1);
//! ```

mod bounds;
mod model;
mod polyline;
mod projection;
mod render;
mod route;
pub mod utils;

// Public API exports
pub use bounds::{Bounds, ZoomFit, compute_bounds, fit_zoom, fit_zoom_with};
pub use model::{
    DEFAULT_PALETTE, JunctionPolicy, MarkerKind, RenderConfig, RenderModel, RouteMarker,
    build_render_model,
};
pub use polyline::{decode_polyline, encode_polyline};
pub use projection::{ProjectedPoint, Projector, project, unproject_world_pixel, world_pixel};
pub use render::{BasemapRequest, RenderMarker, RenderOutput, RenderPath, TileId, render};
pub use route::{DecodedSegment, RouteLeg, RoutePoint, RouteSummary};

/// Errors produced while decoding an encoded polyline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid character {byte:#04x} at byte {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("value starting at byte {position} does not terminate within 7 chunks")]
    Overlong { position: usize },

    #[error("polyline ends in the middle of a coordinate at byte {position}")]
    Truncated { position: usize },
}

/// Error types for the route projector
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Polyline decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("Invalid padding {0}: expected a fraction in (0, 1]")]
    InvalidPadding(f64),

    #[error("Empty colour palette")]
    EmptyPalette,
}

pub type Result<T> = std::result::Result<T, RouteError>;
