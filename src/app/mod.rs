//! Application module
//!
//! Loads a route, runs it through the projector and writes the result:
//! - Input: an array of legs or a routing backend response (file or stdin)
//! - Output: a JSON report or a standalone SVG (file or stdout)

mod input;
mod output;
pub(crate) mod settings;

use crate::app::settings::{OutputFormat, Settings};
use route_projector_lib::{RouteError, build_render_model, render};
use std::io::Write;

/// Error types for the command line application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Routing response contains no routes")]
    NoRoutes,
}

/// Run the whole pipeline once
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let config = settings.render_config()?;
    let route = input::read_route(&settings.input)?;

    let model = build_render_model(&route.legs, &config);
    if model.is_empty() {
        tracing::warn!("Nothing to draw: no leg decoded to any points");
    }
    let scene = render(&model, config.width, config.height);

    let summary = route.summary();
    tracing::info!(
        "Route: {} legs, {} km, {} min, zoom {}",
        summary.leg_count,
        summary.distance_km(),
        summary.duration_minutes(),
        model.zoom
    );

    let template = settings.basemap_template();
    let basemap_url = match (&template, &scene.basemap) {
        (Some(template), Some(basemap)) => Some(basemap.url(template)),
        _ => None,
    };

    let rendered = match settings.format {
        OutputFormat::Json => output::to_json(
            &scene,
            &summary,
            model.bounds,
            model.zoom,
            basemap_url.as_deref(),
        )?,
        OutputFormat::Svg => output::to_svg(&scene, basemap_url.as_deref()),
    };

    match &settings.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
