use crate::entrypoints::cli::{get_env, parse_args};
use clap::{Parser, ValueEnum};
use route_projector_lib::{JunctionPolicy, RenderConfig, Result};
use std::path::PathBuf;

/// Environment variable consulted when `--basemap-url` is not given
pub const BASEMAP_URL_ENV: &str = "ROUTE_PROJECTOR_BASEMAP_URL";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pixel-space scene, route summary and basemap request
    Json,
    /// Standalone SVG drawing
    Svg,
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Route Projector - Fit multi-leg walking routes into a fixed-size map viewport
pub struct Settings {
    /// Route JSON: an array of legs or a routing backend response ("-" reads stdin)
    #[clap(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    /// Viewport width in pixels
    #[clap(long, default_value = "640")]
    pub width: u32,

    /// Viewport height in pixels
    #[clap(long, default_value = "480")]
    pub height: u32,

    /// Output format
    #[clap(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Comma-separated leg colours, cycled over the legs
    #[clap(
        long,
        value_delimiter = ',',
        default_values_t = [String::from("#003366"), String::from("#B8860B")]
    )]
    pub palette: Vec<String>,

    /// Fraction of the viewport the route may occupy when picking the zoom
    #[clap(long, default_value = "0.9")]
    pub padding: f64,

    /// Mark the start of every leg, even where it continues the previous one
    #[clap(long, default_value = "false")]
    pub every_leg_waypoint: bool,

    /// Basemap URL template ({lat}, {lng}, {zoom}, {width}, {height}, {x}, {y})
    #[clap(long, value_name = "TEMPLATE")]
    pub basemap_url: Option<String>,

    /// Write a Chrome trace of the run to this file (profiling builds only)
    #[clap(long, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Library configuration for these settings
    pub fn render_config(&self) -> Result<RenderConfig> {
        let junctions = if self.every_leg_waypoint {
            JunctionPolicy::EveryLeg
        } else {
            JunctionPolicy::Discontinuities
        };

        Ok(RenderConfig::new(self.width, self.height)?
            .with_palette(self.palette.iter().map(|c| c.trim().to_string()))?
            .with_padding(self.padding)?
            .with_junctions(junctions))
    }

    /// Basemap template from the command line, falling back to the environment
    pub fn basemap_template(&self) -> Option<String> {
        self.basemap_url
            .clone()
            .or_else(|| get_env::<String>(BASEMAP_URL_ENV))
    }
}
