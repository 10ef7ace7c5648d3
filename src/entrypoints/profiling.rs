//! Logging and (optionally) profiling setup for the command line.
//!
//! Logs go to stderr through a fmt layer filtered by `RUST_LOG` (default `info`), so
//! stdout stays free for the rendered output. With the `profiling` feature and a trace
//! file, a chrome layer records every `profiling` scope and `tracing` span into a
//! Chrome trace that can be viewed with ui.perfetto.dev or chrome://tracing.

use std::path::Path;

#[cfg(feature = "profiling")]
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};

/// Keeps the trace writer alive; the trace is flushed when this is dropped.
pub struct LoggingGuard {
    #[cfg(feature = "profiling")]
    _chrome: Option<FlushGuard>,
}

/// Setup logging and profiling.
///
/// Must be called once, before any other tracing output.
pub fn setup_logging_and_profiling(trace_file: Option<&Path>) -> LoggingGuard {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    #[cfg(feature = "profiling")]
    let chrome_guard = {
        // The chrome layer must be added directly to Registry, so we add it first
        let (chrome_layer, guard) = match trace_file {
            Some(path) => {
                let (layer, guard) = ChromeLayerBuilder::new()
                    .file(path)
                    .include_args(true)
                    .build();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };
        tracing_subscriber::registry()
            .with(chrome_layer)
            .with(fmt_layer)
            .init();

        if let Some(path) = trace_file {
            tracing::info!("Profiling enabled, writing trace to {}", path.display());
        }
        guard
    };

    #[cfg(not(feature = "profiling"))]
    {
        tracing_subscriber::registry().with(fmt_layer).init();
        if trace_file.is_some() {
            tracing::warn!("Ignoring --trace-file: built without the profiling feature");
        }
    }

    LoggingGuard {
        #[cfg(feature = "profiling")]
        _chrome: chrome_guard,
    }
}
