//! cli::logging
//!
//! Structured diagnostics via `tracing`.
//!
//! Diagnostics go to stderr. The filter comes from `PUCK_LOG` when set;
//! otherwise only warnings are shown, or everything down to `debug` with
//! `--debug`. Traversal events are already rendered by the console, so the
//! `puck::events` target stays silent unless asked for.

use std::io;

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "PUCK_LOG";

/// Filter used when `PUCK_LOG` is unset or invalid.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "puck=debug"
    } else {
        "warn,puck::events=off"
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(debug);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
