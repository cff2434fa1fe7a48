//! Tracing subscriber setup
//!
//! Diagnostics go to stderr. Stdout carries nothing but the stats records
//! and command output.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "debug" } else { "info" })
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
