//! Diagnostic tracing.
//!
//! Tracing events are developer diagnostics on stderr, filtered by
//! `RUST_LOG`. Operator progress lines are printed separately on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn` so skipped templates still show.
///
/// # Example
/// ```bash
/// RUST_LOG=precommitter=debug precommitter config --repo .
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
