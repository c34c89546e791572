//! Diagnostic tracing.
//!
//! Human-facing output goes through `ui`; this module only wires up
//! `tracing` diagnostics controlled by `RUST_LOG`, written to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`; defaults to `warn` when unset. `verbose` raises the
/// default to `debug` for this crate, which logs every git invocation.
///
/// ```bash
/// RUST_LOG=git_milestone=debug git-milestone status
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "git_milestone=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
