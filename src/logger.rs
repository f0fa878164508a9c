//! Logging setup on the `tracing` ecosystem.
//!
//! Logs go to stderr; stdout is reserved for rendered output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber. Call once, before any logging.
///
/// `verbose` wins over `quiet`; with neither, `RUST_LOG` is honoured and
/// falls back to `apidoc=info`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("apidoc=debug")
    } else if quiet {
        EnvFilter::new("apidoc=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apidoc=info"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
