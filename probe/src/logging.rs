//! Logging setup for the probe.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize console logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise `debug` when verbose, `info` if not.
/// Stdout is left for the settings dump.
pub fn setup(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();

    tracing::debug!("Logging initialized (verbose={})", verbose);
}
