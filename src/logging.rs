//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! progress and usage lines users and scripts read.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins over `default_filter`; `verbose` wins over both.
pub fn init(default_filter: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cryptr=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
