//! Logger setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `crate_name` logs at `default_level`
/// and everything else at `info`.
pub fn setup_logger(crate_name: &str, default_level: &str) {
    let target = crate_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{target}={default_level}")));

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
