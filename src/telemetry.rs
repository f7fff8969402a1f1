//! Tracing subscriber initialisation.
//!
//! Sonargate logs diagnostics to stderr so that the report on stdout stays
//! machine-consumable. The verbose flag raises the crate's default level to
//! debug; an explicit `RUST_LOG` always wins.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the global stderr subscriber.
///
/// Repeated calls are harmless: installation failures (an already-set global
/// subscriber, as happens under test harnesses) are ignored.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "sonargate=debug"
    } else {
        "sonargate=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
