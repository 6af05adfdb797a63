//! Log subscriber for the CLI.
//!
//! Logs go to stderr so stdout stays clean for command output. The filter comes
//! from `DRAFTHUB_LOG` (same syntax as `RUST_LOG`), defaulting to `warn`;
//! `--verbose` raises the default to `debug` for the drafthub crates.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "DRAFTHUB_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,drafthub=debug,drafthubapp=debug"
    } else {
        "warn"
    }
}

pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(filter(verbose));
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "log subscriber already installed");
    }
}
