//! Tracing initialization for the command-line binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `TROJAN_GUARD_LOG=trojan_guard=debug`.
pub const LOG_ENV: &str = "TROJAN_GUARD_LOG";

static INIT: Once = Once::new();

/// Default filter directive for the given verbosity flags.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `TROJAN_GUARD_LOG` wins over the verbosity flags when it parses.
/// Only the first call has any effect.
pub fn init_tracing(verbose: u8, quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

        // Fails only if another subscriber is already installed
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose >= 2),
            )
            .with(filter)
            .try_init();
    });
}
