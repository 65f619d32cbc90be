//! Diagnostic logging setup
//!
//! Events go to stderr so they never interleave with menu output on stdout.
//! The filter comes from `LEDGER_LOG` and defaults to `warn`.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "LEDGER_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls do nothing
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another subscriber may already be installed by an embedding program
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
