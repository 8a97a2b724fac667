//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! command output so `--json` listings stay parseable. `RUST_LOG` wins over
//! the configured `log_level`.

use tracing_subscriber::EnvFilter;

pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
