//! Diagnostic logging setup.
//!
//! Terminal output meant for the user goes through `ui::messages`; this
//! subscriber only carries diagnostics (request traces, ignored replies)
//! to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `shifttrack=debug`.
pub const LOG_ENV: &str = "SHIFTTRACK_LOG";

pub fn init(verbose: bool) {
    let default = if verbose { "shifttrack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // a second init (tests calling run() twice) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
