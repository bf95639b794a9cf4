use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding `tracing` filter directives.
pub const LOG_VAR: &str = "META_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
