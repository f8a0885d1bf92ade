use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs a global `tracing` subscriber for the function binary.
///
/// Output goes to stderr, leaving stdout to the received-event lines. The
/// filter comes from `RUST_LOG`, falling back to `info`. Timestamps are left
/// out since the Lambda log stream records its own. Calling this more than
/// once is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
