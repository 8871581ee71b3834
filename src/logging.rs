use tracing_subscriber::EnvFilter;

/// Installs the process-wide `tracing` subscriber.
///
/// The library itself only emits events; installing a subscriber is left to
/// the embedding application so that a host UI can route scan diagnostics
/// into its own log sink. `default_directives` (typically
/// `ScanOptions::log_level`) is used when `RUST_LOG` is not set.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
