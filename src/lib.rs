pub mod core;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging for the meta server process.
///
/// Called once by the process bootstrap before the first aggregation run.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,babric_meta=debug")),
        )
        .init();
}
