//! Logging configuration using tracing
//!
//! Round progress, invocation outcomes and summaries are emitted as
//! structured `tracing` events. The subscriber is installed once by the
//! binary; the library never installs one itself.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Filtering follows `RUST_LOG`, defaulting to `info` so that round
/// summaries are visible.
///
/// # Example RUST_LOG values
/// - `RUST_LOG=debug` - include per-agent dispatch detail
/// - `RUST_LOG=econ_core=trace` - everything from the engine
///
/// # Errors
/// Returns an error if a global subscriber has already been installed
pub fn init() -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_thread_ids(true))
        .try_init()
        .map_err(|e| crate::EconError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_helper() {
        init_test();
        init_test();
        tracing::info!(round = 1, alive = 3, "structured logging works");
    }
}
