//! Logging setup
//!
//! The library only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init`].

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "conversion_widgets=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, defaulting to `conversion_widgets=info`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
