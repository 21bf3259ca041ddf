// ============================================================================
// Logging Setup
// ============================================================================
//
// The library only emits `tracing` events. Binaries and demos call
// `init_logging` once to print them; the level comes from `RUST_LOG`
// (e.g. `RUST_LOG=ledger_money=debug`), defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber driven by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
