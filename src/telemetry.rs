//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this more than once is
/// harmless; only the first call installs a subscriber.
pub fn init_tracing(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

#[cfg(all(test, feature = "bus"))]
pub(crate) use capture::{capture_logs, records_at};
