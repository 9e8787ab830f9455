//! Logging setup built on `tracing-subscriber`.
//!
//! Library crates only emit `tracing` events. Hosts (binaries, demos, tests)
//! call one of the functions here once to install a formatting subscriber.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,centerline=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global `fmt` subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Like [`init`], but returns an error instead of panicking when a subscriber
/// has already been installed in this process.
pub fn try_init() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_twice_reports_error() {
        // Either this call or an earlier one in the same test binary installed it.
        let _ = try_init();
        assert!(try_init().is_err());
    }
}
