//! Logging setup
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! print them; the filter comes from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// Returns `false` when a subscriber was already installed (tests, embedding
/// hosts), which is not an error.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        assert!(!init());
    }
}
