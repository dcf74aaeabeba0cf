// crates/sarf/src/logging.rs

//! Subscriber setup for binaries and examples embedding sarf.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application. `init_logging` is a convenience for the common
//! case.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogLevel;

/// Builds the filter: `RUST_LOG` when set and valid, otherwise `level` for sarf.
pub fn env_filter(level: LogLevel) -> EnvFilter {
  EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(format!("warn,sarf={}", level.as_directive())))
}

/// Installs a global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed (by an
/// earlier call or by the application), in which case nothing changes.
pub fn init_logging(level: LogLevel) -> bool {
  tracing_subscriber::registry()
    .with(env_filter(level))
    .with(tracing_subscriber::fmt::layer().with_target(true))
    .try_init()
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_init_is_a_no_op() {
    // The first call may install the subscriber; any later one cannot
    init_logging(LogLevel::Debug);

    assert!(!init_logging(LogLevel::Info));
  }
}
