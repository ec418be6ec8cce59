//! Tracing subscriber setup for hosts embedding Quarry

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` wins when set; otherwise the level is
/// `info`, or `debug` when `verbose`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(verbose: bool) -> bool {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(format!("quarry={default_level}")));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init().is_ok()
}

/// Subscriber for tests: output is captured per test by the harness
pub fn init_for_tests() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new("quarry=debug"))
    .with_test_writer()
    .try_init();
}
