//! Tracing setup.
//!
//! Logs go to stderr, filtered by `RUST_LOG` with a quiet default so the
//! raw-mode terminal stays clean. Called once per process; the forked
//! children inherit the subscriber installed by the capture process.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    // Only ever fails when a subscriber is already installed.
    let _ = subscriber.try_init();
}
