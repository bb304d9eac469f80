//! Tracing initialization for the Sood compiler driver.
//!
//! Mirrors the teacher's `tracing` + `tracing-subscriber` (`EnvFilter`)
//! stack (SPEC_FULL.md §7 "ambient"). Defaults to `info`; `--debug` raises
//! the whole-process filter to `debug` (spec.md §6).

use tracing_subscriber::{prelude::*, EnvFilter, Registry};

pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("SOOD_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .try_init();
}
