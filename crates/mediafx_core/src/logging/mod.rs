//! Logging infrastructure for MediaFX.
//!
//! The pipelines log through the `tracing` ecosystem: filter parameter
//! adjustments and skipped stages at WARN, tool invocations at DEBUG.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG` if set, falling back to the provided default level
/// (e.g. `"info"`). Outputs to stderr with targets. Should be called once at
/// application startup.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic_when_called_twice() {
        // The second init would normally panic on a global subscriber; we only
        // verify the filter construction path here.
        let filter = EnvFilter::new("warn");
        assert!(!filter.to_string().is_empty());
        init_tracing("warn");
    }
}
