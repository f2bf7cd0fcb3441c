// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup for the preview binary.
//!
//! Library code only emits events through `tracing` macros; installing a
//! subscriber is left to the executable.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`.
///
/// Calling it again (e.g. from several tests) is a no-op.
pub fn init_tracing() {
    // RUST_LOG=iced_poster=debug,wgpu=warn
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
