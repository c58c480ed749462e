//! Shared helpers for the demos.

use fixmap::core::{TimestampPrecision, UtcTimestamp};

/// Initialize logging for demos. `RUST_LOG=debug` shows validator and
/// decoder diagnostics.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Renders wire bytes with `|` in place of SOH.
pub fn printable(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\x01', "|")
}

/// A fixed sending time so demo output is stable.
pub fn sending_time() -> Option<UtcTimestamp> {
    UtcTimestamp::from_ymd_hms_nano(2024, 3, 15, 14, 30, 0, 0, TimestampPrecision::Millis)
}
