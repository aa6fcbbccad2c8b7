//! Tracing/logging setup shared by the workspace binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! job of whatever process hosts the pipeline.

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json, "info");
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
