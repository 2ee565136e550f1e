//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide observability with the format taken from
/// `LOGIFLOW_LOG_FORMAT`.
///
/// Returns the raw setting when it was not a known format and JSON was used
/// instead. Nothing can be logged before the subscriber exists, so reporting
/// it is left to the caller.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() -> Option<String> {
    let (format, rejected) = LogFormat::from_env();
    crate::tracing::init(format);
    rejected
}
