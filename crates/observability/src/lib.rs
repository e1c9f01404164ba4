//! Logging setup shared by the binaries.

/// Tracing subscriber configuration (filters, JSON output).
pub mod tracing;

/// Initialize process-wide logging with the default `info` filter.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}
