//! Process-wide logging setup shared by the arena binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize logging with the default `info` filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}
