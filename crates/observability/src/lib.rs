//! Process-wide tracing/logging setup for hosts embedding the inventory core.

/// Initialize structured JSON logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Initialize human-readable logging (terminal sessions, local runs).
pub fn init_pretty() {
    tracing::init(LogFormat::Pretty);
}

pub use self::tracing::LogFormat;

/// Subscriber construction (filters, formatting).
pub mod tracing;
