//! Process-wide tracing setup shared by catalog binaries and tests.

/// Subscriber configuration (filter, output format).
pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize tracing with the format named by `CATALOG_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}
