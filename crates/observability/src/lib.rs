//! Logging setup for the pantry binaries.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Install the global subscriber, formatted per `PANTRY_LOG_FORMAT`.
///
/// Calling it again does nothing.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
