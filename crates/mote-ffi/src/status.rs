//! C-compatible status codes.
//!
//! [`MoteStatus`] covers every condition an FFI call can report.
//! Conversions from the engine's error types keep the mapping in one
//! place. Values are ABI-stable: hosts hard-code them.

use mote_core::{ConfigError, ModeError};

/// Status code returned by every FFI function.
///
/// `Ok` is 0, all errors are negative.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoteStatus {
    /// Success.
    Ok = 0,
    /// Handle is unknown or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null or otherwise unusable.
    InvalidArgument = -2,
    /// Engine configuration rejected at construction.
    ConfigError = -3,
    /// Mode id unknown, or the mode's particle cap is exceeded.
    InvalidMode = -4,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -5,
    /// Internal error (e.g. a poisoned lock after a prior panic).
    InternalError = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ConfigError> for MoteStatus {
    fn from(_: &ConfigError) -> Self {
        MoteStatus::ConfigError
    }
}

impl From<&ModeError> for MoteStatus {
    fn from(_: &ModeError) -> Self {
        MoteStatus::InvalidMode
    }
}
