//! C-compatible status codes.
//!
//! [`SluiceStatus`] is a `repr(i32)` enum covering every toolkit error plus
//! the conditions that only exist at the boundary (bad handles, null
//! pointers, short buffers, poisoned locks, caught panics).

use sluice_core::ToolkitError;
use sluice_engine::LifecycleError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SluiceStatus {
    /// Success.
    Ok = 0,
    /// No object graph exists.
    NotOpen = -1,
    /// The simulation is not running.
    NotStarted = -2,
    /// Object index outside `[0, count)`.
    IndexOutOfRange = -3,
    /// Object kind code has no table.
    UnknownKind = -4,
    /// Parameter, result or metadata code has no table entry.
    UnknownParameter = -5,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -6,
    /// A required pointer is null or a buffer length is zero.
    InvalidArgument = -7,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -8,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -9,
    /// The simulation is already running.
    AlreadyStarted = -10,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ToolkitError> for SluiceStatus {
    fn from(e: &ToolkitError) -> Self {
        match e {
            ToolkitError::NotOpen => SluiceStatus::NotOpen,
            ToolkitError::NotStarted => SluiceStatus::NotStarted,
            ToolkitError::IndexOutOfRange { .. } => SluiceStatus::IndexOutOfRange,
            ToolkitError::UnknownKind { .. } => SluiceStatus::UnknownKind,
            ToolkitError::UnknownParameter { .. }
            | ToolkitError::UnknownSimulationCode { .. } => SluiceStatus::UnknownParameter,
        }
    }
}

impl From<&LifecycleError> for SluiceStatus {
    fn from(e: &LifecycleError) -> Self {
        match e {
            LifecycleError::NotOpen => SluiceStatus::NotOpen,
            LifecycleError::AlreadyStarted => SluiceStatus::AlreadyStarted,
            LifecycleError::NotStarted => SluiceStatus::NotStarted,
        }
    }
}
