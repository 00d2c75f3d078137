//! C ABI for the Sluice introspection and override layer.
//!
//! Every entry point returns a [`SluiceStatus`](status::SluiceStatus) code
//! (`0` on success, negative on failure) and writes results through
//! out-parameters. Projects are addressed by `u64` handles that are never
//! reused, so stale or destroyed handles are detected instead of
//! dereferenced. Panics never cross the boundary.
//!
//! This is the only crate in the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    /// Message of the last panic caught on this thread.
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn std::any::Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::error!(message = %msg, "panic caught at FFI boundary");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Run `$body`, returning `$default` if it panics.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $default
            }
        }
    };
}

/// Run `$body`, returning `Panicked` if it panics.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::SluiceStatus::Panicked as i32, $body)
    };
}

/// Lock a mutex, returning `InternalError` from the enclosing body if it
/// is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::SluiceStatus::InternalError as i32,
        }
    };
}

pub mod handle;
pub mod inject;
pub mod project;
pub mod query;
pub mod status;

pub use project::register_project;
pub use status::SluiceStatus;

/// Copy the last caught panic message on this thread into `buf`.
///
/// Returns the full message length in bytes (excluding the NUL). Pass a
/// null `buf` to query the length. The copy is truncated to `cap - 1`
/// bytes and always NUL-terminated when `cap > 0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        let bytes = msg.as_bytes();
        if !buf.is_null() && cap > 0 {
            let n = bytes.len().min(cap - 1);
            // SAFETY: buf points to at least cap writable bytes per caller
            // contract, and n + 1 <= cap.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(bytes.len()).unwrap_or(i32::MAX)
    })
}
