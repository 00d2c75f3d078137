//! Project registration and lifecycle passthroughs.
//!
//! Projects are built in Rust and handed to the C side with
//! [`register_project`]. Each project sits behind its own mutex so the
//! global table lock is only held for the handle lookup.

use std::sync::{Arc, Mutex};

use sluice_core::Lifecycle;
use sluice_engine::Project;

use crate::handle::HandleTable;
use crate::status::SluiceStatus;

type ProjectArc = Arc<Mutex<Project>>;

static PROJECTS: Mutex<HandleTable<ProjectArc>> = Mutex::new(HandleTable::new());

/// Hand `project` to the C ABI and return its handle.
pub fn register_project(project: Project) -> Result<u64, SluiceStatus> {
    let mut table = PROJECTS.lock().map_err(|_| SluiceStatus::InternalError)?;
    let handle = table
        .insert(Arc::new(Mutex::new(project)))
        .ok_or(SluiceStatus::InternalError)?;
    tracing::debug!(handle, "project registered");
    Ok(handle)
}

fn get_project(handle: u64) -> Option<ProjectArc> {
    PROJECTS.lock().ok()?.get(handle).cloned()
}

/// Run `f` on the project behind `handle` with its lock held.
pub(crate) fn with_project<R>(
    handle: u64,
    f: impl FnOnce(&mut Project) -> Result<R, SluiceStatus>,
) -> Result<R, SluiceStatus> {
    let arc = get_project(handle).ok_or(SluiceStatus::InvalidHandle)?;
    let mut project = arc.lock().map_err(|_| SluiceStatus::InternalError)?;
    f(&mut project)
}

/// Write `value` to `out` and return `Ok`, or return the failure status
/// without touching `out`.
///
/// # Safety
///
/// `out` must be non-null and valid for a write of `T`.
#[allow(unsafe_code)]
pub(crate) unsafe fn finish<T>(out: *mut T, result: Result<T, SluiceStatus>) -> i32 {
    match result {
        Ok(value) => {
            // SAFETY: guaranteed by the caller.
            unsafe { out.write(value) };
            SluiceStatus::Ok as i32
        }
        Err(status) => status as i32,
    }
}

/// Destroy a registered project, closing it first.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_project_destroy(handle: u64) -> i32 {
    ffi_guard!({
        let removed = ffi_lock!(PROJECTS).remove(handle);
        match removed {
            Some(arc) => {
                if let Ok(mut project) = arc.lock() {
                    project.close();
                }
                tracing::debug!(handle, "project destroyed");
                SluiceStatus::Ok as i32
            }
            None => SluiceStatus::InvalidHandle as i32,
        }
    })
}

/// Whether the project has an object graph (`1`) or not (`0`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_is_open(handle: u64, out: *mut u8) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return SluiceStatus::InvalidArgument as i32;
        }
        let result = with_project(handle, |p| Ok(u8::from(p.is_open())));
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { finish(out, result) }
    })
}

/// Whether the project's stepping loop is running (`1`) or not (`0`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_is_started(handle: u64, out: *mut u8) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return SluiceStatus::InvalidArgument as i32;
        }
        let result = with_project(handle, |p| Ok(u8::from(p.is_started())));
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { finish(out, result) }
    })
}

/// Start the stepping loop.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_start(handle: u64) -> i32 {
    ffi_guard!({
        match with_project(handle, |p| p.start().map_err(|e| SluiceStatus::from(&e))) {
            Ok(()) => SluiceStatus::Ok as i32,
            Err(status) => status as i32,
        }
    })
}

/// Advance one routing step and write the elapsed time in days to
/// `elapsed_out` (`0.0` once the end date is reached).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_step(handle: u64, elapsed_out: *mut f64) -> i32 {
    ffi_guard!({
        if elapsed_out.is_null() {
            return SluiceStatus::InvalidArgument as i32;
        }
        let result = with_project(handle, |p| p.step().map_err(|e| SluiceStatus::from(&e)));
        // SAFETY: elapsed_out is non-null and valid per caller contract.
        unsafe { finish(elapsed_out, result) }
    })
}

/// Stop the stepping loop. Objects stay addressable.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_end(handle: u64) -> i32 {
    ffi_guard!({
        match with_project(handle, |p| p.end().map_err(|e| SluiceStatus::from(&e))) {
            Ok(()) => SluiceStatus::Ok as i32,
            Err(status) => status as i32,
        }
    })
}
