//! Override setters.

use sluice_toolkit as toolkit;

use crate::project::with_project;
use crate::status::SluiceStatus;

fn status_of(result: Result<(), SluiceStatus>) -> i32 {
    match result {
        Ok(()) => SluiceStatus::Ok as i32,
        Err(status) => status as i32,
    }
}

/// Command link `index` to `setting` and apply it immediately.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_set_link_setting(handle: u64, index: i32, setting: f64) -> i32 {
    ffi_guard!({
        status_of(with_project(handle, |p| {
            toolkit::set_link_setting(p, index, setting).map_err(|e| SluiceStatus::from(&e))
        }))
    })
}

/// Latch `flow` as the external inflow of node `index`.
///
/// `flow` is in the engine's internal flow units (cfs) whatever the
/// project's display units are.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_set_node_inflow(handle: u64, index: i32, flow: f64) -> i32 {
    ffi_guard!({
        status_of(with_project(handle, |p| {
            toolkit::set_node_inflow(p, index, flow).map_err(|e| SluiceStatus::from(&e))
        }))
    })
}
