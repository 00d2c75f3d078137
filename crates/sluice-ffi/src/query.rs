//! Read-only queries: catalog, structure, parameters, results and
//! simulation metadata.
//!
//! Scalars are written through out-pointers that are left untouched on
//! failure. Strings go into caller-owned buffers, which receive an empty
//! NUL-terminated string before any other check runs, so a failed call
//! never leaves stale text behind.

use std::ffi::c_char;

use sluice_core::time::format_datetime;
use sluice_core::ToolkitError;
use sluice_engine::Project;
use sluice_toolkit as toolkit;

use crate::project::{finish, with_project};
use crate::status::SluiceStatus;

/// Run a toolkit read and write its result to `out`.
#[allow(unsafe_code)]
fn read_into<T>(
    handle: u64,
    out: *mut T,
    read: impl FnOnce(&Project) -> Result<T, ToolkitError>,
) -> i32 {
    if out.is_null() {
        return SluiceStatus::InvalidArgument as i32;
    }
    let result = with_project(handle, |p| read(&*p).map_err(|e| SluiceStatus::from(&e)));
    // SAFETY: out is non-null and valid per caller contract.
    unsafe { finish(out, result) }
}

/// Run a toolkit read that yields text and copy it into `buf`.
#[allow(unsafe_code)]
fn read_str(
    handle: u64,
    buf: *mut c_char,
    buf_len: usize,
    read: impl FnOnce(&Project) -> Result<String, ToolkitError>,
) -> i32 {
    if buf.is_null() || buf_len == 0 {
        return SluiceStatus::InvalidArgument as i32;
    }
    // SAFETY: buf points to at least buf_len >= 1 writable bytes.
    unsafe { *buf = 0 };
    let text = match with_project(handle, |p| read(&*p).map_err(|e| SluiceStatus::from(&e))) {
        Ok(text) => text,
        Err(status) => return status as i32,
    };
    let bytes = text.as_bytes();
    if bytes.len() >= buf_len {
        return SluiceStatus::BufferTooSmall as i32;
    }
    // SAFETY: bytes.len() + 1 <= buf_len, and buf holds buf_len bytes.
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), bytes.len());
        *buf.add(bytes.len()) = 0;
    }
    SluiceStatus::Ok as i32
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// ── Catalog ──────────────────────────────────────────────────────────

/// Number of objects of kind `kind`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_count_objects(handle: u64, kind: i32, count_out: *mut i32) -> i32 {
    ffi_guard!({
        read_into(handle, count_out, |p| {
            toolkit::count_objects(p, kind).map(to_i32)
        })
    })
}

/// Identifier of object `index` of kind `kind`, NUL-terminated into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_object_id(
    handle: u64,
    kind: i32,
    index: i32,
    buf: *mut c_char,
    buf_len: usize,
) -> i32 {
    ffi_guard!({
        read_str(handle, buf, buf_len, |p| {
            toolkit::object_id(p, kind, index).map(str::to_owned)
        })
    })
}

// ── Structure ────────────────────────────────────────────────────────

/// Node subtype code.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_node_type(handle: u64, index: i32, type_out: *mut i32) -> i32 {
    ffi_guard!({
        read_into(handle, type_out, |p| {
            toolkit::node_type(p, index).map(|t| t.code())
        })
    })
}

/// Link subtype code.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_link_type(handle: u64, index: i32, type_out: *mut i32) -> i32 {
    ffi_guard!({
        read_into(handle, type_out, |p| {
            toolkit::link_type(p, index).map(|t| t.code())
        })
    })
}

/// Upstream and downstream node indices of a link.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_link_connections(
    handle: u64,
    index: i32,
    node1_out: *mut i32,
    node2_out: *mut i32,
) -> i32 {
    ffi_guard!({
        if node2_out.is_null() {
            return SluiceStatus::InvalidArgument as i32;
        }
        let mut node2 = 0;
        let status = read_into(handle, node1_out, |p| {
            let (n1, n2) = toolkit::link_connections(p, index)?;
            node2 = to_i32(n2);
            Ok(to_i32(n1))
        });
        if status == SluiceStatus::Ok as i32 {
            // SAFETY: node2_out is non-null and valid per caller contract.
            unsafe { *node2_out = node2 };
        }
        status
    })
}

/// Raw direction flag of a link (`1` or `-1`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_link_direction(handle: u64, index: i32, dir_out: *mut i32) -> i32 {
    ffi_guard!({
        read_into(handle, dir_out, |p| {
            toolkit::link_direction(p, index).map(i32::from)
        })
    })
}

/// Kind code and index of the object a subcatchment drains to.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_subcatch_out_connection(
    handle: u64,
    index: i32,
    kind_out: *mut i32,
    index_out: *mut i32,
) -> i32 {
    ffi_guard!({
        if index_out.is_null() {
            return SluiceStatus::InvalidArgument as i32;
        }
        let mut target = 0;
        let status = read_into(handle, kind_out, |p| {
            let (kind, i) = toolkit::subcatch_out_connection(p, index)?;
            target = to_i32(i);
            Ok(kind.code())
        });
        if status == SluiceStatus::Ok as i32 {
            // SAFETY: index_out is non-null and valid per caller contract.
            unsafe { *index_out = target };
        }
        status
    })
}

// ── Parameters and results ───────────────────────────────────────────

macro_rules! scalar_query {
    ($(#[$meta:meta])* $name:ident => $read:path) => {
        $(#[$meta])*
        #[no_mangle]
        #[allow(unsafe_code)]
        pub extern "C" fn $name(handle: u64, index: i32, code: i32, value_out: *mut f64) -> i32 {
            ffi_guard!({ read_into(handle, value_out, |p| $read(p, index, code)) })
        }
    };
}

scalar_query!(
    /// Static node parameter in display units.
    sluice_get_node_param => toolkit::node_param
);
scalar_query!(
    /// Static link parameter in display units.
    sluice_get_link_param => toolkit::link_param
);
scalar_query!(
    /// Static subcatchment parameter in display units.
    sluice_get_subcatch_param => toolkit::subcatch_param
);
scalar_query!(
    /// Dynamic node result in display units.
    sluice_get_node_result => toolkit::node_result
);
scalar_query!(
    /// Dynamic link result in display units.
    sluice_get_link_result => toolkit::link_result
);
scalar_query!(
    /// Dynamic subcatchment result in display units.
    sluice_get_subcatch_result => toolkit::subcatch_result
);

// ── Simulation metadata ──────────────────────────────────────────────

/// Current simulation time as `MON-DD-YYYY HH:MM:SS`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_current_datetime(
    handle: u64,
    buf: *mut c_char,
    buf_len: usize,
) -> i32 {
    ffi_guard!({
        read_str(handle, buf, buf_len, |p| {
            toolkit::current_datetime(p).map(format_datetime)
        })
    })
}

/// Start (`0`), end (`1`) or report start (`2`) as `MON-DD-YYYY HH:MM:SS`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_simulation_datetime(
    handle: u64,
    which: i32,
    buf: *mut c_char,
    buf_len: usize,
) -> i32 {
    ffi_guard!({
        read_str(handle, buf, buf_len, |p| {
            toolkit::simulation_datetime(p, which).map(format_datetime)
        })
    })
}

/// Unit system (`0`) or flow units (`1`) code.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_simulation_unit(handle: u64, which: i32, value_out: *mut i32) -> i32 {
    ffi_guard!({ read_into(handle, value_out, |p| toolkit::simulation_unit(p, which)) })
}

/// Analysis toggle as `1` or `0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_simulation_analysis_setting(
    handle: u64,
    which: i32,
    value_out: *mut i32,
) -> i32 {
    ffi_guard!({
        read_into(handle, value_out, |p| {
            toolkit::analysis_setting(p, which).map(i32::from)
        })
    })
}

/// Numerical parameter or continuity error, unconverted.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sluice_get_simulation_param(
    handle: u64,
    which: i32,
    value_out: *mut f64,
) -> i32 {
    ffi_guard!({ read_into(handle, value_out, |p| toolkit::simulation_param(p, which)) })
}
