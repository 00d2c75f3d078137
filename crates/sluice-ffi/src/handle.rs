//! Handle table for projects registered with the C ABI.
//!
//! Handles are issued from a counter starting at 1 and are never reused, so
//! a handle kept by the host after `sluice_project_destroy` can only miss.
//! `0` is never issued and reads as "no project" on the C side.

use std::collections::BTreeMap;

/// Owned values addressed by never-reused `u64` handles.
pub(crate) struct HandleTable<T> {
    next: u64,
    live: BTreeMap<u64, T>,
}

impl<T> HandleTable<T> {
    /// An empty table, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            next: 1,
            live: BTreeMap::new(),
        }
    }

    /// Store `value` and return its handle, or `None` once the counter is
    /// exhausted.
    pub fn insert(&mut self, value: T) -> Option<u64> {
        let handle = self.next;
        self.next = handle.checked_add(1)?;
        self.live.insert(handle, value);
        Some(handle)
    }

    /// The value behind `handle`, if it is live.
    pub fn get(&self, handle: u64) -> Option<&T> {
        self.live.get(&handle)
    }

    /// Take the value behind `handle` out of the table.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        self.live.remove(&handle)
    }
}
