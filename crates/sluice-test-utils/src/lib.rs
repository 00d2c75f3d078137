//! Test fixtures and recording sinks for Sluice development.
//!
//! Provides the [`fixtures::sample_network`] drainage system, a
//! [`RecordingSink`] that captures control-action audit records, and
//! [`init_tracing`] for tests that want log output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use sluice_core::{ControlAction, ControlActionSink};

pub use fixtures::{
    audited_network, sample_builder, sample_network, sample_options, storm_builder, storm_network,
    Storm,
};

/// Audit sink that keeps every record.
///
/// Clones share one buffer, so a test keeps a clone and hands another to
/// the project.
#[derive(Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<ControlAction>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records captured so far.
    pub fn records(&self) -> Vec<ControlAction> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ControlActionSink for RecordingSink {
    fn record(&mut self, action: &ControlAction) {
        self.records.lock().unwrap().push(action.clone());
    }
}

/// In-memory report writer that stays readable after a clone is handed to
/// a [`TextSink`](sluice_engine::TextSink).
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Install a test-friendly `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
