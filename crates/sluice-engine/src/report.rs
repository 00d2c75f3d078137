//! Report collaborator: control-action audit records.
//!
//! The [`Report`] decides whether setting changes are recorded and forwards
//! records to a [`ControlActionSink`]. Writing a record never fails the
//! caller; sink I/O errors are logged and dropped.

use std::fmt;
use std::io::Write;

use sluice_core::{ControlAction, ControlActionSink};

use crate::options::ReportOptions;

/// Emits each record as a `tracing` event on the `sluice::controls` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ControlActionSink for TracingSink {
    fn record(&mut self, action: &ControlAction) {
        tracing::info!(
            target: "sluice::controls",
            time = %action.time,
            link = %action.link_id,
            setting = action.setting,
            source = %action.source,
            "link setting changed"
        );
    }
}

/// Writes each record as one line of report text.
pub struct TextSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> TextSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ControlActionSink for TextSink<W> {
    fn record(&mut self, action: &ControlAction) {
        if let Err(e) = writeln!(self.writer, "{action}") {
            tracing::warn!(error = %e, "failed to write control action");
        }
    }
}

/// The engine's report collaborator.
pub struct Report {
    options: ReportOptions,
    sink: Box<dyn ControlActionSink>,
}

impl Report {
    /// A report with the given options writing to `sink`.
    pub fn new(options: ReportOptions, sink: Box<dyn ControlActionSink>) -> Self {
        Self { options, sink }
    }

    /// Whether control actions are recorded.
    pub fn controls_enabled(&self) -> bool {
        self.options.controls
    }

    /// Enable or disable control-action records.
    pub fn set_controls(&mut self, enabled: bool) {
        self.options.controls = enabled;
    }

    /// Replace the sink, returning the previous one.
    pub fn replace_sink(&mut self, sink: Box<dyn ControlActionSink>) -> Box<dyn ControlActionSink> {
        std::mem::replace(&mut self.sink, sink)
    }

    /// Record `action` if control-action reporting is enabled.
    pub fn write_control_action(&mut self, action: &ControlAction) {
        if self.options.controls {
            self.sink.record(action);
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(ReportOptions::default(), Box::new(TracingSink))
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sluice_core::ActionSource;
    use std::sync::{Arc, Mutex};

    fn action() -> ControlAction {
        ControlAction {
            time: NaiveDate::from_ymd_opt(2000, 1, 1)
                .unwrap()
                .and_hms_opt(0, 5, 0)
                .unwrap(),
            link_id: "W1".into(),
            setting: 0.25,
            source: ActionSource::Toolkit,
        }
    }

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<ControlAction>>>);

    impl ControlActionSink for Shared {
        fn record(&mut self, action: &ControlAction) {
            self.0.lock().unwrap().push(action.clone());
        }
    }

    #[test]
    fn disabled_report_drops_records() {
        let shared = Shared::default();
        let mut report = Report::new(ReportOptions::default(), Box::new(shared.clone()));
        report.write_control_action(&action());
        assert!(shared.0.lock().unwrap().is_empty());
        report.set_controls(true);
        report.write_control_action(&action());
        assert_eq!(shared.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn text_sink_writes_one_line_per_record() {
        let mut sink = TextSink::new(Vec::new());
        sink.record(&action());
        sink.record(&action());
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("  JAN-01-2000 00:05:00: Link W1"));
    }
}
