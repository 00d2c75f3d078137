//! Control-action audit records.
//!
//! When the engine's report collaborator has control-action reporting
//! enabled, every setting change is recorded with its origin so that
//! host-injected changes can be told apart from rule-engine changes.

use std::fmt;

use chrono::NaiveDateTime;

use crate::time::format_datetime;

/// Who changed a link setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSource {
    /// The toolkit override injector (a host call).
    Toolkit,
    /// A named control rule evaluated by the engine.
    Rule(String),
}

impl ActionSource {
    /// Tag written into audit records for toolkit-originated changes.
    pub const TOOLKIT_TAG: &'static str = "ToolkitAPI";
}

impl fmt::Display for ActionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toolkit => f.write_str(Self::TOOLKIT_TAG),
            Self::Rule(id) => write!(f, "Control {id}"),
        }
    }
}

/// One timestamped setting change.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlAction {
    /// Simulation time at which the change was made.
    pub time: NaiveDateTime,
    /// Identifier of the link whose setting changed.
    pub link_id: String,
    /// The new target setting.
    pub setting: f64,
    /// Origin of the change.
    pub source: ActionSource,
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: Link {} setting changed to {:6.2} by {}",
            format_datetime(self.time),
            self.link_id,
            self.setting,
            self.source
        )
    }
}

/// Destination for control-action records.
pub trait ControlActionSink: Send {
    /// Record one action.
    fn record(&mut self, action: &ControlAction);
}

impl ControlActionSink for Vec<ControlAction> {
    fn record(&mut self, action: &ControlAction) {
        self.push(action.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn action(source: ActionSource) -> ControlAction {
        ControlAction {
            time: NaiveDate::from_ymd_opt(2021, 6, 3)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            link_id: "OR1".into(),
            setting: 0.5,
            source,
        }
    }

    #[test]
    fn toolkit_record_text() {
        assert_eq!(
            action(ActionSource::Toolkit).to_string(),
            "  JUN-03-2021 12:30:00: Link OR1 setting changed to   0.50 by ToolkitAPI"
        );
    }

    #[test]
    fn rule_record_names_rule() {
        let s = action(ActionSource::Rule("R7".into())).to_string();
        assert!(s.ends_with("by Control R7"), "{s}");
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<ControlAction> = Vec::new();
        sink.record(&action(ActionSource::Toolkit));
        sink.record(&action(ActionSource::Toolkit));
        assert_eq!(sink.len(), 2);
    }
}
