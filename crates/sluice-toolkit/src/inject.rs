//! Override injector.
//!
//! Both setters need a running simulation and a valid index. Values are
//! forwarded as given; sign and range are the engine's concern.

use sluice_core::{ActionSource, ControlAction, ObjectKind, ToolkitError};
use sluice_engine::Project;

use crate::catalog::{self, out_of_range};
use crate::guard::require_started;

/// Command link `index` to `setting` and apply it immediately.
///
/// The new target is propagated to the link's current setting before this
/// returns. With control reporting enabled, one audit record tagged as a
/// toolkit action is written at the current simulation time.
pub fn set_link_setting(project: &mut Project, index: i32, setting: f64) -> Result<(), ToolkitError> {
    require_started(project)?;
    let i = catalog::resolve(project, ObjectKind::Link, index)?.index();
    let target = match project.target_setting_mut(i) {
        Some(target) => target,
        None => return Err(out_of_range(project, ObjectKind::Link, index)),
    };
    *target = setting;
    project.apply_link_setting(i, 0.0);
    tracing::debug!(link = i, setting, "link setting overridden");

    if project.report().controls_enabled() {
        let action = ControlAction {
            time: project.current_datetime(),
            link_id: project
                .registry()
                .id(ObjectKind::Link, i)
                .map(str::to_owned)
                .unwrap_or_default(),
            setting,
            source: ActionSource::Toolkit,
        };
        project.report_mut().write_control_action(&action);
    }
    Ok(())
}

/// Latch `flow` (internal flow units) as the external inflow of node
/// `index`.
///
/// The first call on a node attaches a direct-flow inflow record; later
/// calls only overwrite its latched value. The value is added to the node's
/// inflow on every step until it is overwritten.
pub fn set_node_inflow(project: &mut Project, index: i32, flow: f64) -> Result<(), ToolkitError> {
    require_started(project)?;
    let i = catalog::resolve(project, ObjectKind::Node, index)?.index();
    let record = match project.ensure_ext_inflow(i) {
        Some(record) => record,
        None => return Err(out_of_range(project, ObjectKind::Node, index)),
    };
    record.latched = flow;
    tracing::debug!(node = i, flow, "node inflow overridden");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_core::{LinkType, NodeType};
    use sluice_core::ControlActionSink;
    use sluice_engine::{ExtInflow, Link, Node, ProjectBuilder, SimulationOptions};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<ControlAction>>>;

    fn project(controls: bool) -> (Project, Log) {
        let mut options = SimulationOptions::default();
        options.report.controls = controls;
        let log = Log::default();
        let sink = Shared(log.clone());
        let mut gate = Link::new(LinkType::Orifice);
        gate.opening_time = 600.0;
        let p = ProjectBuilder::new(options)
            .node("J1", Node::new(NodeType::Junction, 2.0, 10.0))
            .node("O1", Node::new(NodeType::Outfall, 0.0, 0.0))
            .link("G1", "J1", "O1", gate)
            .control_sink(Box::new(sink))
            .build()
            .unwrap();
        (p, log)
    }

    struct Shared(Log);

    impl ControlActionSink for Shared {
        fn record(&mut self, action: &ControlAction) {
            self.0.lock().unwrap().push(action.clone());
        }
    }

    #[test]
    fn setting_applies_synchronously_even_for_timed_gates() {
        let (mut p, _) = project(false);
        p.start().unwrap();
        set_link_setting(&mut p, 0, 0.25).unwrap();
        assert_eq!(p.links()[0].target_setting, 0.25);
        assert_eq!(p.links()[0].setting, 0.25);
    }

    #[test]
    fn audit_record_only_when_enabled() {
        let (mut p, log) = project(false);
        p.start().unwrap();
        set_link_setting(&mut p, 0, 0.5).unwrap();
        assert!(log.lock().unwrap().is_empty());

        let (mut p, log) = project(true);
        p.start().unwrap();
        p.step().unwrap();
        set_link_setting(&mut p, 0, 0.5).unwrap();
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].link_id, "G1");
        assert_eq!(log[0].source, ActionSource::Toolkit);
        assert_eq!(
            log[0].to_string(),
            "  JAN-01-2000 00:05:00: Link G1 setting changed to   0.50 by ToolkitAPI"
        );
    }

    #[test]
    fn overrides_need_running_simulation() {
        let (mut p, log) = project(true);
        assert_eq!(set_link_setting(&mut p, 0, 0.0), Err(ToolkitError::NotStarted));
        assert_eq!(set_node_inflow(&mut p, 0, 1.0), Err(ToolkitError::NotStarted));
        assert_eq!(p.links()[0].target_setting, 1.0);
        assert!(p.nodes()[0].ext_inflow.is_none());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn bad_index_leaves_state_alone() {
        let (mut p, log) = project(true);
        p.start().unwrap();
        assert!(matches!(
            set_link_setting(&mut p, 1, 0.0),
            Err(ToolkitError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            set_node_inflow(&mut p, -3, 1.0),
            Err(ToolkitError::IndexOutOfRange { .. })
        ));
        assert!(p.nodes().iter().all(|n| n.ext_inflow.is_none()));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn first_inflow_attaches_canonical_record() {
        let (mut p, _) = project(false);
        p.start().unwrap();
        set_node_inflow(&mut p, 0, 3.5).unwrap();
        let r = p.nodes()[0].ext_inflow.as_ref().unwrap();
        assert_eq!(
            *r,
            ExtInflow {
                latched: 3.5,
                ..ExtInflow::direct_flow()
            }
        );
        set_node_inflow(&mut p, 0, -1.0).unwrap();
        assert_eq!(p.nodes()[0].ext_inflow.as_ref().unwrap().latched, -1.0);
    }
}
