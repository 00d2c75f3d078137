//! Benchmark profiles for the Sluice introspection layer.
//!
//! - [`chain_profile`]: a linear chain of `n` junctions draining to one
//!   outfall, with one subcatchment per junction and a gated outlet link.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use sluice_core::{FlowUnits, LinkType, NodeType};
use sluice_engine::{
    BuildError, ExtInflow, Link, Node, Project, ProjectBuilder, SimulationOptions,
    SubcatchOutlet, Subcatchment,
};

/// Build a chain network of `n` junctions (`n >= 1`).
///
/// Nodes are `J0..J{n-1}` followed by outfall `OF`, links are conduits
/// `C0..C{n-2}` followed by orifice `G` from the last junction to the
/// outfall, and subcatchment `S{i}` drains to `J{i}`. The first junction
/// carries a baseline inflow so results are non-trivial.
pub fn chain_profile(n: usize, flow_units: FlowUnits) -> Result<Project, BuildError> {
    let options = SimulationOptions {
        flow_units,
        ..SimulationOptions::default()
    };
    let mut builder = ProjectBuilder::new(options);
    for i in 0..n {
        let invert = 100.0 - i as f64 * 0.1;
        builder = builder.node(format!("J{i}"), Node::new(NodeType::Junction, invert, 10.0));
        builder = builder.subcatchment(
            format!("S{i}"),
            Subcatchment {
                area: 43_560.0,
                width: 200.0,
                frac_imperv: 0.5,
                slope: 0.01,
                ..Subcatchment::default()
            },
            SubcatchOutlet::Node(format!("J{i}")),
        );
    }
    builder = builder.node("OF", Node::new(NodeType::Outfall, 0.0, 0.0));
    for i in 1..n {
        builder = builder.link(
            format!("C{}", i - 1),
            format!("J{}", i - 1),
            format!("J{i}"),
            Link::new(LinkType::Conduit),
        );
    }
    let last = n.saturating_sub(1);
    builder
        .link("G", format!("J{last}"), "OF", Link::new(LinkType::Orifice))
        .ext_inflow("J0", ExtInflow::with_baseline(1.0, 1.0))
        .build()
}
