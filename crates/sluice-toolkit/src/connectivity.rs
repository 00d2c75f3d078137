//! Structural queries: subtypes and object references.
//!
//! These are static attributes, so they only need an open project.

use sluice_core::{LinkType, NodeType, ObjectKind, ToolkitError};
use sluice_engine::{Project, Subcatchment};

use crate::catalog;
use crate::guard::require_open;

/// Structural subtype of node `index`.
pub fn node_type(project: &Project, index: i32) -> Result<NodeType, ToolkitError> {
    require_open(project)?;
    Ok(catalog::node(project, index)?.node_type)
}

/// Structural subtype of link `index`.
pub fn link_type(project: &Project, index: i32) -> Result<LinkType, ToolkitError> {
    require_open(project)?;
    Ok(catalog::link(project, index)?.link_type)
}

/// Upstream and downstream node indices of link `index`, as defined.
///
/// These are the endpoints given at build time; a reversed link reports
/// the reversal through [`link_direction`] instead.
pub fn link_connections(project: &Project, index: i32) -> Result<(usize, usize), ToolkitError> {
    require_open(project)?;
    let link = catalog::link(project, index)?;
    Ok((link.node1, link.node2))
}

/// Raw direction flag of link `index`: `1`, or `-1` once the engine has
/// reversed it.
pub fn link_direction(project: &Project, index: i32) -> Result<i8, ToolkitError> {
    require_open(project)?;
    Ok(catalog::link(project, index)?.direction)
}

/// Where subcatchment `index` sends its runoff.
///
/// A subcatchment with no outlet loads itself and reports its own index.
/// Otherwise a node outlet wins over a subcatchment outlet.
pub fn subcatch_out_connection(
    project: &Project,
    index: i32,
) -> Result<(ObjectKind, usize), ToolkitError> {
    require_open(project)?;
    let own = catalog::resolve(project, ObjectKind::Subcatchment, index)?.index();
    let sc = catalog::subcatchment(project, index)?;
    Ok(outlet(own, sc))
}

fn outlet(own: usize, sc: &Subcatchment) -> (ObjectKind, usize) {
    match (sc.out_node, sc.out_subcatch) {
        (None, None) => (ObjectKind::Subcatchment, own),
        (Some(node), _) => (ObjectKind::Node, node),
        (None, Some(target)) => (ObjectKind::Subcatchment, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_engine::{Link, Node, ProjectBuilder, SimulationOptions, SubcatchOutlet};

    fn project() -> Project {
        let mut reversed = Link::new(LinkType::Pump);
        reversed.direction = -1;
        ProjectBuilder::new(SimulationOptions::default())
            .node("J1", Node::new(NodeType::Junction, 5.0, 3.0))
            .node("D1", Node::new(NodeType::Divider, 4.0, 3.0))
            .node("O1", Node::new(NodeType::Outfall, 3.0, 0.0))
            .link("C1", "J1", "D1", Link::new(LinkType::Conduit))
            .link("P1", "O1", "D1", reversed)
            .subcatchment("S1", Subcatchment::default(), SubcatchOutlet::Node("J1".into()))
            .subcatchment("S2", Subcatchment::default(), SubcatchOutlet::Subcatchment("S1".into()))
            .subcatchment("S3", Subcatchment::default(), SubcatchOutlet::None)
            .build()
            .unwrap()
    }

    #[test]
    fn subtypes() {
        let p = project();
        assert_eq!(node_type(&p, 1), Ok(NodeType::Divider));
        assert_eq!(link_type(&p, 1), Ok(LinkType::Pump));
        assert_eq!(link_type(&p, 1).unwrap().code(), 1);
    }

    #[test]
    fn connections_and_direction() {
        let p = project();
        assert_eq!(link_connections(&p, 0), Ok((0, 1)));
        assert_eq!(link_connections(&p, 1), Ok((2, 1)));
        assert_eq!(link_direction(&p, 0), Ok(1));
        assert_eq!(link_direction(&p, 1), Ok(-1));
    }

    #[test]
    fn outlet_resolution() {
        let p = project();
        assert_eq!(subcatch_out_connection(&p, 0), Ok((ObjectKind::Node, 0)));
        assert_eq!(subcatch_out_connection(&p, 1), Ok((ObjectKind::Subcatchment, 0)));
        assert_eq!(subcatch_out_connection(&p, 2), Ok((ObjectKind::Subcatchment, 2)));
    }

    #[test]
    fn node_outlet_wins_when_both_set() {
        let sc = Subcatchment {
            out_node: Some(1),
            out_subcatch: Some(0),
            ..Subcatchment::default()
        };
        assert_eq!(outlet(3, &sc), (ObjectKind::Node, 1));
    }

    #[test]
    fn bad_indices() {
        let p = project();
        assert!(matches!(
            link_connections(&p, 2),
            Err(ToolkitError::IndexOutOfRange { kind: ObjectKind::Link, .. })
        ));
        assert!(matches!(
            subcatch_out_connection(&p, -1),
            Err(ToolkitError::IndexOutOfRange { kind: ObjectKind::Subcatchment, .. })
        ));
    }

    #[test]
    fn closed_project_rejected() {
        let mut p = project();
        p.close();
        assert_eq!(node_type(&p, 0), Err(ToolkitError::NotOpen));
        assert_eq!(link_direction(&p, 0), Err(ToolkitError::NotOpen));
    }
}
