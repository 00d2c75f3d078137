//! Project construction.
//!
//! [`ProjectBuilder`] collects objects by identifier and resolves every
//! cross-reference in [`build()`](ProjectBuilder::build). A built project is
//! in the `Open` phase: link endpoints are valid node indices and every
//! subcatchment routes to at most one target.

use sluice_core::{ControlActionSink, ObjectKind};
use thiserror::Error;

use crate::inflow::ExtInflow;
use crate::objects::{Link, Node, Subcatchment};
use crate::options::{OptionsError, SimulationOptions};
use crate::project::Project;
use crate::registry::ObjectRegistry;
use crate::report::{Report, TracingSink};

/// Errors detected while building a project.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Options failed validation.
    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),
    /// An identifier is used twice within one kind.
    #[error("duplicate {kind} identifier '{id}'")]
    DuplicateId {
        /// Kind of the duplicated object.
        kind: ObjectKind,
        /// The duplicated identifier.
        id: String,
    },
    /// A reference names an object that was never added.
    #[error("{from} refers to unknown {kind} '{id}'")]
    UnknownReference {
        /// Identifier of the referring object.
        from: String,
        /// Kind that was looked up.
        kind: ObjectKind,
        /// The missing identifier.
        id: String,
    },
    /// A subcatchment names itself as its outlet.
    #[error("subcatchment '{id}' routes onto itself")]
    SelfOutlet {
        /// The offending subcatchment.
        id: String,
    },
}

/// Where a subcatchment sends its runoff.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubcatchOutlet {
    /// Runoff stays on the subcatchment (self-loading).
    #[default]
    None,
    /// Runoff enters a node.
    Node(String),
    /// Runoff lands on another subcatchment.
    Subcatchment(String),
}

struct PendingLink {
    id: String,
    from: String,
    to: String,
    link: Link,
}

struct PendingSubcatch {
    id: String,
    outlet: SubcatchOutlet,
    subcatch: Subcatchment,
}

/// Assembles a [`Project`].
///
/// # Example
///
/// ```
/// use sluice_core::{LinkType, NodeType};
/// use sluice_engine::{Link, Node, ProjectBuilder, SimulationOptions};
///
/// let project = ProjectBuilder::new(SimulationOptions::default())
///     .node("J1", Node::new(NodeType::Junction, 100.0, 4.0))
///     .node("O1", Node::new(NodeType::Outfall, 98.0, 0.0))
///     .link("C1", "J1", "O1", Link::new(LinkType::Conduit))
///     .build()
///     .unwrap();
/// assert_eq!(project.links()[0].node2, 1);
/// ```
pub struct ProjectBuilder {
    options: SimulationOptions,
    named: Vec<(ObjectKind, String)>,
    nodes: Vec<(String, Node)>,
    links: Vec<PendingLink>,
    subcatchments: Vec<PendingSubcatch>,
    inflows: Vec<(String, ExtInflow)>,
    sink: Option<Box<dyn ControlActionSink>>,
}

impl ProjectBuilder {
    /// Start a project with the given options.
    pub fn new(options: SimulationOptions) -> Self {
        Self {
            options,
            named: Vec::new(),
            nodes: Vec::new(),
            links: Vec::new(),
            subcatchments: Vec::new(),
            inflows: Vec::new(),
            sink: None,
        }
    }

    /// Register an object that only carries an identifier (gages,
    /// pollutants, patterns, curves, and so on).
    pub fn object(mut self, kind: ObjectKind, id: impl Into<String>) -> Self {
        self.named.push((kind, id.into()));
        self
    }

    /// Add a node.
    pub fn node(mut self, id: impl Into<String>, node: Node) -> Self {
        self.nodes.push((id.into(), node));
        self
    }

    /// Add a link between two nodes given by identifier.
    pub fn link(
        mut self,
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        link: Link,
    ) -> Self {
        self.links.push(PendingLink {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            link,
        });
        self
    }

    /// Add a subcatchment and its outlet.
    pub fn subcatchment(
        mut self,
        id: impl Into<String>,
        subcatch: Subcatchment,
        outlet: SubcatchOutlet,
    ) -> Self {
        self.subcatchments.push(PendingSubcatch {
            id: id.into(),
            outlet,
            subcatch,
        });
        self
    }

    /// Attach an external inflow record to a node.
    pub fn ext_inflow(mut self, node: impl Into<String>, inflow: ExtInflow) -> Self {
        self.inflows.push((node.into(), inflow));
        self
    }

    /// Send control-action records to `sink` instead of `tracing`.
    pub fn control_sink(mut self, sink: Box<dyn ControlActionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate, resolve references and produce an open project.
    pub fn build(self) -> Result<Project, BuildError> {
        self.options.validate()?;

        let mut registry = ObjectRegistry::new();
        let mut register = |kind: ObjectKind, id: &str| -> Result<usize, BuildError> {
            registry
                .insert(kind, id)
                .ok_or_else(|| BuildError::DuplicateId {
                    kind,
                    id: id.to_owned(),
                })
        };

        for (kind, id) in &self.named {
            register(*kind, id)?;
        }
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (id, node) in self.nodes {
            register(ObjectKind::Node, &id)?;
            nodes.push(node);
        }
        for pending in &self.links {
            register(ObjectKind::Link, &pending.id)?;
        }
        for pending in &self.subcatchments {
            register(ObjectKind::Subcatchment, &pending.id)?;
        }

        let resolve = |from: &str, kind: ObjectKind, id: &str| {
            registry
                .index_of(kind, id)
                .ok_or_else(|| BuildError::UnknownReference {
                    from: from.to_owned(),
                    kind,
                    id: id.to_owned(),
                })
        };

        let mut links = Vec::with_capacity(self.links.len());
        for pending in self.links {
            let mut link = pending.link;
            link.node1 = resolve(&pending.id, ObjectKind::Node, &pending.from)?;
            link.node2 = resolve(&pending.id, ObjectKind::Node, &pending.to)?;
            links.push(link);
        }

        let mut subcatchments = Vec::with_capacity(self.subcatchments.len());
        for pending in self.subcatchments {
            let mut sc = pending.subcatch;
            sc.out_node = None;
            sc.out_subcatch = None;
            match &pending.outlet {
                SubcatchOutlet::None => {}
                SubcatchOutlet::Node(target) => {
                    sc.out_node = Some(resolve(&pending.id, ObjectKind::Node, target)?);
                }
                SubcatchOutlet::Subcatchment(target) => {
                    if *target == pending.id {
                        return Err(BuildError::SelfOutlet { id: pending.id });
                    }
                    sc.out_subcatch =
                        Some(resolve(&pending.id, ObjectKind::Subcatchment, target)?);
                }
            }
            subcatchments.push(sc);
        }

        for (node_id, inflow) in self.inflows {
            let index = resolve("external inflow", ObjectKind::Node, &node_id)?;
            nodes[index].ext_inflow = Some(inflow);
        }

        let report = Report::new(
            self.options.report,
            self.sink.unwrap_or_else(|| Box::new(TracingSink)),
        );
        tracing::debug!(
            nodes = nodes.len(),
            links = links.len(),
            subcatchments = subcatchments.len(),
            "project built"
        );
        Ok(Project::from_parts(
            self.options,
            registry,
            nodes,
            links,
            subcatchments,
            report,
        ))
    }
}
