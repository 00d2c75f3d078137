//! Network object model and lifecycle for the Sluice introspection layer.
//!
//! [`Project`] owns the engine-wide object arenas (nodes, links,
//! subcatchments and the identifier tables of every kind), the simulation
//! options and the lifecycle phase. Projects are assembled by
//! [`ProjectBuilder`] and driven through `start → step → end`.
//!
//! The stepping loop here is a lumped reference implementation: it honors
//! link settings and external inflow overrides but is not a hydraulic
//! solver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod inflow;
pub mod objects;
pub mod options;
pub mod project;
pub mod registry;
pub mod report;

pub use builder::{BuildError, ProjectBuilder, SubcatchOutlet};
pub use inflow::ExtInflow;
pub use objects::{Link, Node, Subcatchment};
pub use options::{
    AnalysisOptions, ContinuityErrors, OptionsError, ReportOptions, SimulationOptions, StepOptions,
};
pub use project::{LifecycleError, Project};
pub use registry::ObjectRegistry;
pub use report::{Report, TextSink, TracingSink};
