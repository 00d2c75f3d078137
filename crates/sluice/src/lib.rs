//! Sluice: live introspection and override for a running drainage
//! network simulation.
//!
//! This is the facade crate that re-exports the public API of the Sluice
//! sub-crates. Hosts that need a C ABI link `sluice-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use sluice::prelude::*;
//!
//! let options = SimulationOptions {
//!     flow_units: FlowUnits::Cms,
//!     ..SimulationOptions::default()
//! };
//! let mut project = ProjectBuilder::new(options)
//!     .node("J1", Node::new(NodeType::Junction, 10.0, 5.0))
//!     .node("OF1", Node::new(NodeType::Outfall, 8.0, 0.0))
//!     .link("G1", "J1", "OF1", Link::new(LinkType::Orifice))
//!     .build()
//!     .unwrap();
//!
//! // Static parameters are readable as soon as the project is open.
//! assert_eq!(toolkit::count_objects(&project, ObjectKind::Node.code()), Ok(2));
//! let invert = toolkit::node_param(&project, 0, NodeParam::InvertElev.code()).unwrap();
//! assert!((invert - 3.048).abs() < 1e-9);
//!
//! // Results and overrides need a running simulation.
//! project.start().unwrap();
//! toolkit::set_node_inflow(&mut project, 0, 1.0).unwrap();
//! toolkit::set_link_setting(&mut project, 0, 0.5).unwrap();
//! project.step().unwrap();
//! let setting = toolkit::link_result(&project, 0, LinkResult::Setting.code()).unwrap();
//! assert_eq!(setting, 0.5);
//! project.end().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sluice-core` | Object kinds, phases, units, errors, audit records |
//! | [`engine`] | `sluice-engine` | Object model, options, builder and lifecycle |
//! | [`toolkit`] | `sluice-toolkit` | Catalog, dispatch tables, connectivity, metadata, overrides |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`sluice-core`).
///
/// Object kinds and subtypes, lifecycle [`types::Phase`], the
/// [`types::UnitTable`] and the [`types::ToolkitError`] every query
/// returns.
pub use sluice_core as types;

/// Object model and lifecycle (`sluice-engine`).
///
/// Assemble a [`engine::Project`] with [`engine::ProjectBuilder`] and drive
/// it through `start`, `step` and `end`.
pub use sluice_engine as engine;

/// Phase-aware introspection and overrides (`sluice-toolkit`).
pub use sluice_toolkit as toolkit;

/// Common imports for typical Sluice usage.
///
/// ```rust
/// use sluice::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sluice_core::{
        ControlAction, ControlActionSink, FlowUnits, Lifecycle, LinkType, NodeType, ObjectKind,
        Phase, ToolkitError, UnitSystem,
    };

    // Engine
    pub use sluice_engine::{
        ExtInflow, Link, Node, Project, ProjectBuilder, SimulationOptions, SubcatchOutlet,
        Subcatchment,
    };

    // Toolkit codes
    pub use sluice_toolkit::{
        AnalysisSetting, LinkParam, LinkResult, NodeParam, NodeResult, SimulationDate,
        SimulationParam, SimulationUnit, SubcatchParam, SubcatchResult,
    };

    /// Toolkit operations, addressed as `toolkit::node_result(..)`.
    pub use sluice_toolkit as toolkit;
}
