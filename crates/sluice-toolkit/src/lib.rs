//! Live introspection and override layer for a Sluice project.
//!
//! Every operation follows the same path: the phase guard checks the
//! project's lifecycle phase, the catalog bounds-checks the object index,
//! and then either a dispatch table is consulted (reads) or the override
//! injector mutates the addressed attribute (writes).
//!
//! Indices and codes are plain `i32` values as they arrive from hosts, so
//! that the error ordering is the same whether a call comes from Rust or
//! across the C boundary: phase first, then index, then code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod connectivity;
pub mod dispatch;
pub mod guard;
pub mod inject;
pub mod simulation;

pub use catalog::{count_objects, object_id};
pub use connectivity::{
    link_connections, link_direction, link_type, node_type, subcatch_out_connection,
};
pub use dispatch::{
    link_param, link_result, node_param, node_result, object_param, object_result,
    subcatch_param, subcatch_result, LinkParam, LinkResult, NodeParam, NodeResult,
    SubcatchParam, SubcatchResult,
};
pub use inject::{set_link_setting, set_node_inflow};
pub use simulation::{
    analysis_setting, current_datetime, simulation_datetime, simulation_param, simulation_unit,
    AnalysisSetting, SimulationDate, SimulationParam, SimulationUnit,
};
