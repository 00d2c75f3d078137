//! Core types and traits for the Sluice introspection layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the engine, the toolkit and the C ABI:
//! object kinds and subtypes, lifecycle phases, unit conversion,
//! error types and control-action audit records.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod audit;
pub mod error;
pub mod kind;
pub mod phase;
pub mod time;
pub mod units;

pub use audit::{ActionSource, ControlAction, ControlActionSink};
pub use error::ToolkitError;
pub use kind::{LinkType, NodeType, ObjectKind};
pub use phase::{Lifecycle, Phase};
pub use units::{Conversion, FlowUnits, Quantity, UnitSystem, UnitTable};
