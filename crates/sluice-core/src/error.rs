//! Error taxonomy for toolkit operations.
//!
//! Every operation detects its error at the boundary and returns it
//! immediately. No variant is fatal to the engine, and none is produced
//! after a partial mutation.

use thiserror::Error;

use crate::kind::ObjectKind;

/// Errors returned by catalog, dispatch and override operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ToolkitError {
    /// The operation needs the object graph, but no project is open.
    #[error("project is not open")]
    NotOpen,
    /// The operation needs an active stepping loop; the simulation has
    /// not started or has already ended.
    #[error("simulation is not running")]
    NotStarted,
    /// The object index is outside `[0, count)` for its kind.
    #[error("{kind} index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Kind that was addressed.
        kind: ObjectKind,
        /// The rejected index, as supplied by the caller.
        index: i32,
        /// Number of objects of that kind.
        count: usize,
    },
    /// The kind code has no entry in the relevant table.
    #[error("unknown object kind code {code}")]
    UnknownKind {
        /// The rejected code.
        code: i32,
    },
    /// The parameter or result code has no entry in the kind's table.
    #[error("unknown {kind} parameter code {code}")]
    UnknownParameter {
        /// Kind whose table was consulted.
        kind: ObjectKind,
        /// The rejected code.
        code: i32,
    },
    /// A simulation metadata code has no entry in its table.
    #[error("unknown {query} code {code}")]
    UnknownSimulationCode {
        /// Which metadata query was asked.
        query: &'static str,
        /// The rejected code.
        code: i32,
    },
}

impl ToolkitError {
    /// Whether this error comes from a lifecycle phase check.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotOpen | Self::NotStarted)
    }
}
