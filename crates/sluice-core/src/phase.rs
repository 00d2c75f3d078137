//! Engine lifecycle phases and the read-only query the toolkit consults.

use std::fmt;

/// Lifecycle phase of the engine.
///
/// Phases only move forward (`Closed → Open → Started → Ended`) until the
/// project is closed again. Ordering follows that progression, so
/// `phase >= Phase::Open` means the object graph is addressable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// No object graph exists.
    #[default]
    Closed,
    /// Objects are built; the stepping loop has not started.
    Open,
    /// The stepping loop is active. Dynamic results are defined.
    Started,
    /// Stepping has stopped; objects remain addressable.
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Started => "started",
            Self::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// Read-only lifecycle query owned by the engine.
///
/// The toolkit calls this at the top of every operation and never caches
/// the answer.
pub trait Lifecycle {
    /// The engine's current phase.
    fn phase(&self) -> Phase;

    /// Whether an object graph exists (`phase >= Open`).
    fn is_open(&self) -> bool {
        self.phase() >= Phase::Open
    }

    /// Whether the stepping loop is active.
    fn is_started(&self) -> bool {
        self.phase() == Phase::Started
    }
}
