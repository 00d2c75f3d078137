//! Phase guard.
//!
//! Static parameters need `phase >= Open`; dynamic results and overrides
//! need `phase == Started`. The phase is queried on every call and never
//! cached. A rejected call has no side effects.

use sluice_core::{Lifecycle, ToolkitError};

/// Fail with [`ToolkitError::NotOpen`] unless an object graph exists.
pub fn require_open<L: Lifecycle + ?Sized>(engine: &L) -> Result<(), ToolkitError> {
    if engine.is_open() {
        Ok(())
    } else {
        tracing::trace!(phase = %engine.phase(), "rejected: project not open");
        Err(ToolkitError::NotOpen)
    }
}

/// Fail with [`ToolkitError::NotStarted`] unless the stepping loop is active.
pub fn require_started<L: Lifecycle + ?Sized>(engine: &L) -> Result<(), ToolkitError> {
    if engine.is_started() {
        Ok(())
    } else {
        tracing::trace!(phase = %engine.phase(), "rejected: simulation not running");
        Err(ToolkitError::NotStarted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_core::Phase;

    struct At(Phase);

    impl Lifecycle for At {
        fn phase(&self) -> Phase {
            self.0
        }
    }

    #[test]
    fn open_requirement() {
        assert_eq!(require_open(&At(Phase::Closed)), Err(ToolkitError::NotOpen));
        for p in [Phase::Open, Phase::Started, Phase::Ended] {
            assert_eq!(require_open(&At(p)), Ok(()));
        }
    }

    #[test]
    fn started_requirement() {
        for p in [Phase::Closed, Phase::Open, Phase::Ended] {
            assert_eq!(require_started(&At(p)), Err(ToolkitError::NotStarted));
        }
        assert_eq!(require_started(&At(Phase::Started)), Ok(()));
    }
}
