//! External inflow records attached to nodes.

/// A flow-type external inflow owned by a node.
///
/// The engine evaluates it every step as
/// `conversion * scale * baseline + latched`. `latched` is the live
/// override written by the toolkit; it persists until overwritten.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtInflow {
    /// Unit conversion applied to the baseline.
    pub conversion: f64,
    /// Scale factor applied to the baseline.
    pub scale: f64,
    /// Constant baseline flow (cfs before conversion).
    pub baseline: f64,
    /// Override flow rate in internal units, reapplied every step.
    pub latched: f64,
}

impl ExtInflow {
    /// The canonical record created on a node's first override: direct,
    /// unconverted, unscaled flow with a zero baseline and no override yet.
    pub fn direct_flow() -> Self {
        Self {
            conversion: 1.0,
            scale: 1.0,
            baseline: 0.0,
            latched: 0.0,
        }
    }

    /// A direct flow record with a constant baseline.
    pub fn with_baseline(baseline: f64, scale: f64) -> Self {
        Self {
            baseline,
            scale,
            ..Self::direct_flow()
        }
    }

    /// Flow this record contributes in one step (cfs).
    pub fn value(&self) -> f64 {
        self.conversion * self.scale * self.baseline + self.latched
    }
}

impl Default for ExtInflow {
    fn default() -> Self {
        Self::direct_flow()
    }
}
