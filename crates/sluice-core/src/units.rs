//! Unit systems and the internal-to-display conversion table.
//!
//! The engine stores every quantity in US customary base units (feet,
//! seconds, cubic feet per second). A [`UnitTable`] holds the multiplicative
//! factors that take an internal value to the caller's display units and is
//! applied only at the read boundary.

use serde::{Deserialize, Serialize};

/// Display unit system.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// US customary.
    #[default]
    Us = 0,
    /// Metric.
    Si = 1,
}

impl UnitSystem {
    /// The ABI code of this unit system.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Flow units chosen for reporting. Each implies a unit system.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowUnits {
    /// Cubic feet per second.
    #[default]
    Cfs = 0,
    /// US gallons per minute.
    Gpm = 1,
    /// Million US gallons per day.
    Mgd = 2,
    /// Cubic meters per second.
    Cms = 3,
    /// Liters per second.
    Lps = 4,
    /// Million liters per day.
    Mld = 5,
}

impl FlowUnits {
    /// Every flow unit, ordered by code.
    pub const ALL: [FlowUnits; 6] = [
        Self::Cfs,
        Self::Gpm,
        Self::Mgd,
        Self::Cms,
        Self::Lps,
        Self::Mld,
    ];

    /// The ABI code of these flow units.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// The unit system these flow units belong to.
    pub fn unit_system(self) -> UnitSystem {
        match self {
            Self::Cfs | Self::Gpm | Self::Mgd => UnitSystem::Us,
            Self::Cms | Self::Lps | Self::Mld => UnitSystem::Si,
        }
    }

    /// Factor from internal cfs to these units.
    pub fn factor(self) -> f64 {
        match self {
            Self::Cfs => 1.0,
            Self::Gpm => 448.831,
            Self::Mgd => 0.64632,
            Self::Cms => 0.02832,
            Self::Lps => 28.317,
            Self::Mld => 2.4466,
        }
    }
}

/// Physical quantity category with its own conversion factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Rainfall or infiltration rate (in/hr, mm/hr).
    Rainfall,
    /// Rain or snow depth (in, mm).
    RainDepth,
    /// Evaporation rate (in/day, mm/day).
    EvapRate,
    /// Length or elevation (ft, m).
    Length,
    /// Land area (ac, ha).
    LandArea,
    /// Volume (ft3, m3).
    Volume,
    /// Wind speed (mph, km/hr).
    WindSpeed,
    /// Temperature scale (deg F, deg C).
    Temperature,
    /// Pollutant mass (lb, kg).
    Mass,
    /// Groundwater flow per unit area (cfs/ac, cms/ha).
    GwFlow,
    /// Flow rate, in the configured flow units.
    Flow,
}

impl Quantity {
    /// (US, SI) factors for categories that depend only on the unit system.
    fn system_factors(self) -> Option<[f64; 2]> {
        let f = match self {
            Self::Rainfall => [43200.0, 1097280.0],
            Self::RainDepth => [12.0, 304.8],
            Self::EvapRate => [1036800.0, 26334720.0],
            Self::Length => [1.0, 0.3048],
            Self::LandArea => [2.2956e-5, 0.92903e-5],
            Self::Volume => [1.0, 0.02832],
            Self::WindSpeed => [1.0, 1.608],
            Self::Temperature => [1.0, 1.8],
            Self::Mass => [2.203e-6, 1.0e-6],
            Self::GwFlow => [43560.0, 3048.0],
            Self::Flow => return None,
        };
        Some(f)
    }
}

/// How a dispatched attribute converts to display units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// Dimensionless or raw; returned unchanged.
    None,
    /// Multiplied by the category factor.
    Linear(Quantity),
    /// Multiplied by the square of the category factor (areas).
    Squared(Quantity),
}

/// Conversion factors for one unit configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitTable {
    system: UnitSystem,
    flow_units: FlowUnits,
}

impl UnitTable {
    /// Build the table for the given flow units (which fix the unit system).
    pub fn new(flow_units: FlowUnits) -> Self {
        Self {
            system: flow_units.unit_system(),
            flow_units,
        }
    }

    /// The unit system in effect.
    pub fn unit_system(&self) -> UnitSystem {
        self.system
    }

    /// The flow units in effect.
    pub fn flow_units(&self) -> FlowUnits {
        self.flow_units
    }

    /// Factor from internal units to display units for `quantity`.
    pub fn factor(&self, quantity: Quantity) -> f64 {
        match quantity.system_factors() {
            Some(f) => f[self.system as usize],
            None => self.flow_units.factor(),
        }
    }

    /// The multiplier `conversion` applies.
    pub fn scale(&self, conversion: Conversion) -> f64 {
        match conversion {
            Conversion::None => 1.0,
            Conversion::Linear(q) => self.factor(q),
            Conversion::Squared(q) => {
                let f = self.factor(q);
                f * f
            }
        }
    }

    /// Convert an internal value to display units.
    pub fn to_display(&self, internal: f64, conversion: Conversion) -> f64 {
        internal * self.scale(conversion)
    }

    /// Convert a display value back to internal units.
    pub fn to_internal(&self, display: f64, conversion: Conversion) -> f64 {
        display / self.scale(conversion)
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new(FlowUnits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn flow_units_imply_system() {
        assert_eq!(FlowUnits::Gpm.unit_system(), UnitSystem::Us);
        assert_eq!(FlowUnits::Lps.unit_system(), UnitSystem::Si);
        assert_eq!(UnitTable::new(FlowUnits::Mld).unit_system(), UnitSystem::Si);
    }

    #[test]
    fn flow_factor_follows_flow_units() {
        let t = UnitTable::new(FlowUnits::Cms);
        assert_eq!(t.factor(Quantity::Flow), 0.02832);
        assert_eq!(t.factor(Quantity::Length), 0.3048);
        let t = UnitTable::new(FlowUnits::Gpm);
        assert_eq!(t.factor(Quantity::Flow), 448.831);
        assert_eq!(t.factor(Quantity::Length), 1.0);
    }

    #[test]
    fn squared_length_for_areas() {
        let t = UnitTable::new(FlowUnits::Lps);
        let s = t.scale(Conversion::Squared(Quantity::Length));
        assert!((s - 0.3048 * 0.3048).abs() < 1e-12);
        assert_eq!(t.scale(Conversion::None), 1.0);
    }

    fn arb_flow_units() -> impl Strategy<Value = FlowUnits> {
        (0usize..6).prop_map(|i| FlowUnits::ALL[i])
    }

    fn arb_conversion() -> impl Strategy<Value = Conversion> {
        prop_oneof![
            Just(Conversion::None),
            Just(Conversion::Linear(Quantity::Length)),
            Just(Conversion::Linear(Quantity::Flow)),
            Just(Conversion::Linear(Quantity::LandArea)),
            Just(Conversion::Linear(Quantity::Rainfall)),
            Just(Conversion::Squared(Quantity::Length)),
        ]
    }

    proptest! {
        #[test]
        fn display_round_trip(
            units in arb_flow_units(),
            conversion in arb_conversion(),
            value in -1.0e6f64..1.0e6,
        ) {
            let t = UnitTable::new(units);
            let back = t.to_internal(t.to_display(value, conversion), conversion);
            prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
        }
    }
}
