//! Object kinds and structural subtypes.
//!
//! Codes are ABI-stable: they match the engine's object-type table and are
//! passed verbatim across the C boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

/// The kinds of object the engine keeps in per-kind, zero-based index spaces.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Rain gage.
    Gage = 0,
    /// Runoff-generating land surface.
    Subcatchment = 1,
    /// Junction, outfall, storage unit or flow divider.
    Node = 2,
    /// Conduit, pump, orifice, weir or outlet.
    Link = 3,
    /// Water-quality constituent.
    Pollutant = 4,
    /// Land-use category.
    LandUse = 5,
    /// Periodic multiplier pattern.
    TimePattern = 6,
    /// Tabulated curve.
    Curve = 7,
    /// Time series.
    TimeSeries = 8,
    /// Control rule.
    Control = 9,
    /// Irregular channel cross-section.
    Transect = 10,
    /// Groundwater aquifer.
    Aquifer = 11,
    /// RDII unit hydrograph group.
    UnitHydrograph = 12,
    /// Snowmelt parameter set.
    Snowmelt = 13,
    /// Custom conduit shape.
    Shape = 14,
    /// Low-impact development control.
    Lid = 15,
}

impl ObjectKind {
    /// Number of object kinds.
    pub const COUNT: usize = 16;

    /// Every kind, ordered by code.
    pub const ALL: [ObjectKind; Self::COUNT] = [
        Self::Gage,
        Self::Subcatchment,
        Self::Node,
        Self::Link,
        Self::Pollutant,
        Self::LandUse,
        Self::TimePattern,
        Self::Curve,
        Self::TimeSeries,
        Self::Control,
        Self::Transect,
        Self::Aquifer,
        Self::UnitHydrograph,
        Self::Snowmelt,
        Self::Shape,
        Self::Lid,
    ];

    /// Decode a kind from its integer code.
    pub fn from_code(code: i32) -> Result<Self, ToolkitError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ToolkitError::UnknownKind { code })
    }

    /// The ABI code of this kind.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Position of this kind in per-kind tables.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Whether the catalog exposes identifiers for this kind.
    ///
    /// Curves, time series, control rules, shapes and LID controls are
    /// counted but their identifiers are not published.
    pub fn has_identifier(self) -> bool {
        !matches!(
            self,
            Self::Curve | Self::TimeSeries | Self::Control | Self::Shape | Self::Lid
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gage => "gage",
            Self::Subcatchment => "subcatchment",
            Self::Node => "node",
            Self::Link => "link",
            Self::Pollutant => "pollutant",
            Self::LandUse => "land use",
            Self::TimePattern => "time pattern",
            Self::Curve => "curve",
            Self::TimeSeries => "time series",
            Self::Control => "control rule",
            Self::Transect => "transect",
            Self::Aquifer => "aquifer",
            Self::UnitHydrograph => "unit hydrograph",
            Self::Snowmelt => "snowmelt",
            Self::Shape => "shape",
            Self::Lid => "LID control",
        };
        f.write_str(name)
    }
}

/// Structural subtype of a node.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Plain junction.
    #[default]
    Junction = 0,
    /// Terminal outfall.
    Outfall = 1,
    /// Storage unit.
    Storage = 2,
    /// Flow divider.
    Divider = 3,
}

impl NodeType {
    /// The ABI code of this subtype.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Structural subtype of a link.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Open channel or closed conduit.
    #[default]
    Conduit = 0,
    /// Pump.
    Pump = 1,
    /// Orifice.
    Orifice = 2,
    /// Weir.
    Weir = 3,
    /// Rating-curve outlet.
    Outlet = 4,
}

impl LinkType {
    /// The ABI code of this subtype.
    pub fn code(self) -> i32 {
        self as i32
    }
}
