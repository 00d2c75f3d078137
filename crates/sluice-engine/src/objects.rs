//! Live network objects.
//!
//! All values are in internal units (feet, seconds, cfs). Static attributes
//! are set by the builder; dynamic ones are written by the stepping loop and
//! are only meaningful while the project is started.

use sluice_core::{LinkType, NodeType};

use crate::inflow::ExtInflow;

/// A junction, outfall, storage unit or divider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Structural subtype.
    pub node_type: NodeType,
    /// Invert elevation (ft).
    pub invert_elev: f64,
    /// Depth from invert to crown (ft).
    pub full_depth: f64,
    /// Additional depth allowed under surcharge (ft).
    pub sur_depth: f64,
    /// Area available for ponding (ft2).
    pub ponded_area: f64,
    /// Initial water depth (ft).
    pub init_depth: f64,

    /// Total inflow (cfs).
    pub inflow: f64,
    /// Total outflow (cfs).
    pub outflow: f64,
    /// Evaporation and seepage losses (cfs).
    pub losses: f64,
    /// Stored volume (ft3).
    pub new_volume: f64,
    /// Flow lost to flooding (cfs).
    pub overflow: f64,
    /// Water depth (ft).
    pub new_depth: f64,
    /// Lateral inflow (cfs).
    pub new_lat_flow: f64,

    /// External inflow record, created lazily by the first override.
    pub ext_inflow: Option<ExtInflow>,
}

impl Node {
    /// A node of the given subtype with the given invert and full depth.
    pub fn new(node_type: NodeType, invert_elev: f64, full_depth: f64) -> Self {
        Self {
            node_type,
            invert_elev,
            full_depth,
            ..Self::default()
        }
    }
}

/// A conduit, pump, orifice, weir or outlet joining two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Structural subtype.
    pub link_type: LinkType,
    /// Upstream node index.
    pub node1: usize,
    /// Downstream node index.
    pub node2: usize,
    /// Offset above the upstream invert (ft).
    pub offset1: f64,
    /// Offset above the downstream invert (ft).
    pub offset2: f64,
    /// Initial flow (cfs).
    pub q0: f64,
    /// Maximum flow; zero means unlimited (cfs).
    pub q_limit: f64,
    /// Inlet loss coefficient.
    pub c_loss_inlet: f64,
    /// Outlet loss coefficient.
    pub c_loss_outlet: f64,
    /// Average loss coefficient.
    pub c_loss_avg: f64,
    /// `1`, or `-1` when the engine reversed the link for a negative slope.
    pub direction: i8,
    /// Setting at the start of a run.
    pub init_setting: f64,
    /// Time for an orifice or weir to move fully open (s); zero is instant.
    pub opening_time: f64,

    /// Flow (cfs).
    pub new_flow: f64,
    /// Flow depth (ft).
    pub new_depth: f64,
    /// Stored volume (ft3).
    pub new_volume: f64,
    /// Upstream surface area (ft2).
    pub surf_area1: f64,
    /// Downstream surface area (ft2).
    pub surf_area2: f64,
    /// Current setting.
    pub setting: f64,
    /// Commanded setting.
    pub target_setting: f64,
    /// Froude number.
    pub froude: f64,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            link_type: LinkType::Conduit,
            node1: 0,
            node2: 0,
            offset1: 0.0,
            offset2: 0.0,
            q0: 0.0,
            q_limit: 0.0,
            c_loss_inlet: 0.0,
            c_loss_outlet: 0.0,
            c_loss_avg: 0.0,
            direction: 1,
            init_setting: 1.0,
            opening_time: 0.0,
            new_flow: 0.0,
            new_depth: 0.0,
            new_volume: 0.0,
            surf_area1: 0.0,
            surf_area2: 0.0,
            setting: 1.0,
            target_setting: 1.0,
            froude: 0.0,
        }
    }
}

impl Link {
    /// A link of the given subtype.
    pub fn new(link_type: LinkType) -> Self {
        Self {
            link_type,
            ..Self::default()
        }
    }

    /// Node indices in flow order, honoring `direction`.
    pub fn flow_ends(&self) -> (usize, usize) {
        if self.direction < 0 {
            (self.node2, self.node1)
        } else {
            (self.node1, self.node2)
        }
    }

    /// Whether the setting may move gradually toward its target.
    pub fn is_gradual(&self) -> bool {
        matches!(self.link_type, LinkType::Orifice | LinkType::Weir) && self.opening_time > 0.0
    }
}

/// A land surface that generates runoff.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subcatchment {
    /// Characteristic width (ft).
    pub width: f64,
    /// Area (ft2).
    pub area: f64,
    /// Impervious fraction.
    pub frac_imperv: f64,
    /// Slope (ft/ft).
    pub slope: f64,
    /// Total curb length (ft).
    pub curb_length: f64,
    /// Rainfall intensity held for the whole run (ft/s).
    pub rain_rate: f64,
    /// Potential evaporation rate (ft/s).
    pub evap_rate: f64,
    /// Infiltration capacity of the pervious area (ft/s).
    pub infil_rate: f64,
    /// Snow pack depth at start (ft).
    pub init_snow_depth: f64,
    /// Snowmelt rate (ft/s).
    pub melt_rate: f64,
    /// Outlet node, if routed to a node.
    pub out_node: Option<usize>,
    /// Outlet subcatchment, if routed to another subcatchment.
    pub out_subcatch: Option<usize>,

    /// Rainfall rate (ft/s).
    pub rainfall: f64,
    /// Evaporation loss rate (ft/s).
    pub evap_loss: f64,
    /// Infiltration loss rate (ft/s).
    pub infil_loss: f64,
    /// Runon from upstream subcatchments (cfs).
    pub runon: f64,
    /// Runoff (cfs).
    pub new_runoff: f64,
    /// Snow depth (ft).
    pub new_snow_depth: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_link_swaps_flow_ends() {
        let mut l = Link::new(LinkType::Conduit);
        l.node1 = 3;
        l.node2 = 7;
        assert_eq!(l.flow_ends(), (3, 7));
        l.direction = -1;
        assert_eq!(l.flow_ends(), (7, 3));
    }

    #[test]
    fn only_timed_gates_are_gradual() {
        let mut l = Link::new(LinkType::Orifice);
        assert!(!l.is_gradual());
        l.opening_time = 60.0;
        assert!(l.is_gradual());
        let mut p = Link::new(LinkType::Pump);
        p.opening_time = 60.0;
        assert!(!p.is_gradual());
    }
}
