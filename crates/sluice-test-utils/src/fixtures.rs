//! Reusable network fixtures.
//!
//! [`sample_network`] is a small drainage system with every node and link
//! subtype, all three subcatchment outlet forms and a handful of
//! identifier-only objects:
//!
//! ```text
//!  S2 -> S1 -> J1 -C1-> J2 -C2-> J3 -C3-> SU1 -P1-> D1 =OR1/W1/OL1=> OF1
//!  S3 (self-loading)
//! ```
//!
//! The subcatchments are dry unless built through [`storm_builder`].

use chrono::TimeDelta;
use sluice_core::{FlowUnits, LinkType, NodeType, ObjectKind};
use sluice_engine::{
    ExtInflow, Link, Node, Project, ProjectBuilder, SimulationOptions, SubcatchOutlet,
    Subcatchment,
};

/// Node identifiers in index order.
pub const NODE_IDS: [&str; 6] = ["J1", "J2", "J3", "SU1", "D1", "OF1"];

/// Link identifiers in index order.
pub const LINK_IDS: [&str; 7] = ["C1", "C2", "C3", "P1", "OR1", "W1", "OL1"];

/// Subcatchment identifiers in index order.
pub const SUBCATCH_IDS: [&str; 3] = ["S1", "S2", "S3"];

/// Index of the self-loading subcatchment.
pub const SELF_LOADING: usize = 2;

/// Default options with the given flow units and a 300 s routing step over
/// six hours.
pub fn sample_options(flow_units: FlowUnits) -> SimulationOptions {
    let mut options = SimulationOptions {
        flow_units,
        ..SimulationOptions::default()
    };
    options.end = options.start + TimeDelta::hours(6);
    options
}

fn conduit(offset1: f64, offset2: f64, q0: f64) -> Link {
    Link {
        offset1,
        offset2,
        q0,
        c_loss_inlet: 0.5,
        c_loss_outlet: 1.0,
        c_loss_avg: 0.1,
        surf_area1: 20.0,
        surf_area2: 25.0,
        ..Link::new(LinkType::Conduit)
    }
}

/// Surface forcing applied to every subcatchment of the sample network.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Storm {
    /// Rainfall intensity (ft/s).
    pub rain_rate: f64,
    /// Evaporation rate (ft/s).
    pub evap_rate: f64,
    /// Pervious infiltration capacity (ft/s).
    pub infil_rate: f64,
    /// Snow pack at start (ft).
    pub snow_depth: f64,
    /// Snowmelt rate (ft/s).
    pub melt_rate: f64,
}

impl Storm {
    /// About 0.86 in/hr of rain over a melting half-foot snow pack.
    pub const DESIGN: Storm = Storm {
        rain_rate: 2e-5,
        evap_rate: 1e-7,
        infil_rate: 5e-6,
        snow_depth: 0.5,
        melt_rate: 1e-6,
    };

    fn apply(&self, sc: Subcatchment) -> Subcatchment {
        Subcatchment {
            rain_rate: self.rain_rate,
            evap_rate: self.evap_rate,
            infil_rate: self.infil_rate,
            init_snow_depth: self.snow_depth,
            melt_rate: self.melt_rate,
            ..sc
        }
    }
}

/// Builder for the sample network; add objects or a sink before building.
pub fn sample_builder(options: SimulationOptions) -> ProjectBuilder {
    storm_builder(options, Storm::default())
}

/// Builder for the sample network with `storm` over every subcatchment.
pub fn storm_builder(options: SimulationOptions, storm: Storm) -> ProjectBuilder {
    let storage = Node {
        ponded_area: 500.0,
        init_depth: 2.0,
        ..Node::new(NodeType::Storage, 95.0, 12.0)
    };
    let junction = |invert: f64| Node {
        sur_depth: 1.0,
        ..Node::new(NodeType::Junction, invert, 10.0)
    };
    let orifice = Link {
        opening_time: 900.0,
        ..Link::new(LinkType::Orifice)
    };
    let weir = Link {
        q_limit: 4.0,
        ..Link::new(LinkType::Weir)
    };

    ProjectBuilder::new(options)
        .object(ObjectKind::Gage, "RG1")
        .object(ObjectKind::Pollutant, "TSS")
        .object(ObjectKind::LandUse, "Residential")
        .object(ObjectKind::TimePattern, "Diurnal")
        .object(ObjectKind::Curve, "PumpCurve")
        .object(ObjectKind::TimeSeries, "Rain2yr")
        .node(NODE_IDS[0], junction(100.0))
        .node(NODE_IDS[1], junction(98.0))
        .node(NODE_IDS[2], junction(96.0))
        .node(NODE_IDS[3], storage)
        .node(NODE_IDS[4], Node::new(NodeType::Divider, 94.0, 8.0))
        .node(NODE_IDS[5], Node::new(NodeType::Outfall, 90.0, 0.0))
        .link(LINK_IDS[0], "J1", "J2", conduit(0.0, 0.5, 1.0))
        .link(LINK_IDS[1], "J2", "J3", conduit(0.5, 0.0, 0.0))
        .link(LINK_IDS[2], "J3", "SU1", conduit(0.0, 1.5, 0.0))
        .link(LINK_IDS[3], "SU1", "D1", Link::new(LinkType::Pump))
        .link(LINK_IDS[4], "D1", "OF1", orifice)
        .link(LINK_IDS[5], "D1", "OF1", weir)
        .link(LINK_IDS[6], "D1", "OF1", Link::new(LinkType::Outlet))
        .subcatchment(
            SUBCATCH_IDS[0],
            storm.apply(Subcatchment {
                area: 217_800.0,
                width: 400.0,
                frac_imperv: 0.35,
                slope: 0.01,
                curb_length: 1200.0,
                ..Subcatchment::default()
            }),
            SubcatchOutlet::Node("J1".into()),
        )
        .subcatchment(
            SUBCATCH_IDS[1],
            storm.apply(Subcatchment {
                area: 87_120.0,
                width: 250.0,
                frac_imperv: 0.6,
                slope: 0.02,
                ..Subcatchment::default()
            }),
            SubcatchOutlet::Subcatchment("S1".into()),
        )
        .subcatchment(
            SUBCATCH_IDS[2],
            storm.apply(Subcatchment {
                area: 43_560.0,
                width: 100.0,
                ..Subcatchment::default()
            }),
            SubcatchOutlet::None,
        )
        .ext_inflow("J2", ExtInflow::with_baseline(0.5, 1.0))
}

/// The sample network, built and open.
pub fn sample_network(flow_units: FlowUnits) -> Project {
    sample_builder(sample_options(flow_units))
        .build()
        .expect("sample network builds")
}

/// The sample network under [`Storm::DESIGN`], built and open.
pub fn storm_network(flow_units: FlowUnits) -> Project {
    storm_builder(sample_options(flow_units), Storm::DESIGN)
        .build()
        .expect("storm network builds")
}

/// The sample network with control reporting enabled and every record
/// captured by the returned sink.
pub fn audited_network(flow_units: FlowUnits) -> (Project, crate::RecordingSink) {
    let mut options = sample_options(flow_units);
    options.report.controls = true;
    let sink = crate::RecordingSink::new();
    let project = sample_builder(options)
        .control_sink(Box::new(sink.clone()))
        .build()
        .expect("audited network builds");
    (project, sink)
}
