//! Parameter and result dispatch tables.
//!
//! Each table maps a dense integer code to an accessor and the unit
//! conversion applied at the read boundary. Adding or removing an attribute
//! is a change to a table row; lookup is a bounds-checked slice index.
//!
//! Static parameters are readable once the project is open. Dynamic results
//! are only defined while the simulation is running.

use sluice_core::{Conversion, ObjectKind, Quantity, ToolkitError};
use sluice_engine::{Link, Node, Project, Subcatchment};

use crate::catalog;
use crate::guard::{require_open, require_started};

/// One readable attribute of an object.
pub struct Attribute<T> {
    /// Attribute name, for diagnostics.
    pub name: &'static str,
    /// Reads the internal value.
    pub read: fn(&T) -> f64,
    /// Conversion to display units.
    pub conversion: Conversion,
}

const LENGTH: Conversion = Conversion::Linear(Quantity::Length);
const AREA: Conversion = Conversion::Squared(Quantity::Length);
const FLOW: Conversion = Conversion::Linear(Quantity::Flow);
const VOLUME: Conversion = Conversion::Linear(Quantity::Volume);
const RAW: Conversion = Conversion::None;

// ── Codes ──────────────────────────────────────────────────────────

/// Node static parameter codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeParam {
    /// Invert elevation (length).
    InvertElev = 0,
    /// Full depth (length).
    FullDepth = 1,
    /// Surcharge depth (length).
    SurDepth = 2,
    /// Ponded area (area).
    PondedArea = 3,
    /// Initial depth (length).
    InitDepth = 4,
}

/// Node dynamic result codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeResult {
    /// Total inflow (flow).
    Inflow = 0,
    /// Total outflow (flow).
    Outflow = 1,
    /// Evaporation and seepage losses (flow).
    Losses = 2,
    /// Stored volume (volume).
    Volume = 3,
    /// Flooding overflow (flow).
    Overflow = 4,
    /// Water depth (length).
    Depth = 5,
    /// Hydraulic head: depth plus invert elevation (length).
    Head = 6,
    /// Lateral inflow (flow).
    LateralInflow = 7,
}

/// Link static parameter codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkParam {
    /// Upstream offset (length).
    Offset1 = 0,
    /// Downstream offset (length).
    Offset2 = 1,
    /// Initial flow (flow).
    InitFlow = 2,
    /// Flow limit (flow).
    FlowLimit = 3,
    /// Inlet loss coefficient.
    InletLoss = 4,
    /// Outlet loss coefficient.
    OutletLoss = 5,
    /// Average loss coefficient.
    AverageLoss = 6,
}

/// Link dynamic result codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkResult {
    /// Flow (flow).
    Flow = 0,
    /// Depth (length).
    Depth = 1,
    /// Volume (volume).
    Volume = 2,
    /// Upstream surface area (area).
    UpstreamArea = 3,
    /// Downstream surface area (area).
    DownstreamArea = 4,
    /// Current setting.
    Setting = 5,
    /// Target setting.
    TargetSetting = 6,
    /// Froude number.
    Froude = 7,
}

/// Subcatchment static parameter codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubcatchParam {
    /// Width (length).
    Width = 0,
    /// Area (land area).
    Area = 1,
    /// Impervious fraction.
    FracImperv = 2,
    /// Slope.
    Slope = 3,
    /// Curb length (length).
    CurbLength = 4,
}

/// Subcatchment dynamic result codes.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubcatchResult {
    /// Rainfall rate.
    Rainfall = 0,
    /// Evaporation loss rate.
    EvapLoss = 1,
    /// Infiltration loss rate.
    InfilLoss = 2,
    /// Runon (flow).
    Runon = 3,
    /// Runoff (flow).
    Runoff = 4,
    /// Snow depth.
    SnowDepth = 5,
}

macro_rules! impl_code {
    ($($t:ty),*) => {
        $(impl $t {
            /// The ABI code.
            pub fn code(self) -> i32 {
                self as i32
            }
        })*
    };
}

impl_code!(NodeParam, NodeResult, LinkParam, LinkResult, SubcatchParam, SubcatchResult);

// ── Tables ─────────────────────────────────────────────────────────

/// Node static parameters, indexed by [`NodeParam`] code.
pub static NODE_PARAMS: [Attribute<Node>; 5] = [
    Attribute { name: "invertElev", read: |n: &Node| n.invert_elev, conversion: LENGTH },
    Attribute { name: "fullDepth", read: |n: &Node| n.full_depth, conversion: LENGTH },
    Attribute { name: "surDepth", read: |n: &Node| n.sur_depth, conversion: LENGTH },
    Attribute { name: "pondedArea", read: |n: &Node| n.ponded_area, conversion: AREA },
    Attribute { name: "initDepth", read: |n: &Node| n.init_depth, conversion: LENGTH },
];

/// Node dynamic results, indexed by [`NodeResult`] code.
pub static NODE_RESULTS: [Attribute<Node>; 8] = [
    Attribute { name: "inflow", read: |n: &Node| n.inflow, conversion: FLOW },
    Attribute { name: "outflow", read: |n: &Node| n.outflow, conversion: FLOW },
    Attribute { name: "losses", read: |n: &Node| n.losses, conversion: FLOW },
    Attribute { name: "newVolume", read: |n: &Node| n.new_volume, conversion: VOLUME },
    Attribute { name: "overflow", read: |n: &Node| n.overflow, conversion: FLOW },
    Attribute { name: "newDepth", read: |n: &Node| n.new_depth, conversion: LENGTH },
    Attribute {
        name: "head",
        read: |n: &Node| n.new_depth + n.invert_elev,
        conversion: LENGTH,
    },
    Attribute { name: "newLatFlow", read: |n: &Node| n.new_lat_flow, conversion: FLOW },
];

/// Link static parameters, indexed by [`LinkParam`] code.
pub static LINK_PARAMS: [Attribute<Link>; 7] = [
    Attribute { name: "offset1", read: |l: &Link| l.offset1, conversion: LENGTH },
    Attribute { name: "offset2", read: |l: &Link| l.offset2, conversion: LENGTH },
    Attribute { name: "q0", read: |l: &Link| l.q0, conversion: FLOW },
    Attribute { name: "qLimit", read: |l: &Link| l.q_limit, conversion: FLOW },
    Attribute { name: "cLossInlet", read: |l: &Link| l.c_loss_inlet, conversion: RAW },
    Attribute { name: "cLossOutlet", read: |l: &Link| l.c_loss_outlet, conversion: RAW },
    Attribute { name: "cLossAvg", read: |l: &Link| l.c_loss_avg, conversion: RAW },
];

/// Link dynamic results, indexed by [`LinkResult`] code.
pub static LINK_RESULTS: [Attribute<Link>; 8] = [
    Attribute { name: "newFlow", read: |l: &Link| l.new_flow, conversion: FLOW },
    Attribute { name: "newDepth", read: |l: &Link| l.new_depth, conversion: LENGTH },
    Attribute { name: "newVolume", read: |l: &Link| l.new_volume, conversion: VOLUME },
    Attribute { name: "surfArea1", read: |l: &Link| l.surf_area1, conversion: AREA },
    Attribute { name: "surfArea2", read: |l: &Link| l.surf_area2, conversion: AREA },
    Attribute { name: "setting", read: |l: &Link| l.setting, conversion: RAW },
    Attribute { name: "targetSetting", read: |l: &Link| l.target_setting, conversion: RAW },
    Attribute { name: "froude", read: |l: &Link| l.froude, conversion: RAW },
];

/// Subcatchment static parameters, indexed by [`SubcatchParam`] code.
pub static SUBCATCH_PARAMS: [Attribute<Subcatchment>; 5] = [
    Attribute { name: "width", read: |s: &Subcatchment| s.width, conversion: LENGTH },
    Attribute {
        name: "area",
        read: |s: &Subcatchment| s.area,
        conversion: Conversion::Linear(Quantity::LandArea),
    },
    Attribute { name: "fracImperv", read: |s: &Subcatchment| s.frac_imperv, conversion: RAW },
    Attribute { name: "slope", read: |s: &Subcatchment| s.slope, conversion: RAW },
    Attribute { name: "curbLength", read: |s: &Subcatchment| s.curb_length, conversion: LENGTH },
];

/// Subcatchment dynamic results, indexed by [`SubcatchResult`] code.
pub static SUBCATCH_RESULTS: [Attribute<Subcatchment>; 6] = [
    Attribute {
        name: "rainfall",
        read: |s: &Subcatchment| s.rainfall,
        conversion: Conversion::Linear(Quantity::Rainfall),
    },
    Attribute {
        name: "evapLoss",
        read: |s: &Subcatchment| s.evap_loss,
        conversion: Conversion::Linear(Quantity::EvapRate),
    },
    Attribute {
        name: "infilLoss",
        read: |s: &Subcatchment| s.infil_loss,
        conversion: Conversion::Linear(Quantity::Rainfall),
    },
    Attribute { name: "runon", read: |s: &Subcatchment| s.runon, conversion: FLOW },
    Attribute { name: "newRunoff", read: |s: &Subcatchment| s.new_runoff, conversion: FLOW },
    Attribute {
        name: "newSnowDepth",
        read: |s: &Subcatchment| s.new_snow_depth,
        conversion: Conversion::Linear(Quantity::RainDepth),
    },
];

// ── Lookup ─────────────────────────────────────────────────────────

fn read<T>(
    project: &Project,
    object: &T,
    kind: ObjectKind,
    table: &[Attribute<T>],
    code: i32,
) -> Result<f64, ToolkitError> {
    let attr = usize::try_from(code)
        .ok()
        .and_then(|i| table.get(i))
        .ok_or_else(|| {
            tracing::trace!(%kind, code, "rejected: unknown parameter code");
            ToolkitError::UnknownParameter { kind, code }
        })?;
    Ok(project
        .units()
        .to_display((attr.read)(object), attr.conversion))
}

/// Static parameter `code` of node `index`, in display units.
pub fn node_param(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_open(project)?;
    let node = catalog::node(project, index)?;
    read(project, node, ObjectKind::Node, &NODE_PARAMS, code)
}

/// Static parameter `code` of link `index`, in display units.
pub fn link_param(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_open(project)?;
    let link = catalog::link(project, index)?;
    read(project, link, ObjectKind::Link, &LINK_PARAMS, code)
}

/// Static parameter `code` of subcatchment `index`, in display units.
pub fn subcatch_param(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_open(project)?;
    let sc = catalog::subcatchment(project, index)?;
    read(project, sc, ObjectKind::Subcatchment, &SUBCATCH_PARAMS, code)
}

/// Dynamic result `code` of node `index`, in display units.
pub fn node_result(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_started(project)?;
    let node = catalog::node(project, index)?;
    read(project, node, ObjectKind::Node, &NODE_RESULTS, code)
}

/// Dynamic result `code` of link `index`, in display units.
pub fn link_result(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_started(project)?;
    let link = catalog::link(project, index)?;
    read(project, link, ObjectKind::Link, &LINK_RESULTS, code)
}

/// Dynamic result `code` of subcatchment `index`, in display units.
pub fn subcatch_result(project: &Project, index: i32, code: i32) -> Result<f64, ToolkitError> {
    require_started(project)?;
    let sc = catalog::subcatchment(project, index)?;
    read(project, sc, ObjectKind::Subcatchment, &SUBCATCH_RESULTS, code)
}

/// Static parameter lookup by `(kind, index, code)`.
///
/// Kinds other than node, link and subcatchment have no parameter table.
pub fn object_param(
    project: &Project,
    kind: i32,
    index: i32,
    code: i32,
) -> Result<f64, ToolkitError> {
    require_open(project)?;
    match ObjectKind::from_code(kind)? {
        ObjectKind::Node => node_param(project, index, code),
        ObjectKind::Link => link_param(project, index, code),
        ObjectKind::Subcatchment => subcatch_param(project, index, code),
        _ => Err(ToolkitError::UnknownKind { code: kind }),
    }
}

/// Dynamic result lookup by `(kind, index, code)`.
pub fn object_result(
    project: &Project,
    kind: i32,
    index: i32,
    code: i32,
) -> Result<f64, ToolkitError> {
    require_started(project)?;
    match ObjectKind::from_code(kind)? {
        ObjectKind::Node => node_result(project, index, code),
        ObjectKind::Link => link_result(project, index, code),
        ObjectKind::Subcatchment => subcatch_result(project, index, code),
        _ => Err(ToolkitError::UnknownKind { code: kind }),
    }
}
