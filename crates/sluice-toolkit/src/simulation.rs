//! Simulation-window metadata: dates, units, analysis toggles and numerical
//! parameters.
//!
//! Everything here except [`current_datetime`] is configuration and needs
//! only an open project. Values are returned raw, without unit conversion.

use chrono::NaiveDateTime;
use sluice_core::ToolkitError;
use sluice_engine::Project;

use crate::guard::{require_open, require_started};

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $query:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code,)*
        }

        impl $name {
            /// Every variant, ordered by code.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Decode an ABI code.
            pub fn from_code(code: i32) -> Result<Self, ToolkitError> {
                usize::try_from(code)
                    .ok()
                    .and_then(|i| Self::ALL.get(i).copied())
                    .ok_or(ToolkitError::UnknownSimulationCode { query: $query, code })
            }

            /// The ABI code.
            pub fn code(self) -> i32 {
                self as i32
            }
        }
    };
}

code_enum! {
    /// Which simulation date-time to read.
    SimulationDate, "simulation date" {
        /// Simulation start.
        Start = 0,
        /// Simulation end.
        End = 1,
        /// Start of reporting.
        ReportStart = 2,
    }
}

code_enum! {
    /// Which unit setting to read.
    SimulationUnit, "simulation unit" {
        /// Unit system code.
        System = 0,
        /// Flow units code.
        FlowUnits = 1,
    }
}

code_enum! {
    /// Analysis toggles.
    AnalysisSetting, "analysis setting" {
        /// Ponding allowed above nodes.
        AllowPonding = 0,
        /// Steady-state periods skipped.
        SkipSteadyState = 1,
        /// Rainfall ignored.
        IgnoreRainfall = 2,
        /// RDII ignored.
        IgnoreRdii = 3,
        /// Snowmelt ignored.
        IgnoreSnowmelt = 4,
        /// Groundwater ignored.
        IgnoreGroundwater = 5,
        /// Flow routing ignored.
        IgnoreRouting = 6,
        /// Water quality ignored.
        IgnoreQuality = 7,
    }
}

code_enum! {
    /// Numerical parameters and continuity errors.
    SimulationParam, "simulation parameter" {
        /// Routing step (s).
        RouteStep = 0,
        /// Minimum variable routing step (s).
        MinRouteStep = 1,
        /// Lengthening step (s).
        LengtheningStep = 2,
        /// Antecedent dry days.
        StartDryDays = 3,
        /// Courant factor.
        CourantFactor = 4,
        /// Minimum nodal surface area.
        MinSurfArea = 5,
        /// Minimum conduit slope.
        MinSlope = 6,
        /// Runoff continuity error (%).
        RunoffError = 7,
        /// Groundwater continuity error (%).
        GroundwaterError = 8,
        /// Flow routing continuity error (%).
        FlowError = 9,
        /// Quality routing continuity error (%).
        QualityError = 10,
        /// Head tolerance.
        HeadTol = 11,
        /// Steady system flow tolerance.
        SysFlowTol = 12,
        /// Steady lateral flow tolerance.
        LatFlowTol = 13,
    }
}

/// Configured start, end or report-start date-time.
pub fn simulation_datetime(project: &Project, which: i32) -> Result<NaiveDateTime, ToolkitError> {
    require_open(project)?;
    let o = project.options();
    Ok(match SimulationDate::from_code(which)? {
        SimulationDate::Start => o.start,
        SimulationDate::End => o.end,
        SimulationDate::ReportStart => o.report_start,
    })
}

/// Unit system or flow units code.
pub fn simulation_unit(project: &Project, which: i32) -> Result<i32, ToolkitError> {
    require_open(project)?;
    let units = project.units();
    Ok(match SimulationUnit::from_code(which)? {
        SimulationUnit::System => units.unit_system().code(),
        SimulationUnit::FlowUnits => units.flow_units().code(),
    })
}

/// One analysis toggle.
pub fn analysis_setting(project: &Project, which: i32) -> Result<bool, ToolkitError> {
    require_open(project)?;
    let a = &project.options().analysis;
    Ok(match AnalysisSetting::from_code(which)? {
        AnalysisSetting::AllowPonding => a.allow_ponding,
        AnalysisSetting::SkipSteadyState => a.skip_steady_state,
        AnalysisSetting::IgnoreRainfall => a.ignore_rainfall,
        AnalysisSetting::IgnoreRdii => a.ignore_rdii,
        AnalysisSetting::IgnoreSnowmelt => a.ignore_snowmelt,
        AnalysisSetting::IgnoreGroundwater => a.ignore_groundwater,
        AnalysisSetting::IgnoreRouting => a.ignore_routing,
        AnalysisSetting::IgnoreQuality => a.ignore_quality,
    })
}

/// One numerical parameter or continuity error.
///
/// Continuity errors are zero until a run has ended.
pub fn simulation_param(project: &Project, which: i32) -> Result<f64, ToolkitError> {
    require_open(project)?;
    let s = &project.options().steps;
    let c = project.continuity();
    Ok(match SimulationParam::from_code(which)? {
        SimulationParam::RouteStep => s.route_step,
        SimulationParam::MinRouteStep => s.min_route_step,
        SimulationParam::LengtheningStep => s.lengthening_step,
        SimulationParam::StartDryDays => s.start_dry_days,
        SimulationParam::CourantFactor => s.courant_factor,
        SimulationParam::MinSurfArea => s.min_surf_area,
        SimulationParam::MinSlope => s.min_slope,
        SimulationParam::RunoffError => c.runoff,
        SimulationParam::GroundwaterError => c.groundwater,
        SimulationParam::FlowError => c.flow,
        SimulationParam::QualityError => c.quality,
        SimulationParam::HeadTol => s.head_tol,
        SimulationParam::SysFlowTol => s.sys_flow_tol,
        SimulationParam::LatFlowTol => s.lat_flow_tol,
    })
}

/// Calendar time of the routing clock.
pub fn current_datetime(project: &Project) -> Result<NaiveDateTime, ToolkitError> {
    require_started(project)?;
    Ok(project.current_datetime())
}
