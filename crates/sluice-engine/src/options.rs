//! Simulation options, validation and error types.
//!
//! [`SimulationOptions`] is the configuration input for a project. Values are
//! in the engine's internal units (feet, seconds). [`validate()`]
//! (SimulationOptions::validate) checks structural invariants before a
//! project is built.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use sluice_core::FlowUnits;
use thiserror::Error;

// ── OptionsError ───────────────────────────────────────────────────

/// Errors detected while loading or validating [`SimulationOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The end date-time is not after the start.
    #[error("end {end} is not after start {start}")]
    EmptyWindow {
        /// Configured start.
        start: NaiveDateTime,
        /// Configured end.
        end: NaiveDateTime,
    },
    /// The report start lies outside `[start, end]`.
    #[error("report start {report_start} is outside the simulation window")]
    ReportStartOutsideWindow {
        /// Configured report start.
        report_start: NaiveDateTime,
    },
    /// A numerical step or tolerance is negative or non-finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidValue {
        /// Option name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The routing step must be strictly positive.
    #[error("routing step must be positive, got {value}")]
    InvalidRouteStep {
        /// The rejected value.
        value: f64,
    },
    /// The options document could not be parsed.
    #[error("options parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ── AnalysisOptions ────────────────────────────────────────────────

/// Analysis toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Allow water to pond above nodes with a ponded area.
    pub allow_ponding: bool,
    /// Skip flow routing during steady-state periods.
    pub skip_steady_state: bool,
    /// Ignore rainfall/runoff.
    pub ignore_rainfall: bool,
    /// Ignore rainfall-dependent infiltration/inflow.
    pub ignore_rdii: bool,
    /// Ignore snowmelt.
    pub ignore_snowmelt: bool,
    /// Ignore groundwater.
    pub ignore_groundwater: bool,
    /// Ignore flow routing.
    pub ignore_routing: bool,
    /// Ignore water quality.
    pub ignore_quality: bool,
}

// ── StepOptions ────────────────────────────────────────────────────

/// Time steps and numerical tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepOptions {
    /// Routing time step (s). Default: 300.
    pub route_step: f64,
    /// Minimum variable routing step (s). Default: 0.5.
    pub min_route_step: f64,
    /// Conduit lengthening step (s). Default: 0.
    pub lengthening_step: f64,
    /// Antecedent dry days. Default: 0.
    pub start_dry_days: f64,
    /// Courant time-step factor. Default: 0.
    pub courant_factor: f64,
    /// Minimum nodal surface area (ft2). Default: 12.566.
    pub min_surf_area: f64,
    /// Minimum conduit slope. Default: 0.
    pub min_slope: f64,
    /// Head convergence tolerance (ft). Default: 0.005.
    pub head_tol: f64,
    /// Steady system flow tolerance. Default: 0.05.
    pub sys_flow_tol: f64,
    /// Steady lateral flow tolerance. Default: 0.05.
    pub lat_flow_tol: f64,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            route_step: 300.0,
            min_route_step: 0.5,
            lengthening_step: 0.0,
            start_dry_days: 0.0,
            courant_factor: 0.0,
            min_surf_area: 12.566,
            min_slope: 0.0,
            head_tol: 0.005,
            sys_flow_tol: 0.05,
            lat_flow_tol: 0.05,
        }
    }
}

impl StepOptions {
    fn named(&self) -> [(&'static str, f64); 10] {
        [
            ("route_step", self.route_step),
            ("min_route_step", self.min_route_step),
            ("lengthening_step", self.lengthening_step),
            ("start_dry_days", self.start_dry_days),
            ("courant_factor", self.courant_factor),
            ("min_surf_area", self.min_surf_area),
            ("min_slope", self.min_slope),
            ("head_tol", self.head_tol),
            ("sys_flow_tol", self.sys_flow_tol),
            ("lat_flow_tol", self.lat_flow_tol),
        ]
    }
}

// ── ReportOptions ──────────────────────────────────────────────────

/// What the report collaborator records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Record every link setting change as a control action.
    pub controls: bool,
}

// ── ContinuityErrors ───────────────────────────────────────────────

/// Percent continuity errors reported by the engine at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContinuityErrors {
    /// Runoff continuity error (%).
    pub runoff: f64,
    /// Groundwater continuity error (%).
    pub groundwater: f64,
    /// Flow routing continuity error (%).
    pub flow: f64,
    /// Quality routing continuity error (%).
    pub quality: f64,
}

// ── SimulationOptions ──────────────────────────────────────────────

/// Project-wide simulation options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Flow units for reporting; fix the display unit system.
    pub flow_units: FlowUnits,
    /// Simulation start.
    pub start: NaiveDateTime,
    /// Simulation end.
    pub end: NaiveDateTime,
    /// Start of result reporting.
    pub report_start: NaiveDateTime,
    /// Analysis toggles.
    pub analysis: AnalysisOptions,
    /// Steps and tolerances.
    pub steps: StepOptions,
    /// Report collaborator options.
    pub report: ReportOptions,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self {
            flow_units: FlowUnits::Cfs,
            start,
            end: start + TimeDelta::days(1),
            report_start: start,
            analysis: AnalysisOptions::default(),
            steps: StepOptions::default(),
            report: ReportOptions::default(),
        }
    }
}

impl SimulationOptions {
    /// Parse options from a JSON document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.end <= self.start {
            return Err(OptionsError::EmptyWindow {
                start: self.start,
                end: self.end,
            });
        }
        if self.report_start < self.start || self.report_start > self.end {
            return Err(OptionsError::ReportStartOutsideWindow {
                report_start: self.report_start,
            });
        }
        if !(self.steps.route_step.is_finite() && self.steps.route_step > 0.0) {
            return Err(OptionsError::InvalidRouteStep {
                value: self.steps.route_step,
            });
        }
        for (name, value) in self.steps.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::InvalidValue { name, value });
            }
        }
        Ok(())
    }

    /// Length of the simulation window in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let o = SimulationOptions::default();
        o.validate().unwrap();
        assert_eq!(o.duration_ms(), 86_400_000.0);
        assert_eq!(o.steps.route_step, 300.0);
    }

    #[test]
    fn empty_window_rejected() {
        let mut o = SimulationOptions::default();
        o.end = o.start;
        assert!(matches!(o.validate(), Err(OptionsError::EmptyWindow { .. })));
    }

    #[test]
    fn report_start_must_be_in_window() {
        let mut o = SimulationOptions::default();
        o.report_start = o.end + TimeDelta::hours(1);
        assert!(matches!(
            o.validate(),
            Err(OptionsError::ReportStartOutsideWindow { .. })
        ));
    }

    #[test]
    fn zero_route_step_rejected() {
        let mut o = SimulationOptions::default();
        o.steps.route_step = 0.0;
        assert!(matches!(
            o.validate(),
            Err(OptionsError::InvalidRouteStep { .. })
        ));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let mut o = SimulationOptions::default();
        o.steps.head_tol = -1.0;
        match o.validate() {
            Err(OptionsError::InvalidValue { name, .. }) => assert_eq!(name, "head_tol"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_fills_defaults() {
        let o = SimulationOptions::from_json_str(
            r#"{
                "flow_units": "LPS",
                "start": "2020-03-01T06:00:00",
                "end": "2020-03-02T06:00:00",
                "report_start": "2020-03-01T06:00:00",
                "analysis": { "allow_ponding": true },
                "steps": { "route_step": 30.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(o.flow_units, FlowUnits::Lps);
        assert!(o.analysis.allow_ponding);
        assert!(!o.analysis.ignore_quality);
        assert_eq!(o.steps.route_step, 30.0);
        assert_eq!(o.steps.min_route_step, 0.5);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            SimulationOptions::from_json_str("{ not json"),
            Err(OptionsError::Parse(_))
        ));
    }
}
