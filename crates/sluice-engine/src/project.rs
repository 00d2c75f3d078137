//! The engine-side project: object arenas, lifecycle and stepping loop.
//!
//! # Ownership model
//!
//! `Project` owns every live object. Callers get shared slices for reads and
//! narrow mutators for the two kinds of override (link target settings and
//! node inflow records); nothing else is exposed mutably. All methods take
//! `&self` or `&mut self`, so a project is driven from one logical thread
//! and the borrow checker keeps reads and steps from overlapping.

use chrono::NaiveDateTime;
use sluice_core::{Lifecycle, NodeType, ObjectKind, Phase, UnitTable};
use thiserror::Error;

use crate::inflow::ExtInflow;
use crate::objects::{Link, Node, Subcatchment};
use crate::options::{ContinuityErrors, SimulationOptions};
use crate::registry::ObjectRegistry;
use crate::report::Report;

/// Illegal lifecycle transitions.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// No object graph exists.
    #[error("project is not open")]
    NotOpen,
    /// The stepping loop is already running.
    #[error("simulation already started")]
    AlreadyStarted,
    /// The stepping loop is not running.
    #[error("simulation not started")]
    NotStarted,
}

/// Running volume totals for the flow continuity check (ft3).
#[derive(Clone, Copy, Debug, Default)]
struct MassBalance {
    initial_storage: f64,
    inflow: f64,
    outflow: f64,
}

/// A network project and the engine state around it.
#[derive(Debug)]
pub struct Project {
    phase: Phase,
    options: SimulationOptions,
    units: UnitTable,
    registry: ObjectRegistry,
    nodes: Vec<Node>,
    links: Vec<Link>,
    subcatchments: Vec<Subcatchment>,
    report: Report,
    /// Routing clock: milliseconds since the start date.
    routing_ms: f64,
    balance: MassBalance,
    continuity: ContinuityErrors,
}

impl Project {
    pub(crate) fn from_parts(
        options: SimulationOptions,
        registry: ObjectRegistry,
        nodes: Vec<Node>,
        links: Vec<Link>,
        subcatchments: Vec<Subcatchment>,
        report: Report,
    ) -> Self {
        let units = UnitTable::new(options.flow_units);
        Self {
            phase: Phase::Open,
            options,
            units,
            registry,
            nodes,
            links,
            subcatchments,
            report,
            routing_ms: 0.0,
            balance: MassBalance::default(),
            continuity: ContinuityErrors::default(),
        }
    }

    // ── Read access ─────────────────────────────────────────────

    /// Simulation options.
    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Conversion factors for the configured flow units.
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Identifier tables for every kind.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Number of objects of `kind`.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.registry.count(kind)
    }

    /// All nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All subcatchments.
    pub fn subcatchments(&self) -> &[Subcatchment] {
        &self.subcatchments
    }

    /// Continuity errors from the last completed run.
    pub fn continuity(&self) -> &ContinuityErrors {
        &self.continuity
    }

    /// Milliseconds of simulated time elapsed since the start date.
    pub fn routing_time_ms(&self) -> f64 {
        self.routing_ms
    }

    /// Calendar time of the routing clock.
    pub fn current_datetime(&self) -> NaiveDateTime {
        sluice_core::time::offset(self.options.start, self.routing_ms)
    }

    /// The report collaborator.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Mutable access to the report collaborator.
    pub fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    // ── Override hooks ──────────────────────────────────────────

    /// Mutable access to one link's commanded setting.
    pub fn target_setting_mut(&mut self, index: usize) -> Option<&mut f64> {
        self.links.get_mut(index).map(|l| &mut l.target_setting)
    }

    /// Move a link's setting toward its target.
    ///
    /// With `tstep == 0` the target is applied at once. With a positive
    /// step, orifices and weirs that have an opening time move at
    /// `1 / opening_time` per second; everything else snaps to the target.
    pub fn apply_link_setting(&mut self, index: usize, tstep: f64) {
        let Some(link) = self.links.get_mut(index) else {
            return;
        };
        if tstep <= 0.0 || !link.is_gradual() {
            link.setting = link.target_setting;
            return;
        }
        let delta = link.target_setting - link.setting;
        let max_move = tstep / link.opening_time;
        link.setting += delta.clamp(-max_move, max_move);
    }

    /// The node's external inflow record, created with the canonical
    /// direct-flow configuration if the node has none.
    pub fn ensure_ext_inflow(&mut self, index: usize) -> Option<&mut ExtInflow> {
        let node = self.nodes.get_mut(index)?;
        if node.ext_inflow.is_none() {
            tracing::debug!(node = index, "attaching external inflow record");
        }
        Some(node.ext_inflow.get_or_insert_with(ExtInflow::direct_flow))
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Start the stepping loop and initialise dynamic state.
    ///
    /// Allowed from `Open` and from `Ended` (a fresh run).
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Closed => return Err(LifecycleError::NotOpen),
            Phase::Started => return Err(LifecycleError::AlreadyStarted),
            Phase::Open | Phase::Ended => {}
        }
        let min_area = self.options.steps.min_surf_area;
        let mut storage = 0.0;
        for node in &mut self.nodes {
            let area = surface_area(node, min_area);
            node.new_depth = node.init_depth;
            node.new_volume = node.init_depth * area;
            node.inflow = 0.0;
            node.outflow = 0.0;
            node.losses = 0.0;
            node.overflow = 0.0;
            node.new_lat_flow = 0.0;
            storage += node.new_volume;
        }
        for link in &mut self.links {
            link.new_flow = link.q0;
            link.new_depth = 0.0;
            link.new_volume = 0.0;
            link.froude = 0.0;
            link.setting = link.init_setting;
            link.target_setting = link.init_setting;
        }
        for sc in &mut self.subcatchments {
            sc.rainfall = 0.0;
            sc.evap_loss = 0.0;
            sc.infil_loss = 0.0;
            sc.runon = 0.0;
            sc.new_runoff = 0.0;
            sc.new_snow_depth = sc.init_snow_depth;
        }
        self.routing_ms = 0.0;
        self.balance = MassBalance {
            initial_storage: storage,
            ..MassBalance::default()
        };
        self.continuity = ContinuityErrors::default();
        self.phase = Phase::Started;
        tracing::info!(start = %self.options.start, "simulation started");
        Ok(())
    }

    /// Advance one routing step.
    ///
    /// Returns the elapsed simulation time in days, or `0.0` once the end
    /// date has been reached (the clock no longer advances).
    pub fn step(&mut self) -> Result<f64, LifecycleError> {
        if self.phase != Phase::Started {
            return Err(LifecycleError::NotStarted);
        }
        let remaining_ms = self.options.duration_ms() - self.routing_ms;
        if remaining_ms <= 0.0 {
            return Ok(0.0);
        }
        let dt = self.options.steps.route_step.min(remaining_ms / 1000.0);

        for i in 0..self.links.len() {
            self.apply_link_setting(i, dt);
        }
        self.runoff(dt);
        self.route(dt);

        self.routing_ms += dt * 1000.0;
        Ok(self.routing_ms / 86_400_000.0)
    }

    /// Stop the stepping loop and compute continuity errors.
    pub fn end(&mut self) -> Result<(), LifecycleError> {
        if self.phase != Phase::Started {
            return Err(LifecycleError::NotStarted);
        }
        let final_storage: f64 = self.nodes.iter().map(|n| n.new_volume).sum();
        let b = self.balance;
        let total_in = b.initial_storage + b.inflow;
        if total_in > 0.0 {
            let total_out = b.outflow + final_storage;
            self.continuity.flow = 100.0 * (1.0 - total_out / total_in);
        }
        self.phase = Phase::Ended;
        tracing::info!(
            elapsed_ms = self.routing_ms,
            flow_error = self.continuity.flow,
            "simulation ended"
        );
        Ok(())
    }

    /// Close the project, dropping every object.
    pub fn close(&mut self) {
        self.registry.clear();
        self.nodes.clear();
        self.links.clear();
        self.subcatchments.clear();
        self.routing_ms = 0.0;
        self.phase = Phase::Closed;
        tracing::info!("project closed");
    }

    // ── Reference routing ───────────────────────────────────────

    /// Lumped surface runoff for one step.
    ///
    /// Runon is the previous step's runoff of subcatchments that drain onto
    /// this one. Rain plus snowmelt feeds evaporation first, then
    /// infiltration over the pervious fraction; the excess over the whole
    /// area leaves as runoff.
    fn runoff(&mut self, dt: f64) {
        let mut runon = vec![0.0; self.subcatchments.len()];
        for sc in &self.subcatchments {
            if let (None, Some(target)) = (sc.out_node, sc.out_subcatch) {
                runon[target] += sc.new_runoff;
            }
        }

        let a = &self.options.analysis;
        for (sc, runon) in self.subcatchments.iter_mut().zip(runon) {
            sc.runon = runon;
            sc.rainfall = if a.ignore_rainfall { 0.0 } else { sc.rain_rate };
            let melt = if a.ignore_snowmelt {
                0.0
            } else {
                sc.melt_rate.min(sc.new_snow_depth / dt)
            };
            sc.new_snow_depth = (sc.new_snow_depth - melt * dt).max(0.0);

            let supply = sc.rainfall + melt;
            sc.evap_loss = sc.evap_rate.min(supply);
            let pervious = 1.0 - sc.frac_imperv;
            sc.infil_loss = sc.infil_rate.min(supply - sc.evap_loss) * pervious;
            let excess = (supply - sc.evap_loss - sc.infil_loss).max(0.0);
            sc.new_runoff = excess * sc.area + sc.runon;
        }
    }

    fn route(&mut self, dt: f64) {
        let n = self.nodes.len();

        let mut lateral = vec![0.0; n];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(inflow) = &node.ext_inflow {
                lateral[i] += inflow.value();
            }
        }
        for sc in &self.subcatchments {
            if let Some(j) = sc.out_node {
                lateral[j] += sc.new_runoff;
            }
        }

        let mut out_degree = vec![0usize; n];
        for link in &self.links {
            out_degree[link.flow_ends().0] += 1;
        }

        let mut inflow = lateral.clone();
        let mut outflow = vec![0.0; n];
        for link in &mut self.links {
            let (up, down) = link.flow_ends();
            let share = self.nodes[up].inflow / out_degree[up] as f64;
            let mut q = (share * link.setting).max(0.0);
            if link.q_limit > 0.0 {
                q = q.min(link.q_limit);
            }
            link.new_flow = q * f64::from(link.direction.signum());
            link.new_depth = 0.5 * (self.nodes[up].new_depth + self.nodes[down].new_depth);
            inflow[down] += q;
            outflow[up] += q;
        }

        let min_area = self.options.steps.min_surf_area;
        let allow_ponding = self.options.analysis.allow_ponding;
        let mut lateral_volume = 0.0;
        let mut exit_volume = 0.0;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.node_type == NodeType::Outfall {
                outflow[i] = inflow[i];
                exit_volume += inflow[i] * dt;
            }
            node.new_lat_flow = lateral[i];
            node.inflow = inflow[i];
            node.outflow = outflow[i];
            lateral_volume += lateral[i] * dt;

            let area = surface_area(node, min_area);
            let mut volume =
                (node.new_volume + (node.inflow - node.outflow - node.losses) * dt).max(0.0);
            let can_pond = allow_ponding && node.ponded_area > 0.0;
            let full_volume = (node.full_depth + node.sur_depth) * area;
            node.overflow = 0.0;
            if node.node_type != NodeType::Outfall && !can_pond && volume > full_volume {
                node.overflow = (volume - full_volume) / dt;
                exit_volume += volume - full_volume;
                volume = full_volume;
            }
            node.new_volume = volume;
            node.new_depth = volume / area;
        }
        self.balance.inflow += lateral_volume;
        self.balance.outflow += exit_volume;
    }
}

fn surface_area(node: &Node, min_area: f64) -> f64 {
    node.ponded_area.max(min_area).max(f64::EPSILON)
}

impl Lifecycle for Project {
    fn phase(&self) -> Phase {
        self.phase
    }
}
