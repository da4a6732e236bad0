//! The tick-driven layout loop
//!
//! A [`Simulation`] owns the node set and every component that acts on it.
//! The host drives it: it loads records once, then calls [`Simulation::tick`]
//! at whatever rate it renders. Each tick runs
//!
//! 1. cool alpha
//! 2. force pass (attraction + repulsion) into velocities
//! 3. collision relaxation on the tentative positions
//! 4. commit positions
//!
//! and returns a [`TickEvent`] with the committed positions and fresh halos.
//! Nothing here blocks, spawns or keeps time.

use crate::cluster::ClusterAnchors;
use crate::collisions::CollisionResolver;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::event::{HaloFrame, NodeFrame, ProbeReport, TickEvent};
use crate::forces::{CompositeForce, ForceModel};
use crate::halo::HaloCalculator;
use crate::integrator::{commit, Cooling, DampedVelocity, Integrator};
use crate::node::GameRecord;
use crate::probe::{Direction, Probe};
use crate::registry::{IngestReport, NodeRegistry};
use crate::state::{SimulationState, Status};
use tracing::{debug, info, trace};

/// A clustered force-directed layout
///
/// # Examples
///
/// ```
/// use spacechart::cluster::ClusterAnchors;
/// use spacechart::config::LayoutConfig;
/// use spacechart::node::GameRecord;
/// use spacechart::simulation::Simulation;
/// use spacechart::state::Status;
///
/// let mut sim = Simulation::new(ClusterAnchors::steam_genres(), LayoutConfig::default()).unwrap();
/// assert_eq!(sim.status(), Status::Idle);
/// assert!(sim.tick().is_none());
///
/// let report = sim
///     .load(vec![
///         GameRecord::new("Counter-Strike 2", "Action", 900_000.0, 88.0),
///         GameRecord::new("Cities: Skylines", "Simulation", 12_000.0, 93.0),
///     ])
///     .unwrap();
/// assert_eq!(report.accepted, 2);
///
/// let event = sim.tick().unwrap();
/// assert_eq!(event.tick, 1);
/// assert_eq!(event.nodes.len(), 2);
/// assert_eq!(event.clusters.len(), 7);
/// ```
pub struct Simulation {
    anchors: ClusterAnchors,
    config: LayoutConfig,
    forces: CompositeForce,
    integrator: DampedVelocity,
    collisions: CollisionResolver,
    halo: HaloCalculator,
    probe: Probe,
    state: SimulationState,
}

impl Simulation {
    /// An idle engine over a fixed cluster mapping
    ///
    /// Fails on an invalid config; the anchors were validated when built.
    pub fn new(anchors: ClusterAnchors, config: LayoutConfig) -> Result<Self> {
        config.validate()?;

        let registry = NodeRegistry::empty(&anchors, &config.scales);
        let state = SimulationState::new(registry, Cooling::from_config(&config.integration));

        debug!(
            clusters = anchors.len(),
            repulsion = ?config.forces.repulsion_method,
            "simulation created"
        );

        Ok(Self {
            forces: CompositeForce::from_config(&config.forces, &anchors),
            integrator: DampedVelocity::from_config(&config.integration),
            collisions: CollisionResolver::from_config(&config.collision),
            halo: HaloCalculator::from_config(&config.halo),
            probe: Probe::from_config(&config.probe, &config.viewport),
            anchors,
            config,
            state,
        })
    }

    /// Create and load in one step
    pub fn with_records<I>(
        anchors: ClusterAnchors,
        config: LayoutConfig,
        records: I,
    ) -> Result<(Self, IngestReport)>
    where
        I: IntoIterator<Item = GameRecord>,
    {
        let mut sim = Self::new(anchors, config)?;
        let report = sim.load(records)?;
        Ok((sim, report))
    }

    /// Build the node set and start running
    ///
    /// Allowed once, from `Idle`. An empty record set is valid: the engine
    /// runs with no nodes and reports fallback halos.
    pub fn load<I>(&mut self, records: I) -> Result<IngestReport>
    where
        I: IntoIterator<Item = GameRecord>,
    {
        match self.state.status {
            Status::Idle => {}
            Status::Stopped => return Err(LayoutError::Stopped),
            Status::Running | Status::Paused => return Err(LayoutError::AlreadyLoaded),
        }

        let (registry, report) = NodeRegistry::from_records(
            &self.anchors,
            records,
            &self.config.scales,
            &self.config.placement,
        );
        self.state.registry = registry;
        self.state.tick = 0;
        self.state.cooling.reheat();
        self.transition(Status::Running);

        Ok(report)
    }

    /// Advance by one tick
    ///
    /// Returns `None` unless running; a paused or stopped engine simply
    /// does not move.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if !self.state.status.is_running() {
            trace!(status = ?self.state.status, "tick ignored");
            return None;
        }

        let alpha = self.state.cooling.step();
        let deltas = self.forces.velocity_deltas(&self.state.registry);
        let radii = self.state.registry.radii();

        let mut tentative = self
            .integrator
            .step(self.state.registry.nodes_mut(), &deltas, alpha);
        let overlaps = self.collisions.relax(&mut tentative, &radii);
        commit(self.state.registry.nodes_mut(), &tentative);

        self.state.tick += 1;
        trace!(tick = self.state.tick, alpha, overlaps, "tick");

        Some(self.snapshot())
    }

    /// Run up to `n` ticks and return the last event
    pub fn run(&mut self, n: usize) -> Option<TickEvent> {
        (0..n).map_while(|_| self.tick()).last()
    }

    pub fn pause(&mut self) {
        if self.state.status == Status::Running {
            self.transition(Status::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state.status == Status::Paused {
            self.transition(Status::Running);
        }
    }

    /// Terminal; the node set stays readable
    pub fn stop(&mut self) {
        if self.state.status != Status::Stopped {
            self.transition(Status::Stopped);
        }
    }

    /// Restart alpha cooling so the layout settles again
    pub fn reheat(&mut self) {
        if self.state.status.is_live() {
            self.state.cooling.reheat();
            debug!(alpha = self.state.cooling.alpha(), "reheated");
        }
    }

    fn transition(&mut self, next: Status) {
        info!(from = ?self.state.status, to = ?next, tick = self.state.tick, "simulation status");
        self.state.status = next;
    }

    /// Current positions and halos without advancing
    pub fn snapshot(&self) -> TickEvent {
        let registry = &self.state.registry;
        TickEvent {
            tick: self.state.tick,
            alpha: self.state.cooling.alpha(),
            nodes: registry
                .nodes()
                .iter()
                .map(|n| NodeFrame::from_node(n, &self.anchors, registry.scales()))
                .collect(),
            clusters: self.halos(),
        }
    }

    pub fn halos(&self) -> Vec<HaloFrame> {
        self.halo.halos(&self.anchors, &self.state.registry)
    }

    /// Halo radius of the cluster with this label
    pub fn halo_radius(&self, label: &str) -> Option<f64> {
        let id = self.anchors.resolve(label)?;
        let cluster = self.anchors.get(id)?;
        Some(self.halo.halo_radius(cluster, &self.state.registry))
    }

    /// Step the probe and report what it now touches
    pub fn move_probe(&mut self, direction: Direction) -> ProbeReport {
        let position = self.probe.move_in(direction);
        trace!(?direction, x = position.x, y = position.y, "probe moved");
        self.query_probe()
    }

    pub fn query_probe(&self) -> ProbeReport {
        let registry = &self.state.registry;
        let hit = self.probe.query_nearest(registry);
        ProbeReport {
            position: [self.probe.position.x, self.probe.position.y],
            half_size: self.probe.half_size,
            node_id: hit.map(|n| n.key.clone()),
            node: hit.map(|n| NodeFrame::from_node(n, &self.anchors, registry.scales())),
        }
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick
    }

    pub fn alpha(&self) -> f64 {
        self.state.cooling.alpha()
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.state.registry
    }

    pub fn anchors(&self) -> &ClusterAnchors {
        &self.anchors
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// Names of the active force models
    pub fn force_names(&self) -> Vec<&'static str> {
        self.forces.names()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.state.registry.kinetic_energy()
    }
}
