use crate::integrator::Cooling;
use crate::registry::NodeRegistry;
use serde::{Deserialize, Serialize};
#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Lifecycle of a layout
///
/// ```text
/// Idle ──load──▶ Running ◀──resume── Paused
///                   │ └────pause────▶ │
///                   └──────stop───────┴──▶ Stopped
/// ```
///
/// Nothing inside the engine changes status on its own; the host drives
/// every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No node set yet
    #[default]
    Idle,
    Running,
    /// Ticks are ignored until resumed
    Paused,
    /// Terminal
    Stopped,
}

impl Status {
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// Whether the engine holds a node set that can still advance
    pub fn is_live(self) -> bool {
        matches!(self, Status::Running | Status::Paused)
    }
}

/// Everything a tick mutates, owned by one [`Simulation`](crate::simulation::Simulation)
///
/// # Examples
///
/// ```
/// use spacechart::cluster::ClusterAnchors;
/// use spacechart::config::ScaleConfig;
/// use spacechart::integrator::Cooling;
/// use spacechart::registry::NodeRegistry;
/// use spacechart::state::{SimulationState, Status};
///
/// let anchors = ClusterAnchors::steam_genres();
/// let registry = NodeRegistry::empty(&anchors, &ScaleConfig::default());
/// let state = SimulationState::new(registry, Cooling::default());
///
/// assert_eq!(state.status, Status::Idle);
/// assert_eq!(state.tick, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub registry: NodeRegistry,
    pub cooling: Cooling,
    /// Completed ticks since load
    pub tick: u64,
    pub status: Status,
}

impl SimulationState {
    pub fn new(registry: NodeRegistry, cooling: Cooling) -> Self {
        Self {
            registry,
            cooling,
            tick: 0,
            status: Status::Idle,
        }
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub fn alpha(&self) -> f64 {
        self.cooling.alpha()
    }
}
