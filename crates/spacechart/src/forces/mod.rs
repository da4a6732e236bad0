//! Force models for the layout
//!
//! Each model turns the current node positions into a per-node velocity
//! contribution. The simulation loop scales the summed contribution by the
//! current alpha and integrates it with damping.

use crate::cluster::ClusterAnchors;
use crate::config::{ForceConfig, RepulsionMethod};
use crate::registry::NodeRegistry;
use nalgebra::Vector2;

pub mod attraction;
pub mod repulsion;
pub mod tree_repulsion;

#[cfg(test)]
mod attraction_test;
#[cfg(test)]
mod tree_repulsion_test;

pub use attraction::ClusterAttraction;
pub use repulsion::DirectRepulsion;
pub use tree_repulsion::TreeRepulsion;

/// Magnitude of the nudge given to exactly coincident nodes
const JIGGLE: f64 = 1e-6;

/// A source of velocity change on nodes
///
/// # Examples
///
/// ```
/// use spacechart::cluster::ClusterAnchors;
/// use spacechart::config::{Placement, ScaleConfig};
/// use spacechart::forces::{ClusterAttraction, ForceModel};
/// use spacechart::node::GameRecord;
/// use spacechart::registry::NodeRegistry;
///
/// let anchors = ClusterAnchors::steam_genres();
/// let (registry, _) = NodeRegistry::from_records(
///     &anchors,
///     vec![GameRecord::new("Forza Horizon 5", "Racing", 9_000.0, 87.0)],
///     &ScaleConfig::default(),
///     &Placement::default(),
/// );
///
/// let pull = ClusterAttraction::new(&anchors, 0.5);
/// let delta = pull.velocity_delta(0, &registry);
/// assert!(delta.magnitude() > 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Velocity contribution on the node at `idx` in `registry.nodes()`
    fn velocity_delta(&self, idx: usize, registry: &NodeRegistry) -> Vector2<f64>;

    /// Contributions for every node, in registry order
    ///
    /// Override when a pass shares work across nodes (a spatial index).
    fn velocity_deltas(&self, registry: &NodeRegistry) -> Vec<Vector2<f64>> {
        (0..registry.len())
            .map(|i| self.velocity_delta(i, registry))
            .collect()
    }

    fn name(&self) -> &'static str;
}

/// Sum of several named force models
pub struct CompositeForce {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeForce {
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    pub fn with_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    /// Cluster attraction plus the configured repulsion pass
    pub fn from_config(config: &ForceConfig, anchors: &ClusterAnchors) -> Self {
        let composite =
            Self::new().with_force(ClusterAttraction::new(anchors, config.attraction_strength));

        match config.repulsion_method {
            RepulsionMethod::Direct => composite.with_force(DirectRepulsion::new(
                config.repulsion_strength,
                config.repulsion_distance_min,
            )),
            RepulsionMethod::Tree => composite.with_force(TreeRepulsion::new(
                config.repulsion_strength,
                config.repulsion_distance_min,
                config.theta,
            )),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.name()).collect()
    }
}

impl Default for CompositeForce {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for CompositeForce {
    fn velocity_delta(&self, idx: usize, registry: &NodeRegistry) -> Vector2<f64> {
        self.models
            .iter()
            .map(|f| f.velocity_delta(idx, registry))
            .fold(Vector2::zeros(), |acc, v| acc + v)
    }

    fn velocity_deltas(&self, registry: &NodeRegistry) -> Vec<Vector2<f64>> {
        self.models.iter().fold(
            vec![Vector2::zeros(); registry.len()],
            |mut acc, model| {
                acc.iter_mut()
                    .zip(model.velocity_deltas(registry))
                    .for_each(|(sum, v)| *sum += v);
                acc
            },
        )
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}

/// Deterministic separation direction for two coincident nodes
///
/// `jiggle(i, j) == -jiggle(j, i)`, so the pair is pushed apart
/// symmetrically and the result does not depend on iteration order.
pub(crate) fn jiggle(i: usize, j: usize) -> Vector2<f64> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    let (lo, hi, sign) = if i < j { (i, j, 1.0) } else { (j, i, -1.0) };
    let angle = (lo.wrapping_mul(31).wrapping_add(hi)) as f64 * golden_angle;
    Vector2::new(angle.cos(), angle.sin()) * (JIGGLE * sign)
}
