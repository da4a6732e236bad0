//! Direct many-body repulsion (O(N²) implementation)

use crate::forces::{jiggle, ForceModel};
use crate::quadtree::pair_push;
use crate::registry::NodeRegistry;
use nalgebra::Vector2;

/// Every node pushes every other node away
///
/// Node `i` receives `Σ (x_j − x_i) · strength / d²` over all `j ≠ i`, with
/// `d²` softened below `distance_min²`. Exactly coincident nodes are given
/// a tiny deterministic separation direction instead of dividing by zero.
///
/// Fine for catalog-scale sets (hundreds of nodes); see
/// [`TreeRepulsion`](crate::forces::TreeRepulsion) beyond that.
pub struct DirectRepulsion {
    /// Negative to repel
    pub strength: f64,
    pub distance_min: f64,
}

impl DirectRepulsion {
    pub fn new(strength: f64, distance_min: f64) -> Self {
        Self {
            strength,
            distance_min,
        }
    }
}

impl Default for DirectRepulsion {
    fn default() -> Self {
        Self::new(-10.0, 1.0)
    }
}

impl ForceModel for DirectRepulsion {
    fn velocity_delta(&self, idx: usize, registry: &NodeRegistry) -> Vector2<f64> {
        let nodes = registry.nodes();
        let node = &nodes[idx];
        let distance_min2 = self.distance_min * self.distance_min;

        nodes
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(j, other)| {
                let mut diff = other.position - node.position;
                if diff.x == 0.0 && diff.y == 0.0 {
                    diff = jiggle(idx, j);
                }
                pair_push(diff, self.strength, distance_min2)
            })
            .fold(Vector2::zeros(), |acc, v| acc + v)
    }

    fn name(&self) -> &'static str {
        "direct-repulsion"
    }
}
