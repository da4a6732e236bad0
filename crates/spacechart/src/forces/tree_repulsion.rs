//! Tree-based repulsion using the Barnes-Hut approximation (O(N log N))

use crate::forces::ForceModel;
use crate::quadtree::{BoundingBox, QuadTree};
use crate::registry::NodeRegistry;
use nalgebra::Vector2;

/// Many-body repulsion with distant groups approximated by their centroid
///
/// Same contract as [`DirectRepulsion`](crate::forces::DirectRepulsion);
/// the opening angle θ trades accuracy for speed (θ = 0 is exact).
pub struct TreeRepulsion {
    pub strength: f64,
    pub distance_min: f64,
    pub theta: f64,
}

impl TreeRepulsion {
    pub fn new(strength: f64, distance_min: f64, theta: f64) -> Self {
        Self {
            strength,
            distance_min,
            theta,
        }
    }
}

impl Default for TreeRepulsion {
    fn default() -> Self {
        Self::new(-10.0, 1.0, 0.9)
    }
}

impl ForceModel for TreeRepulsion {
    fn velocity_delta(&self, idx: usize, registry: &NodeRegistry) -> Vector2<f64> {
        let nodes = registry.nodes();
        if nodes.is_empty() {
            return Vector2::zeros();
        }

        let tree = QuadTree::build(nodes, BoundingBox::new_from_items(nodes));
        tree.repulsion(
            idx,
            self.theta,
            self.strength,
            self.distance_min * self.distance_min,
        )
    }

    /// Builds the tree once per pass
    fn velocity_deltas(&self, registry: &NodeRegistry) -> Vec<Vector2<f64>> {
        let nodes = registry.nodes();
        if nodes.is_empty() {
            return Vec::new();
        }

        let tree = QuadTree::build(nodes, BoundingBox::new_from_items(nodes));
        let distance_min2 = self.distance_min * self.distance_min;

        (0..nodes.len())
            .map(|i| tree.repulsion(i, self.theta, self.strength, distance_min2))
            .collect()
    }

    fn name(&self) -> &'static str {
        "tree-repulsion"
    }
}
