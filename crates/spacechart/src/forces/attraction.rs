//! Spring pull toward each node's cluster anchor

use crate::cluster::ClusterAnchors;
use crate::forces::ForceModel;
use crate::registry::NodeRegistry;
use nalgebra::{Point2, Vector2};

/// Pulls every node toward its cluster anchor, on each axis independently,
/// by `strength × signed distance`
///
/// Not distance-capped: the pull shrinks linearly as the node closes in.
pub struct ClusterAttraction {
    anchors: Vec<Point2<f64>>,
    pub strength: f64,
}

impl ClusterAttraction {
    pub fn new(anchors: &ClusterAnchors, strength: f64) -> Self {
        Self {
            anchors: anchors.anchor_points(),
            strength,
        }
    }
}

impl ForceModel for ClusterAttraction {
    fn velocity_delta(&self, idx: usize, registry: &NodeRegistry) -> Vector2<f64> {
        let node = &registry.nodes()[idx];
        match self.anchors.get(node.cluster.index()) {
            Some(anchor) => (*anchor - node.position) * self.strength,
            None => Vector2::zeros(),
        }
    }

    fn name(&self) -> &'static str {
        "cluster-attraction"
    }
}
