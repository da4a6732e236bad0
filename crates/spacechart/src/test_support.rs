use nalgebra::{Point2, Vector2};

use crate::cluster::{ClusterAnchors, ClusterId};
use crate::node::{Node, NodeId};
use crate::registry::NodeRegistry;

/// Two clusters: "Left" anchored at (100, 100), "Right" at (300, 100)
pub(crate) fn two_anchors() -> ClusterAnchors {
    ClusterAnchors::new([
        ("Left", Point2::new(100.0, 100.0)),
        ("Right", Point2::new(300.0, 100.0)),
    ])
    .unwrap()
}

pub(crate) fn node_at(id: u32, cluster: u16, x: f64, y: f64, radius: f64) -> Node {
    Node {
        id: NodeId(id),
        key: format!("node-{id}"),
        cluster: ClusterId(cluster),
        weight: radius,
        quality_score: 50.0,
        tags: Vec::new(),
        radius,
        position: Point2::new(x, y),
        velocity: Vector2::zeros(),
    }
}

pub(crate) fn registry_of(anchors: &ClusterAnchors, nodes: Vec<Node>) -> NodeRegistry {
    NodeRegistry::from_nodes(anchors, nodes)
}
