use crate::cluster::ClusterId;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
#[cfg(feature = "tsify")]
use tsify_next::Tsify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

/// One catalog item as handed over by the data loader
///
/// Parsing, type coercion and the minimum-player filter happen before the
/// engine sees records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub cluster_label: String,
    /// Drives node size (current player count)
    pub weight: f64,
    /// Passed through for the renderer (positive review percentage)
    pub quality_score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GameRecord {
    pub fn new(
        id: impl Into<String>,
        cluster_label: impl Into<String>,
        weight: f64,
        quality_score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            cluster_label: cluster_label.into(),
            weight,
            quality_score,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A simulated entity
///
/// Identity, cluster, weight, score and tags are fixed at creation. Only
/// the kinematic state (`position`, `velocity`) changes, and only inside a
/// simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub key: String,
    pub cluster: ClusterId,
    pub weight: f64,
    pub quality_score: f64,
    pub tags: Vec<String>,
    /// Derived from weight by the size scale; never negative
    pub radius: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
}

impl Node {
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.position - other.position).magnitude()
    }

    pub fn distance_to_point(&self, point: Point2<f64>) -> f64 {
        (self.position - point).magnitude()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Overlap depth with another node's circle (negative when apart)
    pub fn overlap_with(&self, other: &Node) -> f64 {
        self.radius + other.radius - self.distance_to(other)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl crate::quadtree::Located for Node {
    fn position(&self) -> Point2<f64> {
        self.position
    }
}
