//! Payloads handed to the rendering layer
//!
//! Everything here serialises to camelCase JSON so a browser host can
//! consume it without a translation step.

use crate::cluster::ClusterAnchors;
use crate::node::Node;
use crate::scale::ScaleSet;
use serde::Serialize;
#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Drawable state of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct NodeFrame {
    pub id: String,
    pub cluster: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Radius of the soft backdrop drawn behind the node
    pub backdrop_radius: f64,
    /// Glow opacity derived from the quality score
    pub intensity: f64,
    pub weight: f64,
    pub quality_score: f64,
    pub tags: Vec<String>,
}

impl NodeFrame {
    pub fn from_node(node: &Node, anchors: &ClusterAnchors, scales: &ScaleSet) -> Self {
        Self {
            id: node.key.clone(),
            cluster: anchors
                .get(node.cluster)
                .map(|c| c.label.clone())
                .unwrap_or_default(),
            x: node.position.x,
            y: node.position.y,
            radius: node.radius,
            backdrop_radius: scales.backdrop_of(node.weight),
            intensity: scales.intensity_of(node.quality_score),
            weight: node.weight,
            quality_score: node.quality_score,
            tags: node.tags.clone(),
        }
    }
}

/// Halo drawn around a cluster anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct HaloFrame {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub halo_radius: f64,
}

/// Emitted after every completed tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct TickEvent {
    pub tick: u64,
    pub alpha: f64,
    pub nodes: Vec<NodeFrame>,
    pub clusters: Vec<HaloFrame>,
}

/// Where the probe is and what it touches
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub position: [f64; 2],
    pub half_size: f64,
    /// Key of the nearest node in reach, if any
    pub node_id: Option<String>,
    pub node: Option<NodeFrame>,
}
