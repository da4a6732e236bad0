//! The fixed node set and its construction from loader records
//!
//! Construction never fails on record content. A record whose cluster label
//! has no anchor, whose weight is negative or non-finite, whose score is
//! non-finite, or whose id repeats an earlier record is dropped and counted.
//! After construction the set is closed: nodes are neither added nor removed.

use std::collections::HashSet;
use std::f64::consts::PI;

use crate::cluster::{ClusterAnchors, ClusterId};
use crate::config::{Placement, ScaleConfig};
use crate::node::{GameRecord, Node, NodeId};
use crate::scale::ScaleSet;
use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::Serialize;
use tracing::{debug, info, warn};
#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Counts of accepted and dropped records from one ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub accepted: usize,
    pub unknown_cluster: usize,
    pub invalid_weight: usize,
    pub invalid_score: usize,
    pub duplicate_id: usize,
}

impl IngestReport {
    pub fn dropped(&self) -> usize {
        self.unknown_cluster + self.invalid_weight + self.invalid_score + self.duplicate_id
    }

    pub fn total(&self) -> usize {
        self.accepted + self.dropped()
    }
}

#[derive(Debug, Clone, Copy)]
enum DropReason {
    UnknownCluster,
    InvalidWeight,
    InvalidScore,
    DuplicateId,
}

/// Owner of every [`Node`] in a layout
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    /// Node indices per cluster, indexed by `ClusterId`
    members: Vec<Vec<usize>>,
    scales: ScaleSet,
}

impl NodeRegistry {
    /// An empty registry over the given clusters
    pub fn empty(anchors: &ClusterAnchors, scales: &ScaleConfig) -> Self {
        Self {
            nodes: Vec::new(),
            members: vec![Vec::new(); anchors.len()],
            scales: ScaleSet::fit(&[], &[], scales),
        }
    }

    /// Builds the node set from loader records
    ///
    /// Scales are fitted to the accepted records only, then every node gets
    /// its radius and an initial position near its cluster anchor.
    ///
    /// # Examples
    ///
    /// ```
    /// use spacechart::cluster::ClusterAnchors;
    /// use spacechart::config::{Placement, ScaleConfig};
    /// use spacechart::node::GameRecord;
    /// use spacechart::registry::NodeRegistry;
    ///
    /// let anchors = ClusterAnchors::steam_genres();
    /// let records = vec![
    ///     GameRecord::new("Dota 2", "Action", 600_000.0, 81.0),
    ///     GameRecord::new("Stardew Valley", "Simulation", 40_000.0, 98.0),
    ///     GameRecord::new("Mystery", "Unknown", 500.0, 50.0),
    /// ];
    ///
    /// let (registry, report) = NodeRegistry::from_records(
    ///     &anchors,
    ///     records,
    ///     &ScaleConfig::default(),
    ///     &Placement::default(),
    /// );
    ///
    /// assert_eq!(registry.len(), 2);
    /// assert_eq!(report.unknown_cluster, 1);
    /// ```
    pub fn from_records<I>(
        anchors: &ClusterAnchors,
        records: I,
        scales: &ScaleConfig,
        placement: &Placement,
    ) -> (Self, IngestReport)
    where
        I: IntoIterator<Item = GameRecord>,
    {
        let mut report = IngestReport::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut accepted: Vec<(GameRecord, ClusterId)> = Vec::new();

        for record in records {
            match admit(anchors, &record, &seen) {
                Ok(cluster) => {
                    seen.insert(record.id.clone());
                    accepted.push((record, cluster));
                }
                Err(reason) => {
                    debug!(id = %record.id, label = %record.cluster_label, ?reason, "dropping record");
                    match reason {
                        DropReason::UnknownCluster => report.unknown_cluster += 1,
                        DropReason::InvalidWeight => report.invalid_weight += 1,
                        DropReason::InvalidScore => report.invalid_score += 1,
                        DropReason::DuplicateId => report.duplicate_id += 1,
                    }
                }
            }
        }
        report.accepted = accepted.len();

        let weights: Vec<f64> = accepted.iter().map(|(r, _)| r.weight).collect();
        let scores: Vec<f64> = accepted.iter().map(|(r, _)| r.quality_score).collect();
        let scale_set = ScaleSet::fit(&weights, &scores, scales);

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); anchors.len()];
        let mut rng = match placement {
            Placement::Scatter { seed, .. } => Some(ChaChaRng::seed_from_u64(*seed)),
            Placement::Phyllotaxis { .. } => None,
        };

        let nodes: Vec<Node> = accepted
            .into_iter()
            .enumerate()
            .map(|(i, (record, cluster))| {
                let slot = members[cluster.index()].len();
                members[cluster.index()].push(i);

                let anchor = anchors.anchor(cluster).unwrap_or_else(Point2::origin);
                let position = match (placement, rng.as_mut()) {
                    (Placement::Scatter { spread, .. }, Some(rng)) => {
                        scatter_position(anchor, *spread, rng)
                    }
                    (Placement::Phyllotaxis { initial_radius }, _) => {
                        phyllotaxis_position(anchor, *initial_radius, slot)
                    }
                    (Placement::Scatter { .. }, None) => anchor,
                };

                Node {
                    id: NodeId(i as u32),
                    radius: scale_set.size_of(record.weight),
                    key: record.id,
                    cluster,
                    weight: record.weight,
                    quality_score: record.quality_score,
                    tags: record.tags,
                    position,
                    velocity: Vector2::zeros(),
                }
            })
            .collect();

        info!(
            accepted = report.accepted,
            dropped = report.dropped(),
            clusters = anchors.len(),
            "node registry built"
        );
        if report.dropped() > report.accepted {
            warn!(
                dropped = report.dropped(),
                total = report.total(),
                "most records were dropped during ingestion"
            );
        }

        let registry = Self {
            nodes,
            members,
            scales: scale_set,
        };
        (registry, report)
    }

    /// Wraps nodes built by hand, keeping their positions and radii
    #[cfg(test)]
    pub(crate) fn from_nodes(anchors: &ClusterAnchors, nodes: Vec<Node>) -> Self {
        let mut members = vec![Vec::new(); anchors.len()];
        for (i, node) in nodes.iter().enumerate() {
            members[node.cluster.index()].push(i);
        }
        let weights: Vec<f64> = nodes.iter().map(|n| n.weight).collect();
        let scores: Vec<f64> = nodes.iter().map(|n| n.quality_score).collect();
        Self {
            scales: ScaleSet::fit(&weights, &scores, &ScaleConfig::default()),
            nodes,
            members,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Kinematic state is only mutated by the simulation loop
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn find(&self, key: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Members of one cluster in registry order
    pub fn members(&self, cluster: ClusterId) -> impl Iterator<Item = &Node> + '_ {
        self.members
            .get(cluster.index())
            .map(|m| m.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.nodes[i])
    }

    pub fn member_count(&self, cluster: ClusterId) -> usize {
        self.members.get(cluster.index()).map_or(0, Vec::len)
    }

    pub fn positions(&self) -> Vec<Point2<f64>> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    pub fn radii(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.radius).collect()
    }

    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of ½v² over all nodes; approaches zero as the layout settles
    pub fn kinetic_energy(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| 0.5 * n.velocity.magnitude_squared())
            .sum()
    }
}

fn admit(
    anchors: &ClusterAnchors,
    record: &GameRecord,
    seen: &HashSet<String>,
) -> Result<ClusterId, DropReason> {
    let cluster = anchors
        .resolve(&record.cluster_label)
        .ok_or(DropReason::UnknownCluster)?;

    if !(record.weight.is_finite() && record.weight >= 0.0) {
        return Err(DropReason::InvalidWeight);
    }
    if !record.quality_score.is_finite() {
        return Err(DropReason::InvalidScore);
    }
    if seen.contains(&record.id) {
        return Err(DropReason::DuplicateId);
    }

    Ok(cluster)
}

/// Sunflower spiral: the `slot`-th member sits at radius `r0·sqrt(0.5 + slot)`
fn phyllotaxis_position(anchor: Point2<f64>, initial_radius: f64, slot: usize) -> Point2<f64> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let i = slot as f64;
    let radius = initial_radius * (0.5 + i).sqrt();
    let angle = i * golden_angle;
    anchor + Vector2::new(radius * angle.cos(), radius * angle.sin())
}

fn scatter_position(anchor: Point2<f64>, spread: f64, rng: &mut ChaChaRng) -> Point2<f64> {
    if spread <= 0.0 {
        return anchor;
    }
    anchor
        + Vector2::new(
            rng.gen_range(-spread..spread),
            rng.gen_range(-spread..spread),
        )
}
