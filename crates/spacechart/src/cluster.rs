//! Cluster anchors: the fixed attractors nodes are pulled toward

use crate::error::{LayoutError, Result};
use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub u16);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named attractor with an immutable anchor point
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    pub label: String,
    pub anchor: Point2<f64>,
}

/// The configured mapping from cluster label to anchor coordinate
///
/// The set of valid cluster labels is exactly this mapping's key set.
/// Iteration order is the order in which anchors were supplied, and
/// every [`ClusterId`] is an index into that order.
///
/// # Examples
///
/// ```
/// use spacechart::cluster::ClusterAnchors;
/// use nalgebra::Point2;
///
/// let anchors = ClusterAnchors::new([
///     ("Action", Point2::new(400.0, 300.0)),
///     ("Racing", Point2::new(250.0, 90.0)),
/// ])
/// .unwrap();
///
/// assert_eq!(anchors.len(), 2);
/// assert!(anchors.resolve("Racing").is_some());
/// assert!(anchors.resolve("Unknown").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAnchors {
    clusters: Vec<Cluster>,
}

impl ClusterAnchors {
    /// Builds the mapping, failing fast on an empty set, a repeated label
    /// or a non-finite anchor
    pub fn new<I, S>(anchors: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Point2<f64>)>,
        S: Into<String>,
    {
        let mut clusters: Vec<Cluster> = Vec::new();

        for (label, anchor) in anchors {
            let label = label.into();
            if !(anchor.x.is_finite() && anchor.y.is_finite()) {
                return Err(LayoutError::NonFiniteAnchor { label });
            }
            if clusters.iter().any(|c| c.label == label) {
                return Err(LayoutError::DuplicateCluster(label));
            }
            let id = u16::try_from(clusters.len())
                .map(ClusterId)
                .map_err(|_| LayoutError::InvalidConfig("too many clusters".to_string()))?;
            clusters.push(Cluster { id, label, anchor });
        }

        if clusters.is_empty() {
            return Err(LayoutError::EmptyClusterMap);
        }

        Ok(Self { clusters })
    }

    /// The seven top genres of the catalog, positioned for an 800x700 view
    pub fn steam_genres() -> Self {
        let presets = [
            ("Action", 400.0, 300.0),
            ("Adventure", 189.0, 350.0),
            ("Simulation", 530.0, 482.0),
            ("RPG", 180.0, 250.0),
            ("Strategy", 256.0, 427.0),
            ("Casual", 559.0, 150.0),
            ("Racing", 250.0, 90.0),
        ];

        let clusters = presets
            .iter()
            .enumerate()
            .map(|(i, &(label, x, y))| Cluster {
                id: ClusterId(i as u16),
                label: label.to_string(),
                anchor: Point2::new(x, y),
            })
            .collect();

        Self { clusters }
    }

    /// Looks up the cluster for a label (exact, case-sensitive match)
    pub fn resolve(&self, label: &str) -> Option<ClusterId> {
        self.clusters.iter().find(|c| c.label == label).map(|c| c.id)
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.index())
    }

    pub fn anchor(&self, id: ClusterId) -> Option<Point2<f64>> {
        self.get(id).map(|c| c.anchor)
    }

    /// Anchor points indexed by [`ClusterId`]
    pub fn anchor_points(&self) -> Vec<Point2<f64>> {
        self.clusters.iter().map(|c| c.anchor).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Always false for a constructed mapping
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
