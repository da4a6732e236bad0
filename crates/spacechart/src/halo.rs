//! Cluster halo radii
//!
//! A halo is drawn around each cluster anchor, sized to enclose the
//! cluster's members. It is recomputed from committed positions after
//! every tick and only ever reads the registry.

use crate::cluster::{Cluster, ClusterAnchors};
use crate::config::HaloConfig;
use crate::event::HaloFrame;
use crate::registry::NodeRegistry;

/// Computes the bounding radius drawn around a cluster
///
/// ```text
/// halo = min( max over members of |pos − anchor| + radius·padding, max_radius )
/// ```
///
/// # Examples
///
/// ```
/// use spacechart::cluster::ClusterAnchors;
/// use spacechart::config::ScaleConfig;
/// use spacechart::halo::HaloCalculator;
/// use spacechart::registry::NodeRegistry;
///
/// let anchors = ClusterAnchors::steam_genres();
/// let registry = NodeRegistry::empty(&anchors, &ScaleConfig::default());
/// let racing = anchors.iter().find(|c| c.label == "Racing").unwrap();
///
/// // no members: the fallback radius
/// assert_eq!(HaloCalculator::default().halo_radius(racing, &registry), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloCalculator {
    pub padding: f64,
    pub max_radius: f64,
    pub fallback_radius: f64,
}

impl HaloCalculator {
    pub fn new(padding: f64, max_radius: f64, fallback_radius: f64) -> Self {
        Self {
            padding,
            max_radius,
            fallback_radius,
        }
    }

    pub fn from_config(config: &HaloConfig) -> Self {
        Self::new(config.padding, config.max_radius, config.fallback_radius)
    }

    /// Halo radius for one cluster, never negative
    pub fn halo_radius(&self, cluster: &Cluster, registry: &NodeRegistry) -> f64 {
        registry
            .members(cluster.id)
            .map(|node| node.distance_to_point(cluster.anchor) + node.radius * self.padding)
            .filter(|extent| extent.is_finite())
            .reduce(f64::max)
            .map_or(self.fallback_radius, |extent| {
                extent.clamp(0.0, self.max_radius)
            })
    }

    /// One frame per cluster, in anchor order
    pub fn halos(&self, anchors: &ClusterAnchors, registry: &NodeRegistry) -> Vec<HaloFrame> {
        anchors
            .iter()
            .map(|cluster| HaloFrame {
                label: cluster.label.clone(),
                x: cluster.anchor.x,
                y: cluster.anchor.y,
                halo_radius: self.halo_radius(cluster, registry),
            })
            .collect()
    }
}

impl Default for HaloCalculator {
    fn default() -> Self {
        Self::from_config(&HaloConfig::default())
    }
}
