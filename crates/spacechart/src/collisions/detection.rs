//! Overlap detection between node circles
//!
//! Two strategies with identical results:
//! - DirectDetector: every pair, O(N²)
//! - TreeDetector: quadtree neighbour search

use crate::quadtree::{BoundingBox, QuadTree};
use nalgebra::Point2;

/// Two circles closer than the sum of their radii
///
/// Always reported with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub a: usize,
    pub b: usize,
    /// Current centre distance
    pub separation: f64,
    /// Sum of the two radii
    pub reach: f64,
}

impl Overlap {
    /// How far the circles interpenetrate
    pub fn depth(&self) -> f64 {
        self.reach - self.separation
    }
}

/// Check a single pair of circles
pub fn check_pair(
    a: usize,
    b: usize,
    positions: &[Point2<f64>],
    radii: &[f64],
) -> Option<Overlap> {
    let separation = (positions[b] - positions[a]).magnitude();
    let reach = radii[a] + radii[b];

    if separation < reach {
        Some(Overlap {
            a: a.min(b),
            b: a.max(b),
            separation,
            reach,
        })
    } else {
        None
    }
}

pub trait CollisionDetector: Send + Sync {
    /// All overlapping pairs, sorted by `(a, b)`
    ///
    /// `positions` and `radii` are parallel slices.
    fn detect(&self, positions: &[Point2<f64>], radii: &[f64]) -> Vec<Overlap>;
}

/// Direct O(N²) overlap detector
///
/// # Examples
///
/// ```
/// use spacechart::collisions::{CollisionDetector, DirectDetector};
/// use nalgebra::Point2;
///
/// let positions = vec![Point2::new(0.0, 0.0), Point2::new(8.0, 0.0), Point2::new(50.0, 0.0)];
/// let radii = vec![5.0, 5.0, 5.0];
///
/// let overlaps = DirectDetector.detect(&positions, &radii);
/// assert_eq!(overlaps.len(), 1);
/// assert_eq!(overlaps[0].depth(), 2.0);
/// ```
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, positions: &[Point2<f64>], radii: &[f64]) -> Vec<Overlap> {
        let n = positions.len();

        (0..n)
            .flat_map(|i| ((i + 1)..n).filter_map(move |j| check_pair(i, j, positions, radii)))
            .collect()
    }
}

/// Quadtree-backed overlap detector
///
/// For each node, searches a radius of its own radius plus the largest
/// radius in the set, so no overlapping pair can be missed.
pub struct TreeDetector;

impl CollisionDetector for TreeDetector {
    fn detect(&self, positions: &[Point2<f64>], radii: &[f64]) -> Vec<Overlap> {
        if positions.is_empty() {
            return Vec::new();
        }

        let tree = QuadTree::build(positions, BoundingBox::new_from_items(positions));
        let max_radius = radii.iter().copied().fold(0.0, f64::max);

        let mut overlaps: Vec<Overlap> = positions
            .iter()
            .enumerate()
            .flat_map(|(i, &pos)| {
                tree.neighbors_within(pos, radii[i] + max_radius)
                    .into_iter()
                    // each pair is visited from both ends; keep the lower index
                    .filter(move |&j| j > i)
                    .filter_map(move |j| check_pair(i, j, positions, radii))
            })
            .collect();

        overlaps.sort_by_key(|o| (o.a, o.b));
        overlaps
    }
}
