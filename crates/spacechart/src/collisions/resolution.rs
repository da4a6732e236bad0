//! Overlap relaxation
//!
//! A positional constraint rather than a force: each overlapping pair is
//! pushed apart along the line between centres, half the correction to each
//! side. Corrections from all pairs are accumulated against the same
//! snapshot and applied together, so the result does not depend on the
//! order pairs are visited. Dense clusters need many ticks to clear fully.

use crate::collisions::{CollisionDetector, DirectDetector, Overlap, TreeDetector};
use crate::config::CollisionConfig;
use crate::forces::jiggle;
use nalgebra::{Point2, Vector2};

/// Apply one relaxation step for a set of detected overlaps
///
/// Each pair's correction is `depth × strength`, split evenly.
///
/// # Examples
///
/// ```
/// use spacechart::collisions::{resolve_overlaps, CollisionDetector, DirectDetector};
/// use nalgebra::Point2;
///
/// let mut positions = vec![Point2::new(0.0, 0.0), Point2::new(6.0, 0.0)];
/// let radii = vec![5.0, 5.0];
///
/// let overlaps = DirectDetector.detect(&positions, &radii);
/// resolve_overlaps(&mut positions, &overlaps, 1.0);
///
/// assert_eq!(positions[0], Point2::new(-2.0, 0.0));
/// assert_eq!(positions[1], Point2::new(8.0, 0.0));
/// ```
pub fn resolve_overlaps(positions: &mut [Point2<f64>], overlaps: &[Overlap], strength: f64) {
    let mut corrections = vec![Vector2::zeros(); positions.len()];

    for overlap in overlaps {
        let diff = positions[overlap.b] - positions[overlap.a];
        let direction = if overlap.separation > 0.0 {
            diff / overlap.separation
        } else {
            let j = jiggle(overlap.a, overlap.b);
            j / j.magnitude()
        };

        let push = direction * (overlap.depth() * strength * 0.5);
        corrections[overlap.a] -= push;
        corrections[overlap.b] += push;
    }

    positions
        .iter_mut()
        .zip(corrections)
        .for_each(|(pos, correction)| *pos += correction);
}

/// Collision pass run once per tick on tentative positions
pub struct CollisionResolver {
    /// Added to each node radius
    pub padding: f64,
    pub strength: f64,
    pub iterations: usize,
    detector: Box<dyn CollisionDetector>,
}

impl CollisionResolver {
    pub fn new(padding: f64, strength: f64, iterations: usize) -> Self {
        Self {
            padding,
            strength,
            iterations,
            detector: Box::new(DirectDetector),
        }
    }

    pub fn from_config(config: &CollisionConfig) -> Self {
        let resolver = Self::new(config.padding, config.strength, config.iterations);
        if config.use_tree {
            resolver.with_detector(TreeDetector)
        } else {
            resolver
        }
    }

    pub fn with_detector<D: CollisionDetector + 'static>(mut self, detector: D) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Relax overlaps between circles of `radii + padding`
    ///
    /// Returns the number of overlapping pairs seen in the first pass.
    pub fn relax(&self, positions: &mut [Point2<f64>], radii: &[f64]) -> usize {
        let padded: Vec<f64> = radii.iter().map(|r| r + self.padding).collect();

        let mut first = None;
        for _ in 0..self.iterations {
            let overlaps = self.detector.detect(positions, &padded);
            first.get_or_insert(overlaps.len());
            if overlaps.is_empty() {
                break;
            }
            resolve_overlaps(positions, &overlaps, self.strength);
        }

        first.unwrap_or(0)
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}
