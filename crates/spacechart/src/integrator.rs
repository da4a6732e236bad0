//! Velocity integration and alpha cooling
//!
//! A tick does not move nodes directly. The integrator folds the summed
//! force contributions into each node's velocity and returns *tentative*
//! positions; the collision pass corrects those before they are committed.

use crate::config::IntegrationConfig;
use crate::node::Node;
use nalgebra::{Point2, Vector2};

/// Advances node velocities by one tick
pub trait Integrator: Send + Sync {
    /// Update velocities in place from `deltas` scaled by `alpha`, and
    /// return where each node would move to
    ///
    /// `deltas` is parallel to `nodes`.
    fn step(&self, nodes: &mut [Node], deltas: &[Vector2<f64>], alpha: f64) -> Vec<Point2<f64>>;
}

/// Damped explicit velocity update
///
/// ```text
/// v ← (v + Δv·α) · (1 − decay)
/// x' = x + v
/// ```
///
/// # Examples
///
/// ```
/// use spacechart::integrator::{DampedVelocity, Integrator};
/// use spacechart::node::{Node, NodeId};
/// use spacechart::cluster::ClusterId;
/// use nalgebra::{Point2, Vector2};
///
/// let mut nodes = vec![Node {
///     id: NodeId(0),
///     key: "Portal 2".into(),
///     cluster: ClusterId(0),
///     weight: 3_000.0,
///     quality_score: 99.0,
///     tags: Vec::new(),
///     radius: 8.0,
///     position: Point2::new(0.0, 0.0),
///     velocity: Vector2::zeros(),
/// }];
///
/// let integrator = DampedVelocity::new(0.5);
/// let tentative = integrator.step(&mut nodes, &[Vector2::new(4.0, 0.0)], 1.0);
///
/// assert_eq!(nodes[0].velocity, Vector2::new(2.0, 0.0));
/// assert_eq!(tentative[0], Point2::new(2.0, 0.0));
/// // positions are only committed after collision correction
/// assert_eq!(nodes[0].position, Point2::origin());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedVelocity {
    /// Fraction of velocity lost every tick, in [0, 1]
    pub velocity_decay: f64,
}

impl DampedVelocity {
    pub fn new(velocity_decay: f64) -> Self {
        Self { velocity_decay }
    }

    pub fn from_config(config: &IntegrationConfig) -> Self {
        Self::new(config.velocity_decay)
    }
}

impl Default for DampedVelocity {
    fn default() -> Self {
        Self::from_config(&IntegrationConfig::default())
    }
}

impl Integrator for DampedVelocity {
    fn step(&self, nodes: &mut [Node], deltas: &[Vector2<f64>], alpha: f64) -> Vec<Point2<f64>> {
        let keep = 1.0 - self.velocity_decay;

        nodes
            .iter_mut()
            .zip(deltas)
            .map(|(node, delta)| {
                node.velocity = (node.velocity + delta * alpha) * keep;
                node.position + node.velocity
            })
            .collect()
    }
}

/// Write corrected positions back to the nodes
pub fn commit(nodes: &mut [Node], positions: &[Point2<f64>]) {
    nodes
        .iter_mut()
        .zip(positions)
        .for_each(|(node, &pos)| node.position = pos);
}

/// Exponential alpha schedule
///
/// Alpha eases toward `alpha_target` by `alpha_decay` each tick and is
/// floored at `alpha_min`, so a running layout keeps ticking at a low
/// residual strength instead of halting.
#[derive(Debug, Clone, PartialEq)]
pub struct Cooling {
    alpha: f64,
    start: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub alpha_target: f64,
}

impl Cooling {
    pub fn from_config(config: &IntegrationConfig) -> Self {
        Self {
            alpha: config.alpha_start,
            start: config.alpha_start,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: config.alpha_target,
        }
    }

    /// Cool by one tick and return the alpha to use for it
    pub fn step(&mut self) -> f64 {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        self.alpha = self.alpha.max(self.alpha_min);
        self.alpha
    }

    /// Back to the starting alpha
    pub fn reheat(&mut self) {
        self.alpha = self.start;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether alpha has reached its floor
    pub fn is_settled(&self) -> bool {
        self.alpha <= self.alpha_min
    }
}

impl Default for Cooling {
    fn default() -> Self {
        Self::from_config(&IntegrationConfig::default())
    }
}
