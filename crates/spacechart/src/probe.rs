//! The user-steerable proximity probe
//!
//! A square footprint moved in fixed steps by discrete commands. Queries
//! only read the registry; they never touch node state.

use crate::config::{ProbeConfig, Viewport};
use crate::node::Node;
use crate::registry::NodeRegistry;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Axis-aligned movement command
///
/// Layout coordinates grow downward, so `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset for one step
    pub fn offset(self) -> Vector2<f64> {
        match self {
            Direction::Up => Vector2::new(0.0, -1.0),
            Direction::Down => Vector2::new(0.0, 1.0),
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
        }
    }
}

/// # Examples
///
/// ```
/// use spacechart::probe::{Direction, Probe};
/// use nalgebra::Point2;
///
/// let mut probe = Probe::new(Point2::new(400.0, 350.0), 10.0, 10.0);
/// probe.move_in(Direction::Up);
/// probe.move_in(Direction::Right);
///
/// assert_eq!(probe.position, Point2::new(410.0, 340.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub position: Point2<f64>,
    pub half_size: f64,
    pub step: f64,
}

impl Probe {
    pub fn new(position: Point2<f64>, half_size: f64, step: f64) -> Self {
        Self {
            position,
            half_size,
            step,
        }
    }

    /// Starts at the configured point, or the viewport centre
    pub fn from_config(config: &ProbeConfig, viewport: &Viewport) -> Self {
        let [x, y] = config.start.unwrap_or_else(|| viewport.center());
        Self::new(Point2::new(x, y), config.half_size, config.step)
    }

    /// Move one step and return the new position
    ///
    /// The probe is not confined to the viewport.
    pub fn move_in(&mut self, direction: Direction) -> Point2<f64> {
        self.position += direction.offset() * self.step;
        self.position
    }

    /// The closest node whose centre lies within `half_size + radius`
    ///
    /// Reach is strict: a node exactly at the threshold is not a hit.
    /// Exact distance ties go to the node earlier in registry order.
    pub fn query_nearest<'r>(&self, registry: &'r NodeRegistry) -> Option<&'r Node> {
        registry
            .nodes()
            .iter()
            .map(|node| (node, node.distance_to_point(self.position)))
            .filter(|(node, dist)| *dist < self.half_size + node.radius)
            .fold(None, |best: Option<(&Node, f64)>, (node, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((node, dist)),
            })
            .map(|(node, _)| node)
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default(), &Viewport::default())
    }
}
