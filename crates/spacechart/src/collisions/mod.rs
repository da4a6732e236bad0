//! Collision detection and resolution between node circles
//!
//! Detection finds overlapping pairs; resolution relaxes them apart.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod detection_test;

pub use detection::{check_pair, CollisionDetector, DirectDetector, Overlap, TreeDetector};
pub use resolution::{resolve_overlaps, CollisionResolver};
