//! Clustered force-directed layout for a game catalog chart.
//!
//! Each game becomes a circle sized by its player count. Circles are pulled
//! toward their genre's anchor, pushed apart by many-body repulsion, kept
//! from overlapping by a collision pass, and framed by a halo per genre.
//! A small probe can be steered around the chart to find the node under it.
//!
//! The engine is headless and tick-driven: the host calls
//! [`Simulation::tick`] once per frame and draws the returned [`TickEvent`].

pub mod cluster;
pub mod collisions;
pub mod config;
pub mod error;
pub mod event;
pub mod forces;
pub mod halo;
pub mod integrator;
pub mod node;
pub mod probe;
pub mod quadtree;
pub mod registry;
pub mod scale;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod cluster_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod node_test;
#[cfg(test)]
mod registry_test;
#[cfg(test)]
mod state_test;

pub use cluster::{Cluster, ClusterAnchors, ClusterId};
pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use event::{HaloFrame, NodeFrame, ProbeReport, TickEvent};
pub use node::{GameRecord, Node, NodeId};
pub use probe::Direction;
pub use registry::{IngestReport, NodeRegistry};
pub use simulation::Simulation;
pub use state::Status;
