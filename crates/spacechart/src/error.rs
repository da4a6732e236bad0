//! Construction-time failures of the layout engine
//!
//! Record-level problems (unknown cluster, bad weight) are never errors;
//! they are counted in an [`IngestReport`](crate::registry::IngestReport).
//! Only a malformed engine configuration or a misuse of the lifecycle is
//! reported through [`LayoutError`].

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    #[error("cluster anchor mapping is empty")]
    EmptyClusterMap,
    #[error("cluster anchor {label} has a non-finite coordinate")]
    NonFiniteAnchor { label: String },
    #[error("cluster label registered twice: {0}")]
    DuplicateCluster(String),
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error("engine already holds a node set")]
    AlreadyLoaded,
    #[error("engine has been stopped")]
    Stopped,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
