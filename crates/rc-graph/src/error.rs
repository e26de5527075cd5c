//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use rc_core::NodeId;

/// Errors produced by `rc-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("dataset file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("dataset {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("dataset {path}: format {found:?} is not supported (expected {expected:?})")]
    Incompatible {
        path:     PathBuf,
        found:    String,
        expected: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}
