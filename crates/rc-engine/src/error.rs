//! Error taxonomy for the engine contract.
//!
//! Each fallible step has its own error type so callers can branch on the
//! exact stage that failed:
//!
//! | Type                  | Raised by                                        |
//! |-----------------------|--------------------------------------------------|
//! | [`ConfigError`]       | [`EngineConfig`](crate::EngineConfig) building   |
//! | [`EngineLoadError`]   | [`Engine::new`](crate::Engine::new)              |
//! | [`AllocationError`]   | `with_capacity` on query types                   |
//! | [`RouteComputeError`] | [`Engine::route`](crate::Engine::route), [`Engine::table`](crate::Engine::table) |
//!
//! [`Error`] unifies all four for callers that only propagate.

use std::collections::TryReserveError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use rc_core::{Coordinate, CoordinateError};
use rc_graph::GraphError;

// ── ConfigError ───────────────────────────────────────────────────────────────

/// Invalid or unusable configuration input.  No I/O has happened yet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("dataset path is empty")]
    EmptyPath,

    #[error("dataset path {0:?} does not name a file")]
    NotAFilePath(PathBuf),

    #[error("{what} limit {value} is below the minimum of {min}")]
    InvalidLimit {
        what:  &'static str,
        value: usize,
        min:   usize,
    },

    #[error("snap distance {0} m must be finite and non-negative")]
    InvalidSnapDistance(f64),

    #[error("unknown algorithm {0:?} (expected \"dijkstra\" or \"astar\")")]
    UnknownAlgorithm(String),
}

// ── EngineLoadError ───────────────────────────────────────────────────────────

/// The dataset is missing, corrupt, or incompatible.
#[derive(Debug, Error)]
pub enum EngineLoadError {
    #[error("dataset file {0} not found")]
    Missing(PathBuf),

    #[error("dataset {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("dataset {path} is incompatible: found {found}, expected {expected}")]
    Incompatible {
        path:     PathBuf,
        found:    String,
        expected: String,
    },

    #[error("I/O error reading dataset: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineLoadError {
    /// Classify a dataset reader failure for the dataset at `base`.
    pub(crate) fn from_graph(base: &Path, err: GraphError) -> Self {
        match err {
            GraphError::MissingFile(p) => EngineLoadError::Missing(p),
            GraphError::Malformed { path, reason } => EngineLoadError::Malformed { path, reason },
            GraphError::Incompatible { path, found, expected } => {
                EngineLoadError::Incompatible { path, found, expected }
            }
            GraphError::Io(e) => EngineLoadError::Io(e),
            other => EngineLoadError::Malformed {
                path:   base.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

// ── AllocationError ───────────────────────────────────────────────────────────

/// Pure resource exhaustion, unrelated to the input data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot reserve space for {requested} coordinates")]
pub struct AllocationError {
    pub requested: usize,
    #[source]
    pub source: TryReserveError,
}

// ── RouteComputeError ─────────────────────────────────────────────────────────

/// A query could not be answered.  No partial result is produced.
#[derive(Debug, Error)]
pub enum RouteComputeError {
    #[error("query has {got} coordinates, at least {min} required")]
    TooFewCoordinates { got: usize, min: usize },

    #[error("query has {got} coordinates, engine allows at most {max}")]
    TooManyCoordinates { got: usize, max: usize },

    #[error("coordinate {index} is invalid: {source}")]
    InvalidCoordinate {
        index: usize,
        #[source]
        source: CoordinateError,
    },

    #[error("coordinate {index} {coordinate} could not be matched to a road")]
    NoSegment { index: usize, coordinate: Coordinate },

    #[error("no route connects waypoint {leg} to the following waypoint")]
    NoRoute { leg: usize },

    #[error("routing failure: {0}")]
    Internal(GraphError),
}

// ── Unified error ─────────────────────────────────────────────────────────────

/// Which stage of the contract failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    EngineLoad,
    Allocation,
    RouteCompute,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::Config       => "ConfigError",
            ErrorKind::EngineLoad   => "EngineLoadError",
            ErrorKind::Allocation   => "AllocationError",
            ErrorKind::RouteCompute => "RouteComputeError",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("engine load error: {0}")]
    EngineLoad(#[from] EngineLoadError),

    #[error("allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("route compute error: {0}")]
    RouteCompute(#[from] RouteComputeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_)       => ErrorKind::Config,
            Error::EngineLoad(_)   => ErrorKind::EngineLoad,
            Error::Allocation(_)   => ErrorKind::Allocation,
            Error::RouteCompute(_) => ErrorKind::RouteCompute,
        }
    }
}

pub type EngineResult<T> = Result<T, Error>;
