//! Engine configuration: which dataset to load and how to query it.
//!
//! Building a config performs no I/O against the dataset; a path that
//! merely looks like a file is accepted and checked when the
//! [`Engine`](crate::Engine) loads it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rc_graph::{AStarRouter, DijkstraRouter, Router};

use crate::ConfigError;

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Search algorithm the engine runs for every leg and table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    /// Great-circle guided search; same results as Dijkstra, fewer settled
    /// nodes on point-to-point legs.
    AStar,
}

impl Algorithm {
    pub(crate) fn router(self) -> Box<dyn Router> {
        match self {
            Algorithm::Dijkstra => Box::new(DijkstraRouter),
            Algorithm::AStar    => Box::new(AStarRouter),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar    => "astar",
        })
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra"       => Ok(Algorithm::Dijkstra),
            "astar" | "a*"   => Ok(Algorithm::AStar),
            _                => Err(ConfigError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Validated engine configuration.
///
/// Construct with [`EngineConfig::new`] for defaults or
/// [`EngineConfig::builder`] to tune limits.  The engine copies what it
/// needs at construction, so a config can be dropped (or reused for
/// another engine) as soon as [`Engine::new`](crate::Engine::new) returns.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    dataset:             PathBuf,
    algorithm:           Algorithm,
    max_locations_route: Option<usize>,
    max_locations_table: Option<usize>,
    max_snap_distance_m: Option<f64>,
}

impl EngineConfig {
    /// Config for the dataset at `dataset` with default tuning: Dijkstra,
    /// no location limits, unlimited snapping radius.
    pub fn new(dataset: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder(dataset).build()
    }

    pub fn builder(dataset: impl AsRef<Path>) -> EngineConfigBuilder {
        EngineConfigBuilder::new(dataset.as_ref().to_path_buf())
    }

    /// Base path of the dataset artifact.
    pub fn dataset(&self) -> &Path {
        &self.dataset
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn max_locations_route(&self) -> Option<usize> {
        self.max_locations_route
    }

    pub fn max_locations_table(&self) -> Option<usize> {
        self.max_locations_table
    }

    pub fn max_snap_distance_m(&self) -> Option<f64> {
        self.max_snap_distance_m
    }
}

// ── EngineConfigBuilder ───────────────────────────────────────────────────────

/// Fluent builder for [`EngineConfig`].
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default          |
/// |-------------------------------|------------------|
/// | `.algorithm(a)`               | `Dijkstra`       |
/// | `.max_locations_route(n)`     | unlimited (≥ 2)  |
/// | `.max_locations_table(n)`     | unlimited (≥ 1)  |
/// | `.max_snap_distance_m(d)`     | unlimited (≥ 0)  |
///
/// # Example
///
/// ```
/// use rc_engine::{Algorithm, EngineConfig};
///
/// let config = EngineConfig::builder("monaco.osrm")
///     .algorithm(Algorithm::AStar)
///     .max_locations_route(25)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_locations_route(), Some(25));
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    dataset:             PathBuf,
    algorithm:           Algorithm,
    max_locations_route: Option<usize>,
    max_locations_table: Option<usize>,
    max_snap_distance_m: Option<f64>,
}

impl EngineConfigBuilder {
    fn new(dataset: PathBuf) -> Self {
        Self {
            dataset,
            algorithm:           Algorithm::default(),
            max_locations_route: None,
            max_locations_table: None,
            max_snap_distance_m: None,
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Maximum number of waypoints accepted by a route query.
    pub fn max_locations_route(mut self, n: usize) -> Self {
        self.max_locations_route = Some(n);
        self
    }

    /// Maximum number of coordinates accepted by a table query.
    pub fn max_locations_table(mut self, n: usize) -> Self {
        self.max_locations_table = Some(n);
        self
    }

    /// Reject waypoints whose nearest road node is farther than `meters`.
    pub fn max_snap_distance_m(mut self, meters: f64) -> Self {
        self.max_snap_distance_m = Some(meters);
        self
    }

    /// Validate inputs and return the config.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        check_dataset_path(&self.dataset)?;

        if let Some(n) = self.max_locations_route {
            check_limit("route locations", n, 2)?;
        }
        if let Some(n) = self.max_locations_table {
            check_limit("table locations", n, 1)?;
        }
        if let Some(d) = self.max_snap_distance_m {
            if !d.is_finite() || d < 0.0 {
                return Err(ConfigError::InvalidSnapDistance(d));
            }
        }

        Ok(EngineConfig {
            dataset:             self.dataset,
            algorithm:           self.algorithm,
            max_locations_route: self.max_locations_route,
            max_locations_table: self.max_locations_table,
            max_snap_distance_m: self.max_snap_distance_m,
        })
    }
}

fn check_dataset_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.is_empty() || raw.to_string_lossy().trim().is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    let ends_with_separator = raw
        .to_string_lossy()
        .chars()
        .next_back()
        .is_some_and(std::path::is_separator);
    if ends_with_separator || path.file_name().is_none() {
        return Err(ConfigError::NotAFilePath(path.to_path_buf()));
    }
    Ok(())
}

fn check_limit(what: &'static str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::InvalidLimit { what, value, min });
    }
    Ok(())
}
