//! The loaded, queryable routing engine.
//!
//! # Query pipeline
//!
//! Route and table queries share the same front half:
//!
//! 1. count check against the query minimum and the configured limit,
//! 2. per-coordinate validation (finite, WGS-84 range),
//! 3. snapping every coordinate to its nearest road node.
//!
//! Routes then run the configured [`Router`] once per consecutive waypoint
//! pair; tables run one exhaustive search per source.  All per-query state is
//! local to the call, so an `Engine` answers any number of queries through
//! `&self` without reloading.

use std::fmt;
use std::path::PathBuf;

use log::debug;

use rc_core::Coordinate;
use rc_graph::{GraphError, PathCost, RoadNetwork, Router, Snap, read_dataset};

use crate::config::{Algorithm, EngineConfig};
use crate::query::{RouteQuery, TableQuery};
use crate::response::{RouteLeg, RouteResult, TableResult};
use crate::{EngineLoadError, RouteComputeError};

/// Minimum waypoints for a route query.
pub const MIN_ROUTE_LOCATIONS: usize = 2;

/// Minimum coordinates for a table query.
pub const MIN_TABLE_LOCATIONS: usize = 1;

pub struct Engine {
    network:             RoadNetwork,
    router:              Box<dyn Router>,
    algorithm:           Algorithm,
    dataset:             PathBuf,
    max_locations_route: Option<usize>,
    max_locations_table: Option<usize>,
    max_snap_distance_m: Option<f64>,
}

impl Engine {
    /// Load the dataset named by `config` and return a ready engine.
    ///
    /// The whole network (CSR arrays and spatial index) is built before this
    /// returns; on error nothing is kept.  `config` is only read.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineLoadError> {
        let network = read_dataset(config.dataset())
            .map_err(|e| EngineLoadError::from_graph(config.dataset(), e))?;

        debug!(
            "engine ready: {} ({} nodes, {} edges, {})",
            config.dataset().display(),
            network.node_count(),
            network.edge_count(),
            config.algorithm()
        );

        Ok(Self {
            network,
            router:              config.algorithm().router(),
            algorithm:           config.algorithm(),
            dataset:             config.dataset().to_path_buf(),
            max_locations_route: config.max_locations_route(),
            max_locations_table: config.max_locations_table(),
            max_snap_distance_m: config.max_snap_distance_m(),
        })
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    // ── Route ─────────────────────────────────────────────────────────────

    /// Compute the fastest route visiting the query's waypoints in order.
    ///
    /// # Errors
    ///
    /// - [`RouteComputeError::TooFewCoordinates`] for fewer than two waypoints.
    /// - [`RouteComputeError::TooManyCoordinates`] above the configured limit.
    /// - [`RouteComputeError::InvalidCoordinate`] for a non-finite or
    ///   out-of-range waypoint.
    /// - [`RouteComputeError::NoSegment`] when a waypoint cannot be snapped.
    /// - [`RouteComputeError::NoRoute`] when any consecutive pair is
    ///   disconnected.
    pub fn route(&self, query: &RouteQuery) -> Result<RouteResult, RouteComputeError> {
        let coords = query.coordinates();
        check_count(coords.len(), MIN_ROUTE_LOCATIONS, self.max_locations_route)?;
        let snaps = self.snap_all(coords)?;

        let legs = snaps
            .windows(2)
            .enumerate()
            .map(|(leg, pair)| {
                self.router
                    .route(&self.network, pair[0].node, pair[1].node)
                    .map(|path| RouteLeg { distance: path.length_m(), duration: path.duration_secs() })
                    .map_err(|e| match e {
                        GraphError::NoRoute { .. } => RouteComputeError::NoRoute { leg },
                        other => RouteComputeError::Internal(other),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let result = RouteResult::new(legs, snaps);
        debug!(
            "route over {} waypoints via {}: {:.1} m, {:.1} s",
            coords.len(),
            self.router.name(),
            result.distance(),
            result.duration()
        );
        Ok(result)
    }

    // ── Table ─────────────────────────────────────────────────────────────

    /// Compute the symmetric duration/distance matrix over the query's
    /// coordinates.  Unreachable pairs are `None`, not an error.
    pub fn table(&self, query: &TableQuery) -> Result<TableResult, RouteComputeError> {
        let coords = query.coordinates();
        check_count(coords.len(), MIN_TABLE_LOCATIONS, self.max_locations_table)?;
        let snaps = self.snap_all(coords)?;
        let n = snaps.len();

        let rows = self.table_rows(&snaps)?;

        let mut durations = Vec::with_capacity(n * n);
        let mut distances = Vec::with_capacity(n * n);
        for row in rows {
            for cell in row {
                durations.push(cell.map(|c| c.duration_secs()));
                distances.push(cell.map(|c| c.length_m));
            }
        }

        debug!("table {n}x{n} via {}", self.router.name());
        Ok(TableResult::new(n, durations, distances))
    }

    #[cfg(not(feature = "parallel"))]
    fn table_rows(&self, snaps: &[Snap]) -> Result<Vec<Vec<Option<PathCost>>>, RouteComputeError> {
        snaps.iter().map(|s| self.table_row(s, snaps)).collect()
    }

    #[cfg(feature = "parallel")]
    fn table_rows(&self, snaps: &[Snap]) -> Result<Vec<Vec<Option<PathCost>>>, RouteComputeError> {
        use rayon::prelude::*;

        snaps.par_iter().map(|s| self.table_row(s, snaps)).collect()
    }

    fn table_row(&self, source: &Snap, snaps: &[Snap]) -> Result<Vec<Option<PathCost>>, RouteComputeError> {
        let costs = self
            .router
            .costs_from(&self.network, source.node)
            .map_err(RouteComputeError::Internal)?;
        Ok(snaps.iter().map(|t| costs[t.node.index()]).collect())
    }

    // ── Shared front half ─────────────────────────────────────────────────

    fn snap_all(&self, coords: &[Coordinate]) -> Result<Vec<Snap>, RouteComputeError> {
        coords
            .iter()
            .enumerate()
            .map(|(index, &c)| {
                c.validate()
                    .map_err(|source| RouteComputeError::InvalidCoordinate { index, source })?;
                let snap = self
                    .network
                    .snap(c)
                    .ok_or(RouteComputeError::NoSegment { index, coordinate: c })?;
                match self.max_snap_distance_m {
                    Some(max) if snap.distance_m > max => {
                        Err(RouteComputeError::NoSegment { index, coordinate: c })
                    }
                    _ => Ok(snap),
                }
            })
            .collect()
    }
}

fn check_count(got: usize, min: usize, max: Option<usize>) -> Result<(), RouteComputeError> {
    if got < min {
        return Err(RouteComputeError::TooFewCoordinates { got, min });
    }
    if let Some(max) = max {
        if got > max {
            return Err(RouteComputeError::TooManyCoordinates { got, max });
        }
    }
    Ok(())
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("dataset", &self.dataset)
            .field("algorithm", &self.algorithm)
            .field("nodes", &self.network.node_count())
            .field("edges", &self.network.edge_count())
            .field("max_locations_route", &self.max_locations_route)
            .field("max_locations_table", &self.max_locations_table)
            .field("max_snap_distance_m", &self.max_snap_distance_m)
            .finish()
    }
}
