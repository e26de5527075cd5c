//! One-call convenience wrapper around config, engine, and queries.
//!
//! ```no_run
//! use rc_core::Coordinate;
//! use rc_engine::Session;
//!
//! let session = Session::open("monaco.osrm")?;
//! let route = session.route(&[
//!     Coordinate::new(7.419758, 43.731142),
//!     Coordinate::new(7.419505, 43.736825),
//! ])?;
//! println!("{:.0} m, {:.0} s", route.distance(), route.duration());
//! # Ok::<(), rc_engine::Error>(())
//! ```

use std::path::Path;

use rc_core::Coordinate;

use crate::{Engine, EngineConfig, EngineResult, RouteQuery, RouteResult, TableQuery, TableResult};

#[derive(Debug)]
pub struct Session {
    engine: Engine,
}

impl Session {
    /// Build a default config for `dataset` and load it.  The config does not
    /// outlive this call.
    pub fn open(dataset: impl AsRef<Path>) -> EngineResult<Self> {
        let config = EngineConfig::new(dataset)?;
        Self::with_config(&config)
    }

    pub fn with_config(config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self { engine: Engine::new(config)? })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Route through `waypoints` in order.
    pub fn route(&self, waypoints: &[Coordinate]) -> EngineResult<RouteResult> {
        let mut query = RouteQuery::with_capacity(waypoints.len())?;
        query.extend(waypoints.iter().copied());
        Ok(self.engine.route(&query)?)
    }

    /// Symmetric duration table over `coordinates`.
    pub fn table(&self, coordinates: &[Coordinate]) -> EngineResult<TableResult> {
        let mut query = TableQuery::with_capacity(coordinates.len())?;
        query.extend(coordinates.iter().copied());
        Ok(self.engine.table(&query)?)
    }
}
