//! Query parameter types.
//!
//! Both queries are pure accumulators: coordinates are appended in call
//! order and stored unchecked.  Range, finiteness, and count validation
//! happen when the engine evaluates the query.

use rc_core::Coordinate;

use crate::AllocationError;

/// Ordered, append-only coordinate list shared by both query types.
#[derive(Debug, Clone, Default, PartialEq)]
struct Waypoints(Vec<Coordinate>);

impl Waypoints {
    fn with_capacity(n: usize) -> Result<Self, AllocationError> {
        let mut v = Vec::new();
        v.try_reserve_exact(n)
            .map_err(|source| AllocationError { requested: n, source })?;
        Ok(Self(v))
    }

    #[inline]
    fn push(&mut self, lon: f64, lat: f64) {
        self.0.push(Coordinate::new(lon, lat));
    }
}

// ── RouteQuery ────────────────────────────────────────────────────────────────

/// One route request: waypoints visited in insertion order.
///
/// ```
/// use rc_engine::RouteQuery;
///
/// let mut query = RouteQuery::new();
/// query
///     .add_coordinate(7.419758, 43.731142)
///     .add_coordinate(7.419505, 43.736825);
/// assert_eq!(query.len(), 2);
/// assert_eq!(query.coordinates()[0].lon, 7.419758);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteQuery {
    waypoints: Waypoints,
}

impl RouteQuery {
    /// Empty query.  Does not allocate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty query with room for `n` waypoints reserved up front.
    pub fn with_capacity(n: usize) -> Result<Self, AllocationError> {
        Ok(Self { waypoints: Waypoints::with_capacity(n)? })
    }

    /// Append a waypoint (longitude first) to the end of the route.
    pub fn add_coordinate(&mut self, lon: f64, lat: f64) -> &mut Self {
        self.waypoints.push(lon, lat);
        self
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.waypoints.0
    }

    pub fn len(&self) -> usize {
        self.waypoints.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.0.is_empty()
    }
}

impl Extend<Coordinate> for RouteQuery {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        for c in iter {
            self.add_coordinate(c.lon, c.lat);
        }
    }
}

impl FromIterator<Coordinate> for RouteQuery {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut q = RouteQuery::new();
        q.extend(iter);
        q
    }
}

// ── TableQuery ────────────────────────────────────────────────────────────────

/// A symmetric many-to-many request: every coordinate is both a source and a
/// destination.  Insertion order fixes row and column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableQuery {
    waypoints: Waypoints,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Result<Self, AllocationError> {
        Ok(Self { waypoints: Waypoints::with_capacity(n)? })
    }

    pub fn add_coordinate(&mut self, lon: f64, lat: f64) -> &mut Self {
        self.waypoints.push(lon, lat);
        self
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.waypoints.0
    }

    pub fn len(&self) -> usize {
        self.waypoints.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.0.is_empty()
    }
}

impl Extend<Coordinate> for TableQuery {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        for c in iter {
            self.add_coordinate(c.lon, c.lat);
        }
    }
}

impl FromIterator<Coordinate> for TableQuery {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut q = TableQuery::new();
        q.extend(iter);
        q
    }
}
