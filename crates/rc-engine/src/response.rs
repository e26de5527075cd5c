//! Immutable query results.

use rc_graph::Snap;

// ── RouteResult ───────────────────────────────────────────────────────────────

/// Metrics for travel between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    /// Metres.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

/// Outcome of one route query.
///
/// Totals are the sums over [`legs`](Self::legs); there is exactly one leg
/// per consecutive waypoint pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    distance:  f64,
    duration:  f64,
    legs:      Vec<RouteLeg>,
    waypoints: Vec<Snap>,
}

impl RouteResult {
    pub(crate) fn new(legs: Vec<RouteLeg>, waypoints: Vec<Snap>) -> Self {
        let distance = legs.iter().map(|l| l.distance).sum();
        let duration = legs.iter().map(|l| l.duration).sum();
        Self { distance, duration, legs, waypoints }
    }

    /// Total path length in metres, always ≥ 0.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total estimated travel time in seconds, always ≥ 0.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Where each requested waypoint was matched onto the road graph, in
    /// query order.
    pub fn waypoints(&self) -> &[Snap] {
        &self.waypoints
    }
}

// ── TableResult ───────────────────────────────────────────────────────────────

/// Square duration/distance matrix, row = source, column = destination.
///
/// Unreachable pairs hold `None`; the diagonal is always `Some(0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableResult {
    size:      usize,
    durations: Vec<Option<f64>>,
    distances: Vec<Option<f64>>,
}

impl TableResult {
    pub(crate) fn new(size: usize, durations: Vec<Option<f64>>, distances: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(durations.len(), size * size);
        debug_assert_eq!(distances.len(), size * size);
        Self { size, durations, distances }
    }

    /// Number of rows (= columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Travel time in seconds from coordinate `from` to coordinate `to`.
    ///
    /// `None` if no route exists or either index is out of range.
    pub fn duration(&self, from: usize, to: usize) -> Option<f64> {
        self.cell(from, to).and_then(|i| self.durations[i])
    }

    /// Path length in metres along the fastest route from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.cell(from, to).and_then(|i| self.distances[i])
    }

    /// Duration rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> + '_ {
        self.durations.chunks(self.size.max(1))
    }

    fn cell(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.size && to < self.size).then(|| from * self.size + to)
    }
}
