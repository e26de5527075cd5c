//! Geographic coordinate type and spatial utilities.
//!
//! `Coordinate` stores **longitude first**, matching the order callers supply
//! waypoints in.  Values are `f64` decimal degrees; no range checking happens
//! at construction, see [`Coordinate::validate`].

use crate::CoordinateError;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check that both components are finite and inside the WGS-84 ranges
    /// (longitude in [-180, 180], latitude in [-90, 90]).
    pub fn validate(self) -> Result<(), CoordinateError> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(CoordinateError::NonFinite { lon: self.lon, lat: self.lat });
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(CoordinateError::LongitudeOutOfRange(self.lon));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError::LatitudeOutOfRange(self.lat));
        }
        Ok(())
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy is well within a metre at city scale, which is all snapping
    /// and the A* heuristic need.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

impl From<(f64, f64)> for Coordinate {
    /// `(lon, lat)` tuple.
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

// ── BBox ──────────────────────────────────────────────────────────────────────

/// Axis-aligned lon/lat rectangle, corners inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub bottom_left: Coordinate,
    pub top_right:   Coordinate,
}

impl BBox {
    pub fn new(bottom_left: Coordinate, top_right: Coordinate) -> Self {
        Self { bottom_left, top_right }
    }
}
