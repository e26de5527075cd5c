//! Seeded RNG wrapper for reproducible coordinate sampling.
//!
//! Drivers and tests draw random waypoints inside a bounding box (e.g. a
//! duration table over random points in a city).  Seeding from a `u64`
//! keeps runs repeatable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{BBox, Coordinate};

pub struct SeededRng(SmallRng);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        SeededRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniformly distributed coordinate inside `bbox` (corners inclusive).
    pub fn coordinate_in(&mut self, bbox: &BBox) -> Coordinate {
        let lon = self.0.gen_range(bbox.bottom_left.lon..=bbox.top_right.lon);
        let lat = self.0.gen_range(bbox.bottom_left.lat..=bbox.top_right.lat);
        Coordinate::new(lon, lat)
    }

    /// `n` coordinates inside `bbox`.
    pub fn coordinates_in(&mut self, bbox: &BBox, n: usize) -> Vec<Coordinate> {
        (0..n).map(|_| self.coordinate_in(bbox)).collect()
    }
}
