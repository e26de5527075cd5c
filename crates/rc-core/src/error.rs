//! Coordinate validation errors.
//!
//! Coordinates are accepted unchecked wherever they are collected and only
//! validated at the point of use (query evaluation).  Sub-crates wrap
//! `CoordinateError` as one variant of their own error enums.

use thiserror::Error;

/// Why a `(longitude, latitude)` pair is not a usable WGS-84 position.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate ({lon}, {lat}) is not finite")]
    NonFinite { lon: f64, lat: f64 },

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}
