//! `rc-core` — foundational types for the `rc` routing client.
//!
//! This crate is a dependency of every other `rc-*` crate.  It intentionally
//! has no `rc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `Coordinate` (lon, lat), haversine distance, `BBox`   |
//! | [`rng`]         | `SeededRng` for reproducible coordinate sampling      |
//! | [`error`]       | `CoordinateError`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::CoordinateError;
pub use geo::{BBox, Coordinate};
pub use ids::{EdgeId, NodeId};
pub use rng::SeededRng;
