//! `rc-graph` — road network, spatial snapping, routing, and dataset files.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, `Snap`  |
//! | [`router`]  | `Router` trait, `Path`, `DijkstraRouter`, `AStarRouter`     |
//! | [`dataset`] | `read_dataset` / `write_dataset` (CSV artifact)             |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `GraphError`                                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF import via the `osmpbf` crate.               |
//! | `serde` | Derives `Serialize`/`Deserialize` on `rc-core` types.        |

pub mod dataset;
pub mod error;
pub mod network;
pub mod router;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use dataset::{DATASET_FORMAT, DATASET_VERSION, DatasetPaths, read_dataset, write_dataset};
pub use error::GraphError;
pub use network::{RoadNetwork, RoadNetworkBuilder, Snap};
pub use router::{AStarRouter, DijkstraRouter, Path, PathCost, Router};
