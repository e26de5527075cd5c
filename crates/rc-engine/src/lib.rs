//! `rc-engine` — load a prepared road dataset and answer route queries.
//!
//! # Lifecycle
//!
//! Four owned resources, built in dependency order and released by `Drop`:
//!
//! ```text
//! EngineConfig ──new──▶ Engine ──route(&RouteQuery)──▶ RouteResult
//!                                 ▲
//!              RouteQuery ────────┘
//! ```
//!
//! Every constructor returns a `Result`; a failed step yields nothing to
//! release, and anything built earlier stays valid and is dropped by its
//! owner as usual.  The engine copies what it needs out of the config, so the
//! config may be dropped right after [`Engine::new`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`config`]   | `EngineConfig`, `EngineConfigBuilder`, `Algorithm`        |
//! | [`engine`]   | `Engine` (`route`, `table`)                               |
//! | [`query`]    | `RouteQuery`, `TableQuery`                                |
//! | [`response`] | `RouteResult`, `RouteLeg`, `TableResult`                  |
//! | [`session`]  | `Session` (config + engine in one value)                  |
//! | [`error`]    | the four error kinds and the unified `Error`              |
//! | [`ffi`]      | opaque-handle C ABI (feature = `"ffi"` only)              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Table rows are computed on the rayon thread pool.         |
//! | `ffi`      | Exports `rc_*` C functions.                               |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `rc-core` types.     |

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod response;
pub mod session;

#[cfg(feature = "ffi")]
pub mod ffi;


pub use config::{Algorithm, EngineConfig, EngineConfigBuilder};
pub use engine::{Engine, MIN_ROUTE_LOCATIONS, MIN_TABLE_LOCATIONS};
pub use error::{
    AllocationError, ConfigError, EngineLoadError, EngineResult, Error, ErrorKind, RouteComputeError,
};
pub use query::{RouteQuery, TableQuery};
pub use response::{RouteLeg, RouteResult, TableResult};
pub use session::Session;
