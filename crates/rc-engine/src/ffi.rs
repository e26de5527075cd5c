//! C-compatible Foreign Function Interface (FFI) for rc-engine.
//!
//! Mirrors the Rust lifecycle with opaque heap handles so the engine can be
//! driven from C, C++, or Python (via ctypes).
//!
//! # Memory Management
//!
//! - Every `*_construct` (and `rc_route` / `rc_table`) returns a pointer owned
//!   by the caller, or NULL on failure.  The failure cause is logged through
//!   the `log` facade.
//! - Every handle must be released exactly once with its matching
//!   `*_destruct`.  Passing NULL to a destruct function is a no-op.
//! - `rc_engine_construct` only reads the config: the caller still owns it
//!   and may destruct it right away.
//!
//! # Example (C)
//!
//! ```c
//! rc_config_t config = rc_config_construct("monaco.osrm");
//! if (!config) goto config_failure;
//! rc_engine_t engine = rc_engine_construct(config);
//! if (!engine) goto engine_failure;
//! ...
//! engine_failure:
//!   rc_config_destruct(config);
//! config_failure:
//!   return EXIT_FAILURE;
//! ```

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use log::warn;

use crate::{Engine, EngineConfig, RouteQuery, RouteResult, TableQuery, TableResult};

fn into_handle<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// # Safety
/// `handle` must be NULL or a pointer obtained from `into_handle::<T>` that
/// has not been released yet.
unsafe fn release<T>(handle: *mut T) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Construct a default engine config for the dataset at `base_path`.
///
/// # Safety
/// `base_path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_config_construct(base_path: *const c_char) -> *mut EngineConfig {
    if base_path.is_null() {
        warn!("rc_config_construct: base path is NULL");
        return ptr::null_mut();
    }
    let path = match unsafe { CStr::from_ptr(base_path) }.to_str() {
        Ok(s) => s,
        Err(e) => {
            warn!("rc_config_construct: base path is not UTF-8: {e}");
            return ptr::null_mut();
        }
    };
    match EngineConfig::new(path) {
        Ok(config) => into_handle(config),
        Err(e) => {
            warn!("rc_config_construct: {e}");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `config` must be NULL or a live handle from [`rc_config_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_config_destruct(config: *mut EngineConfig) {
    unsafe { release(config) }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Load the dataset described by `config`.
///
/// # Safety
/// `config` must be NULL or a live handle from [`rc_config_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_engine_construct(config: *const EngineConfig) -> *mut Engine {
    let Some(config) = (unsafe { config.as_ref() }) else {
        warn!("rc_engine_construct: config is NULL");
        return ptr::null_mut();
    };
    match Engine::new(config) {
        Ok(engine) => into_handle(engine),
        Err(e) => {
            warn!("rc_engine_construct: {e}");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `engine` must be NULL or a live handle from [`rc_engine_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_engine_destruct(engine: *mut Engine) {
    unsafe { release(engine) }
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn rc_route_params_construct() -> *mut RouteQuery {
    into_handle(RouteQuery::new())
}

/// # Safety
/// `params` must be NULL or a live handle from [`rc_route_params_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route_params_destruct(params: *mut RouteQuery) {
    unsafe { release(params) }
}

/// Append a waypoint.  Ignored when `params` is NULL.
///
/// # Safety
/// `params` must be NULL or a live handle from [`rc_route_params_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route_params_add_coordinate(params: *mut RouteQuery, longitude: f64, latitude: f64) {
    if let Some(params) = unsafe { params.as_mut() } {
        params.add_coordinate(longitude, latitude);
    }
}

/// Run a route query.  Returns NULL if either handle is NULL or no route
/// can be computed.
///
/// # Safety
/// Both arguments must be NULL or live handles of the matching type.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route(engine: *const Engine, params: *const RouteQuery) -> *mut RouteResult {
    let (Some(engine), Some(params)) = (unsafe { engine.as_ref() }, unsafe { params.as_ref() }) else {
        warn!("rc_route: NULL engine or params");
        return ptr::null_mut();
    };
    match engine.route(params) {
        Ok(result) => into_handle(result),
        Err(e) => {
            warn!("rc_route: {e}");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `response` must be NULL or a live handle from [`rc_route`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route_response_destruct(response: *mut RouteResult) {
    unsafe { release(response) }
}

/// Route distance in metres, NaN for a NULL handle.
///
/// # Safety
/// `response` must be NULL or a live handle from [`rc_route`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route_response_distance(response: *const RouteResult) -> f64 {
    unsafe { response.as_ref() }.map_or(f64::NAN, RouteResult::distance)
}

/// Route duration in seconds, NaN for a NULL handle.
///
/// # Safety
/// `response` must be NULL or a live handle from [`rc_route`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_route_response_duration(response: *const RouteResult) -> f64 {
    unsafe { response.as_ref() }.map_or(f64::NAN, RouteResult::duration)
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn rc_table_params_construct() -> *mut TableQuery {
    into_handle(TableQuery::new())
}

/// # Safety
/// `params` must be NULL or a live handle from [`rc_table_params_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_table_params_destruct(params: *mut TableQuery) {
    unsafe { release(params) }
}

/// # Safety
/// `params` must be NULL or a live handle from [`rc_table_params_construct`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_table_params_add_coordinate(params: *mut TableQuery, longitude: f64, latitude: f64) {
    if let Some(params) = unsafe { params.as_mut() } {
        params.add_coordinate(longitude, latitude);
    }
}

/// # Safety
/// Both arguments must be NULL or live handles of the matching type.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_table(engine: *const Engine, params: *const TableQuery) -> *mut TableResult {
    let (Some(engine), Some(params)) = (unsafe { engine.as_ref() }, unsafe { params.as_ref() }) else {
        warn!("rc_table: NULL engine or params");
        return ptr::null_mut();
    };
    match engine.table(params) {
        Ok(result) => into_handle(result),
        Err(e) => {
            warn!("rc_table: {e}");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `response` must be NULL or a live handle from [`rc_table`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_table_response_destruct(response: *mut TableResult) {
    unsafe { release(response) }
}

/// Duration in seconds from coordinate `from` to coordinate `to`.
///
/// Returns `INFINITY` for unreachable pairs and NaN for a NULL handle or an
/// index out of range.
///
/// # Safety
/// `response` must be NULL or a live handle from [`rc_table`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rc_table_response_duration(response: *const TableResult, from: usize, to: usize) -> f64 {
    let Some(table) = (unsafe { response.as_ref() }) else {
        return f64::NAN;
    };
    if from >= table.size() || to >= table.size() {
        return f64::NAN;
    }
    table.duration(from, to).unwrap_or(f64::INFINITY)
}
