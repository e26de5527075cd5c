//! OSM PBF import, enabled with the `osm` Cargo feature.
//!
//! This is the preprocessing step that turns a raw extract into something
//! [`write_dataset`](crate::write_dataset) can persist for the engine.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rc_graph::{osm::load_from_pbf, write_dataset};
//!
//! let network = load_from_pbf(Path::new("monaco-latest.osm.pbf"))?;
//! write_dataset(&network, Path::new("monaco.osrm"))?;
//! ```
//!
//! # What is loaded
//!
//! Only drivable `highway=*` ways are included (see [`car_speed_mps`]).
//! All other features (footways, buildings, POIs, relations) are ignored.
//! One-way roads add a single directed edge; two-way roads add both directions.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in an `FxHashMap<i64, Coordinate>` for
//! the first pass (needed because ways reference node IDs by OSM integer ID).
//! The map is freed before the R-tree is built.

use std::path::Path;

use log::info;
use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};

use rc_core::{Coordinate, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::GraphError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Build a road network from an OSM PBF file.
///
/// Only car-drivable roads are included.  Use
/// [`RoadNetworkBuilder`] directly for non-OSM sources.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] when the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> Result<RoadNetwork, GraphError> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, Coordinate> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(
                    n.id(),
                    Coordinate::new(n.lon(), n.lat()),
                );
            }
            Element::DenseNode(n) => {
                all_nodes.insert(
                    n.id(),
                    Coordinate::new(n.lon(), n.lat()),
                );
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(speed_mps) = highway.and_then(car_speed_mps) {
                    let oneway = is_oneway(highway.unwrap_or(""), &tags);
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, speed_mps, oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: FxHashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    // Pre-allocate: ~2× road nodes for edges (rough estimate).
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Map OSM node IDs → our NodeIds, adding only road-relevant nodes.
    let mut osm_to_rc: FxHashMap<i64, NodeId> = FxHashMap::default();
    osm_to_rc.reserve(road_node_ids.len());

    // Sorted so node numbering is reproducible across runs.
    let mut ordered: Vec<i64> = road_node_ids.iter().copied().collect();
    ordered.sort_unstable();

    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            let rc_id = builder.add_node(pos);
            osm_to_rc.insert(osm_id, rc_id);
        }
    }

    // Free the full node map.
    drop(all_nodes);
    drop(road_node_ids);

    // Add directed edges from way node sequences.
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(&from), Some(&to)) =
                (osm_to_rc.get(&osm_a), osm_to_rc.get(&osm_b))
            {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to)) as f32;
                let travel_ms = (len_m / way.speed_mps * 1_000.0).ceil() as u32;

                builder.add_directed_edge(from, to, len_m, travel_ms);
                if !way.oneway {
                    builder.add_directed_edge(to, from, len_m, travel_ms);
                }
            }
        }
    }

    let network = builder.build();
    info!(
        "imported {} ({} nodes, {} edges)",
        path.display(),
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:      Vec<i64>,
    speed_mps: f32,
    oneway:    bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// Return the assumed car speed (m/s) for a road class, or `None` if this
/// `highway` value is not drivable by car.
///
/// Table speeds are in km/h; `maxspeed` tags are not read.
fn car_speed_mps(highway: &str) -> Option<f32> {
    let kmh: f32 = match highway {
        "motorway"                          => 90.0,
        "motorway_link"                     => 45.0,
        "trunk"                             => 85.0,
        "trunk_link"                        => 40.0,
        "primary"                           => 65.0,
        "primary_link"                      => 30.0,
        "secondary"                         => 55.0,
        "secondary_link"                    => 25.0,
        "tertiary"                          => 40.0,
        "tertiary_link"                     => 20.0,
        "unclassified" | "residential"      => 25.0,
        "service"                           => 15.0,
        "living_street"                     => 10.0,
        // Explicitly non-car:
        "footway" | "path" | "cycleway" | "bridleway"
        | "pedestrian" | "steps" | "track"
        | "construction" | "proposed"       => return None,
        // Unknown road type: drivable at residential speed.
        _                                   => 25.0,
    };
    Some(kmh / 3.6)
}

/// Determine whether a way should be treated as one-way for car traffic.
///
/// Motorways, motorway links, and roundabouts are implicitly one-way in OSM
/// convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let roundabout = tags.iter().any(|(k, v)| *k == "junction" && *v == "roundabout");
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || roundabout || implicit
}
