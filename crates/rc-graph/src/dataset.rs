//! Prepared dataset artifact: reading and writing.
//!
//! # File set
//!
//! A dataset is named by a base path `P` (conventionally `<region>.osrm`)
//! and consists of three CSV files:
//!
//! | File        | Header                                  | Rows                          |
//! |-------------|-----------------------------------------|-------------------------------|
//! | `P`         | `format,version,node_count,edge_count`  | exactly one                   |
//! | `P.nodes`   | `lon,lat`                               | one per node, row = `NodeId`  |
//! | `P.edges`   | `from,to,length_m,travel_ms`            | one per directed edge         |
//!
//! ```csv
//! format,version,node_count,edge_count
//! rc-dataset,1,2,2
//! ```
//!
//! The manifest is checked first so an artifact from an incompatible
//! producer is rejected before the bulk files are parsed.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use rc_core::{Coordinate, NodeId};

use crate::GraphError;
use crate::network::{RoadNetwork, RoadNetworkBuilder};

/// Value of the manifest's `format` column.
pub const DATASET_FORMAT: &str = "rc-dataset";

/// Manifest version this build reads and writes.
pub const DATASET_VERSION: u32 = 1;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct ManifestRecord {
    format:     String,
    version:    u32,
    node_count: usize,
    edge_count: usize,
}

#[derive(Serialize, Deserialize)]
struct NodeRecord {
    lon: f64,
    lat: f64,
}

#[derive(Serialize, Deserialize)]
struct EdgeRecord {
    from:      u32,
    to:        u32,
    length_m:  f32,
    travel_ms: u32,
}

// ── Paths ─────────────────────────────────────────────────────────────────────

/// The three files making up the dataset at one base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub manifest: PathBuf,
    pub nodes:    PathBuf,
    pub edges:    PathBuf,
}

impl DatasetPaths {
    pub fn new(base: &Path) -> Self {
        Self {
            manifest: base.to_path_buf(),
            nodes:    with_suffix(base, ".nodes"),
            edges:    with_suffix(base, ".edges"),
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Load the dataset at `base` into a fully built [`RoadNetwork`].
///
/// # Errors
///
/// - [`GraphError::MissingFile`] if any of the three files is absent.
/// - [`GraphError::Incompatible`] if the manifest names another format or
///   version.
/// - [`GraphError::Malformed`] on unparsable rows, counts that disagree with
///   the manifest, dangling node references, or invalid values.
pub fn read_dataset(base: &Path) -> Result<RoadNetwork, GraphError> {
    let paths = DatasetPaths::new(base);
    for p in [&paths.manifest, &paths.nodes, &paths.edges] {
        if !p.is_file() {
            return Err(GraphError::MissingFile(p.clone()));
        }
    }

    let manifest = read_manifest(&paths.manifest)?;
    debug!(
        "dataset manifest {}: {} nodes, {} edges",
        paths.manifest.display(),
        manifest.node_count,
        manifest.edge_count
    );

    // Declared counts are untrusted until the rows are read; no pre-sizing.
    let mut builder = RoadNetworkBuilder::new();
    read_nodes(&paths.nodes, manifest.node_count, &mut builder)?;
    read_edges(&paths.edges, manifest.edge_count, &mut builder)?;

    let network = builder.build();
    info!(
        "loaded dataset {} ({} nodes, {} edges)",
        base.display(),
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

fn malformed(path: &Path, reason: impl Into<String>) -> GraphError {
    GraphError::Malformed { path: path.to_path_buf(), reason: reason.into() }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, GraphError> {
    let file = File::open(path)?;
    Ok(csv::Reader::from_reader(file))
}

fn read_manifest(path: &Path) -> Result<ManifestRecord, GraphError> {
    let mut rdr = open_reader(path)?;
    let mut rows = rdr.deserialize::<ManifestRecord>();

    let manifest = match rows.next() {
        Some(row) => row.map_err(|e| malformed(path, e.to_string()))?,
        None => return Err(malformed(path, "manifest has no rows")),
    };

    if manifest.format != DATASET_FORMAT || manifest.version != DATASET_VERSION {
        return Err(GraphError::Incompatible {
            path:     path.to_path_buf(),
            found:    format!("{} v{}", manifest.format, manifest.version),
            expected: format!("{DATASET_FORMAT} v{DATASET_VERSION}"),
        });
    }
    if rows.next().is_some() {
        return Err(malformed(path, "manifest has more than one row"));
    }
    if manifest.node_count > u32::MAX as usize || manifest.edge_count > u32::MAX as usize {
        return Err(malformed(path, "counts exceed the 32-bit id space"));
    }
    Ok(manifest)
}

fn read_nodes(path: &Path, expected: usize, builder: &mut RoadNetworkBuilder) -> Result<(), GraphError> {
    let mut rdr = open_reader(path)?;
    for (row, result) in rdr.deserialize::<NodeRecord>().enumerate() {
        let rec = result.map_err(|e| malformed(path, e.to_string()))?;
        if row >= expected {
            return Err(malformed(path, format!("more nodes than the {expected} the manifest declares")));
        }
        let pos = Coordinate::new(rec.lon, rec.lat);
        pos.validate()
            .map_err(|e| malformed(path, format!("node {row}: {e}")))?;
        builder.add_node(pos);
    }
    if builder.node_count() != expected {
        return Err(malformed(
            path,
            format!("{} nodes, manifest declares {expected}", builder.node_count()),
        ));
    }
    Ok(())
}

fn read_edges(path: &Path, expected: usize, builder: &mut RoadNetworkBuilder) -> Result<(), GraphError> {
    let node_count = builder.node_count();
    let mut rdr = open_reader(path)?;
    for (row, result) in rdr.deserialize::<EdgeRecord>().enumerate() {
        let rec = result.map_err(|e| malformed(path, e.to_string()))?;
        if row >= expected {
            return Err(malformed(path, format!("more edges than the {expected} the manifest declares")));
        }
        for id in [rec.from, rec.to] {
            if id as usize >= node_count {
                return Err(malformed(path, format!("edge {row}: {} does not exist", NodeId(id))));
            }
        }
        if !rec.length_m.is_finite() || rec.length_m < 0.0 {
            return Err(malformed(path, format!("edge {row}: invalid length {}", rec.length_m)));
        }
        builder.add_directed_edge(NodeId(rec.from), NodeId(rec.to), rec.length_m, rec.travel_ms);
    }
    if builder.edge_count() != expected {
        return Err(malformed(
            path,
            format!("{} edges, manifest declares {expected}", builder.edge_count()),
        ));
    }
    Ok(())
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write `network` as a dataset at `base`, replacing any existing files.
pub fn write_dataset(network: &RoadNetwork, base: &Path) -> Result<(), GraphError> {
    let paths = DatasetPaths::new(base);

    let mut nodes = csv::Writer::from_path(&paths.nodes)?;
    for pos in &network.node_pos {
        nodes.serialize(NodeRecord { lon: pos.lon, lat: pos.lat })?;
    }
    nodes.flush()?;

    let mut edges = csv::Writer::from_path(&paths.edges)?;
    for i in 0..network.edge_count() {
        edges.serialize(EdgeRecord {
            from:      network.edge_from[i].0,
            to:        network.edge_to[i].0,
            length_m:  network.edge_length_m[i],
            travel_ms: network.edge_travel_ms[i],
        })?;
    }
    edges.flush()?;

    // Manifest goes last so it only exists once both bulk files are complete.
    let mut manifest = csv::Writer::from_path(&paths.manifest)?;
    manifest.serialize(ManifestRecord {
        format:     DATASET_FORMAT.to_owned(),
        version:    DATASET_VERSION,
        node_count: network.node_count(),
        edge_count: network.edge_count(),
    })?;
    manifest.flush()?;

    info!("wrote dataset {}", base.display());
    Ok(())
}
