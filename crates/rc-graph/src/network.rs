//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_travel_ms`)
//! are sorted by source node and indexed by `EdgeId`.  Iteration over a
//! node's outgoing edges is therefore a contiguous memory scan.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[lon, lat]` supplies snap candidates, which
//! are then ranked by great-circle distance.  Used at query time to snap
//! waypoints onto the road graph.

use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rc_core::{Coordinate, EdgeId, NodeId};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lon, lat]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lon, lat]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lon/lat space.  Candidate order only;
    /// [`RoadNetwork::snap`] re-ranks by haversine.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

// ── Snap ──────────────────────────────────────────────────────────────────────

/// A waypoint matched onto the road graph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snap {
    pub node: NodeId,
    /// Position of `node`.
    pub location: Coordinate,
    /// Great-circle distance from the requested position to `location`.
    pub distance_m: f64,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// All fields except the index are `pub` for direct indexed access on hot
/// paths.  Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coordinate>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but required for
    /// path reconstruction (trace `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f32>,

    /// Travel time in milliseconds.  This is the cost every router minimises.
    pub edge_travel_ms: Vec<u32>,

    /// Highest straight-line speed (m/s) any edge allows, used to bound the
    /// A* heuristic.  `None` when the network has no edges or an edge covers
    /// distance in zero time.
    pub fastest_mps: Option<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// Contiguous index range, no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Match `pos` to the road node with the smallest great-circle distance.
    ///
    /// The R-tree yields candidates in lon/lat order; they are re-ranked by
    /// haversine until no later candidate can be closer.  Returns `None` only
    /// if the network has no nodes.
    pub fn snap(&self, pos: Coordinate) -> Option<Snap> {
        let mut best: Option<Snap> = None;
        let candidates = self
            .spatial_idx
            .nearest_neighbor_iter_with_distance_2(&[pos.lon, pos.lat])
            .take(SNAP_CANDIDATES);

        for (entry, d2) in candidates {
            if let Some(b) = &best {
                if degree_lower_bound_m(pos, d2.sqrt()) > b.distance_m {
                    break;
                }
            }
            let location = self.node_pos[entry.id.index()];
            let distance_m = pos.distance_m(location);
            if best.as_ref().is_none_or(|b| distance_m < b.distance_m) {
                best = Some(Snap { node: entry.id, location, distance_m });
            }
        }
        best
    }
}

/// Most R-tree candidates examined by one snap.
const SNAP_CANDIDATES: usize = 32;

/// Metres per degree of arc on the sphere used by `Coordinate::distance_m`.
const METRES_PER_DEGREE: f64 = 6_371_000.0 * std::f64::consts::PI / 180.0;

/// Smallest ground distance a node `deg` degrees (lon/lat Euclidean) away
/// from `pos` can have.  Longitude shrinks by `cos(lat)`, taken at the most
/// polar latitude such a node can sit at.
fn degree_lower_bound_m(pos: Coordinate, deg: f64) -> f64 {
    let polar = (pos.lat.abs() + deg).min(90.0);
    METRES_PER_DEGREE * deg * polar.to_radians().cos()
}

impl fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadNetwork")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("fastest_mps", &self.fastest_mps)
            .finish()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges by source node, constructs the CSR arrays, and bulk-loads the
/// R-tree.
///
/// # Example
///
/// ```
/// use rc_core::Coordinate;
/// use rc_graph::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(Coordinate::new(7.4197, 43.7311));
/// let c = b.add_node(Coordinate::new(7.4195, 43.7368));
/// b.add_road(a, c, 640.0, 58_000); // 640 m, 58 s travel → 58_000 ms
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<Coordinate>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:       NodeId,
    to:         NodeId,
    length_m:   f32,
    travel_ms:  u32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading a dataset.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Coordinate) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// - `length_m`: physical length in metres.
    /// - `travel_ms`: travel time in milliseconds (the routing cost).
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f32, travel_ms: u32) {
        self.raw_edges.push(RawEdge { from, to, length_m, travel_ms });
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f32, travel_ms: u32) {
        self.add_directed_edge(a, b, length_m, travel_ms);
        self.add_directed_edge(b, a, length_m, travel_ms);
    }

    /// Look up the position of a node added earlier (used by loaders to
    /// compute edge lengths between adjacent way nodes).
    pub fn node_pos(&self, id: NodeId) -> Coordinate {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps the insertion order of parallel edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:  Vec<f32>    = raw.iter().map(|e| e.length_m).collect();
        let edge_travel_ms: Vec<u32>    = raw.iter().map(|e| e.travel_ms).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let fastest_mps = fastest_speed(&self.nodes, &raw);

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lon, pos.lat],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_ms,
            fastest_mps,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fastest straight-line progress any edge permits.  Taking the larger of the
/// stored length and the endpoint separation keeps `distance / speed` a lower
/// bound on the remaining travel time for every node.
fn fastest_speed(nodes: &[Coordinate], edges: &[RawEdge]) -> Option<f64> {
    let mut fastest: f64 = 0.0;
    for e in edges {
        let span = nodes[e.from.index()].distance_m(nodes[e.to.index()]);
        let reach = span.max(e.length_m as f64);
        if e.travel_ms == 0 {
            if reach > 0.0 {
                return None;
            }
            continue;
        }
        fastest = fastest.max(reach / (e.travel_ms as f64 / 1_000.0));
    }
    (fastest > 0.0).then_some(fastest)
}
