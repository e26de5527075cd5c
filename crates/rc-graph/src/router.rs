//! Routing trait with Dijkstra and A* implementations.
//!
//! # Pluggability
//!
//! `rc-engine` calls routing through the [`Router`] trait and picks the
//! implementation from its configuration, so further algorithms (contraction
//! hierarchies, bidirectional search) slot in without touching the engine.
//!
//! # Cost units
//!
//! Costs are travel time in **milliseconds**, accumulated as `u64` so long
//! multi-leg routes cannot overflow.  [`Path`] also carries the summed edge
//! length in metres for the chosen edges.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rc_core::{EdgeId, NodeId};

use crate::GraphError;
use crate::network::RoadNetwork;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Total cost of reaching one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCost {
    pub travel_ms: u64,
    pub length_m:  f64,
}

impl PathCost {
    pub const ZERO: PathCost = PathCost { travel_ms: 0, length_m: 0.0 };

    pub fn duration_secs(&self) -> f64 {
        self.travel_ms as f64 / 1_000.0
    }
}

/// The result of a point-to-point search: an ordered list of `EdgeId`s and
/// its totals.
#[derive(Debug, Clone)]
pub struct Path {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    pub cost:  PathCost,
}

impl Path {
    pub fn duration_secs(&self) -> f64 {
        self.cost.duration_secs()
    }

    pub fn length_m(&self) -> f64 {
        self.cost.length_m
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path algorithm over a [`RoadNetwork`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: an engine shares its router across
/// rayon workers when computing duration tables in parallel.  All per-query
/// state lives on the stack of the call.
pub trait Router: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Compute the minimum travel-time path from `from` to `to`.
    ///
    /// `from == to` yields an empty path rather than an error.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Path, GraphError>;

    /// Cost of the minimum travel-time path from `from` to every node, or
    /// `None` for unreachable nodes.  Indexed by `NodeId`.
    fn costs_from(&self, network: &RoadNetwork, from: NodeId) -> Result<Vec<Option<PathCost>>, GraphError> {
        check_node(network, from)?;
        Ok(one_to_all(network, from))
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Path, GraphError> {
        search(network, from, to, |_| 0)
    }
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* search with a great-circle heuristic.
///
/// The heuristic is `haversine(node, target) / fastest_mps`, floored to whole
/// milliseconds.  `fastest_mps` is the highest straight-line speed any edge
/// in the network allows, which makes the heuristic consistent, so A* returns
/// the same travel time as Dijkstra while settling fewer nodes.  Networks
/// without a usable speed bound fall back to plain Dijkstra.
pub struct AStarRouter;

impl Router for AStarRouter {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Path, GraphError> {
        check_node(network, to)?;
        let Some(speed) = network.fastest_mps else {
            return search(network, from, to, |_| 0);
        };
        let target = network.node_pos[to.index()];
        search(network, from, to, |n| {
            let d = network.node_pos[n.index()].distance_m(target);
            (d / speed * 1_000.0).floor() as u64
        })
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

fn check_node(network: &RoadNetwork, node: NodeId) -> Result<(), GraphError> {
    if network.contains(node) { Ok(()) } else { Err(GraphError::NodeNotFound(node)) }
}

/// Best-first search ordered by `g + h`.  With `h ≡ 0` this is Dijkstra.
fn search<H>(network: &RoadNetwork, from: NodeId, to: NodeId, heuristic: H) -> Result<Path, GraphError>
where
    H: Fn(NodeId) -> u64,
{
    check_node(network, from)?;
    check_node(network, to)?;

    if from == to {
        return Ok(Path { edges: vec![], cost: PathCost::ZERO });
    }

    let n = network.node_count();
    // dist[v] = best known travel time (ms) to reach v.
    let mut dist      = vec![u64::MAX; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap on (priority, node).  Secondary key NodeId ensures
    // deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((heuristic(from), from)));

    while let Some(Reverse((priority, node))) = heap.pop() {
        let cost = priority - heuristic(node);

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        if node == to {
            return Ok(reconstruct(network, &prev_edge, to, cost));
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(network.edge_travel_ms[edge.index()] as u64);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost.saturating_add(heuristic(neighbor)), neighbor)));
            }
        }
    }

    Err(GraphError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    to: NodeId,
    travel_ms: u64,
) -> Path {
    let mut edges = Vec::new();
    let mut length_m = 0.0f64;
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        length_m += network.edge_length_m[e.index()] as f64;
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Path { edges, cost: PathCost { travel_ms, length_m } }
}

/// Exhaustive Dijkstra from `from`, carrying the length of the tree path
/// alongside its travel time.
fn one_to_all(network: &RoadNetwork, from: NodeId) -> Vec<Option<PathCost>> {
    let n = network.node_count();
    let mut dist   = vec![u64::MAX; n];
    let mut length = vec![0.0f64; n];

    dist[from.index()] = 0;

    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(network.edge_travel_ms[edge.index()] as u64);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                length[neighbor.index()] = length[node.index()] + network.edge_length_m[edge.index()] as f64;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    dist.into_iter()
        .zip(length)
        .map(|(travel_ms, length_m)| (travel_ms != u64::MAX).then_some(PathCost { travel_ms, length_m }))
        .collect()
}
