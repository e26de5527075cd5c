//! Unit tests for rc-graph.
//!
//! All tests use a hand-crafted network so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use rc_core::{Coordinate, NodeId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Build a small grid network for testing.
    ///
    /// Nodes (lon, lat), ~110 m apart:
    ///   3:(0,.001)         4:(.002,.001)
    ///   0:(0,0)  1:(.001,0)  2:(.002,0)
    ///
    /// Undirected edges: 0-1, 1-2, 0-3, 2-4, 3-4
    ///
    /// Shortest path 0→4 (by travel time):
    ///   0→1→2→4 (30 s)  vs  0→3→4 (60 s)
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(Coordinate::new(0.000, 0.000));
        let n1 = b.add_node(Coordinate::new(0.001, 0.000));
        let n2 = b.add_node(Coordinate::new(0.002, 0.000));
        let n3 = b.add_node(Coordinate::new(0.000, 0.001));
        let n4 = b.add_node(Coordinate::new(0.002, 0.001));

        // Edge: (from, to, length_m, travel_ms)
        b.add_road(n0, n1, 120.0, 10_000); // 10 s
        b.add_road(n1, n2, 120.0, 10_000); // 10 s
        b.add_road(n2, n4, 120.0, 10_000); // 10 s
        b.add_road(n0, n3, 500.0, 50_000); // 50 s  (long slow road)
        b.add_road(n3, n4, 250.0, 10_000); // 10 s

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rc_core::Coordinate;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.fastest_mps.is_none());
    }

    #[test]
    fn single_road() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(7.41, 43.73));
        let c = b.add_node(Coordinate::new(7.41, 43.74));
        b.add_road(a, c, 1_000.0, 75_000);
        let net = b.build();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2); // bidirectional
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();

        assert_eq!(net.out_edges(n1).count(), 2);
        assert_eq!(net.out_edges(n0).count(), 2); // n0→n1, n0→n3
        assert_eq!(net.out_edges(n2).count(), 2); // n2→n1, n2→n4
        assert_eq!(net.out_edges(n3).count(), 2); // n3→n0, n3→n4
        assert_eq!(net.out_edges(n4).count(), 2); // n4→n2, n4→n3
    }

    #[test]
    fn out_edges_source_correctness() {
        let (net, [n0, n1, _, _, _]) = super::helpers::grid_network();
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e.index()], n0);
        }
        assert!(net.out_edges(n0).any(|e| net.edge_to[e.index()] == n1));
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(0.0, 0.0));
        let c = b.add_node(Coordinate::new(0.001, 0.0));
        b.add_directed_edge(a, c, 100.0, 10_000);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_edges(a).count(), 1);
        assert_eq!(net.out_edges(c).count(), 0); // no return edge
    }

    #[test]
    fn fastest_speed_uses_longest_reach() {
        let (net, _) = super::helpers::grid_network();
        // 3-4 covers 250 m in 10 s.
        let v = net.fastest_mps.unwrap();
        assert!((v - 25.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn zero_time_edge_disables_speed_bound() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(0.0, 0.0));
        let c = b.add_node(Coordinate::new(0.001, 0.0));
        b.add_road(a, c, 100.0, 0);
        assert!(b.build().fastest_mps.is_none());
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use rc_core::Coordinate;
    use crate::RoadNetworkBuilder;

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let snap = net.snap(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(snap.node, n0);
        assert!(snap.distance_m < 1e-6);
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.snap(Coordinate::new(0.0004, 0.0)).unwrap().node, n0);
        assert_eq!(net.snap(Coordinate::new(0.0006, 0.0)).unwrap().node, n1);
    }

    #[test]
    fn snap_reports_distance() {
        let (net, [_, n1, ..]) = super::helpers::grid_network();
        let snap = net.snap(Coordinate::new(0.001, 0.0002)).unwrap();
        assert_eq!(snap.node, n1);
        assert_eq!(snap.location, net.node_pos[n1.index()]);
        // 0.0002° latitude ≈ 22 m
        assert!((snap.distance_m - 22.2).abs() < 0.5, "got {}", snap.distance_m);
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap(Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn ranks_by_ground_distance_not_degrees() {
        // At 43.73° N a degree of longitude is ~80 km, a degree of latitude
        // ~111 km.  `east` is farther in degrees but nearer on the ground.
        let mut b = RoadNetworkBuilder::new();
        let east  = b.add_node(Coordinate::new(7.4206, 43.7300));
        let north = b.add_node(Coordinate::new(7.4200, 43.7305));
        b.add_road(east, north, 80.0, 8_000);
        let net = b.build();

        let snap = net.snap(Coordinate::new(7.42, 43.73)).unwrap();
        assert_eq!(snap.node, east);
        assert!(snap.distance_m < 50.0, "got {}", snap.distance_m);
    }

    #[test]
    fn nearest_in_long_row() {
        // Far north, where degree ranking and ground ranking diverge most.
        let mut b = RoadNetworkBuilder::new();
        let ids: Vec<_> = (0..100)
            .map(|i| b.add_node(Coordinate::new(7.0 + i as f64 * 0.001, 60.0)))
            .collect();
        let net = b.build();
        let snap = net.snap(Coordinate::new(7.0502, 60.0)).unwrap();
        assert_eq!(snap.node, ids[50]);
    }

    #[test]
    fn debug_reports_dimensions() {
        let (net, _) = super::helpers::grid_network();
        let text = format!("{net:?}");
        assert!(text.contains("nodes: 5") && text.contains("edges: 10"), "{text}");
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rc_core::{Coordinate, NodeId};
    use crate::{AStarRouter, DijkstraRouter, GraphError, RoadNetworkBuilder, Router};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let p = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(p.edges.is_empty());
        assert_eq!(p.duration_secs(), 0.0);
        assert_eq!(p.length_m(), 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let path = DijkstraRouter.route(&net, n0, n4).unwrap();

        assert_eq!(path.duration_secs(), 30.0);
        assert_eq!(path.length_m(), 360.0);
        assert_eq!(path.edges.len(), 3);

        assert_eq!(net.edge_from[path.edges[0].index()], n0);
        assert_eq!(net.edge_to[path.edges[0].index()], n1);
        assert_eq!(net.edge_to[path.edges[1].index()], n2);
        assert_eq!(net.edge_to[path.edges[2].index()], n4);
    }

    #[test]
    fn astar_matches_dijkstra() {
        let (net, nodes) = super::helpers::grid_network();
        for &a in &nodes {
            for &b in &nodes {
                let d = DijkstraRouter.route(&net, a, b).unwrap();
                let s = AStarRouter.route(&net, a, b).unwrap();
                assert_eq!(d.cost.travel_ms, s.cost.travel_ms, "{a} → {b}");
            }
        }
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(0.0, 0.0));
        let c = b.add_node(Coordinate::new(0.0, 0.001));
        let net = b.build();
        assert!(matches!(DijkstraRouter.route(&net, a, c), Err(GraphError::NoRoute { .. })));
        assert!(matches!(AStarRouter.route(&net, a, c), Err(GraphError::NoRoute { .. })));
    }

    #[test]
    fn unknown_node_rejected() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert!(matches!(
            DijkstraRouter.route(&net, n0, NodeId(99)),
            Err(GraphError::NodeNotFound(NodeId(99)))
        ));
        assert!(matches!(
            AStarRouter.costs_from(&net, NodeId(99)),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(0.0, 0.0));
        let c = b.add_node(Coordinate::new(0.001, 0.0));
        b.add_directed_edge(a, c, 100.0, 10_000);
        let net = b.build();

        assert!(DijkstraRouter.route(&net, a, c).is_ok());
        assert!(DijkstraRouter.route(&net, c, a).is_err());
    }

    #[test]
    fn costs_from_agrees_with_point_queries() {
        let (net, nodes) = super::helpers::grid_network();
        let costs = DijkstraRouter.costs_from(&net, nodes[0]).unwrap();
        assert_eq!(costs.len(), net.node_count());
        for &n in &nodes {
            let p = DijkstraRouter.route(&net, nodes[0], n).unwrap();
            let c = costs[n.index()].unwrap();
            assert_eq!(c.travel_ms, p.cost.travel_ms);
            assert_eq!(c.length_m, p.cost.length_m);
        }
    }

    #[test]
    fn costs_from_marks_unreachable() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Coordinate::new(0.0, 0.0));
        let c = b.add_node(Coordinate::new(0.001, 0.0));
        let island = b.add_node(Coordinate::new(0.01, 0.01));
        b.add_road(a, c, 100.0, 9_000);
        let net = b.build();
        let costs = DijkstraRouter.costs_from(&net, a).unwrap();
        assert_eq!(costs[a.index()].unwrap().travel_ms, 0);
        assert_eq!(costs[c.index()].unwrap().travel_ms, 9_000);
        assert!(costs[island.index()].is_none());
    }
}

// ── Dataset files ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod dataset {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::{DatasetPaths, DijkstraRouter, GraphError, Router, read_dataset, write_dataset};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn write_grid(dir: &Path) -> PathBuf {
        let (net, _) = super::helpers::grid_network();
        let base = dir.join("grid.osrm");
        write_dataset(&net, &base).unwrap();
        base
    }

    #[test]
    fn paths_share_base() {
        let p = DatasetPaths::new(Path::new("data/monaco.osrm"));
        assert_eq!(p.manifest, Path::new("data/monaco.osrm"));
        assert_eq!(p.nodes, Path::new("data/monaco.osrm.nodes"));
        assert_eq!(p.edges, Path::new("data/monaco.osrm.edges"));
    }

    #[test]
    fn written_dataset_loads_with_same_routes() {
        let dir = tmp();
        let base = write_grid(dir.path());
        let (orig, [n0, .., n4]) = super::helpers::grid_network();

        let loaded = read_dataset(&base).unwrap();
        assert_eq!(loaded.node_count(), orig.node_count());
        assert_eq!(loaded.edge_count(), orig.edge_count());
        assert_eq!(loaded.node_pos, orig.node_pos);

        let p = DijkstraRouter.route(&loaded, n0, n4).unwrap();
        assert_eq!(p.duration_secs(), 30.0);
    }

    #[test]
    fn missing_file_reported() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::remove_file(DatasetPaths::new(&base).edges).unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::MissingFile(p)) if p.ends_with("grid.osrm.edges")));

        let absent = dir.path().join("nothing.osrm");
        assert!(matches!(read_dataset(&absent), Err(GraphError::MissingFile(_))));
    }

    #[test]
    fn wrong_version_is_incompatible() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,99,5,10\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Incompatible { .. })));

        fs::write(&base, "format,version,node_count,edge_count\nosrm-ch,1,5,10\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Incompatible { .. })));
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,1,6,10\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Malformed { .. })));
    }

    #[test]
    fn huge_declared_counts_are_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,1,4000000000,4000000000\n").unwrap();
        let err = read_dataset(&base).unwrap_err();
        assert!(matches!(err, GraphError::Malformed { .. }), "{err}");
        assert!(err.to_string().contains("4000000000"), "{err}");
    }

    #[test]
    fn extra_rows_are_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,1,2,10\n").unwrap();
        let err = read_dataset(&base).unwrap_err();
        assert!(err.to_string().contains("more nodes"), "{err}");
    }

    #[test]
    fn empty_manifest_is_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Malformed { .. })));
    }

    #[test]
    fn dangling_edge_is_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        let edges = DatasetPaths::new(&base).edges;
        let mut text = fs::read_to_string(&edges).unwrap();
        text.push_str("0,17,10.0,1000\n");
        fs::write(&edges, text).unwrap();
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,1,5,11\n").unwrap();

        let err = read_dataset(&base).unwrap_err();
        assert!(matches!(err, GraphError::Malformed { .. }));
        assert!(err.to_string().contains("NodeId(17)"), "{err}");
    }

    #[test]
    fn garbage_rows_are_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(DatasetPaths::new(&base).nodes, "lon,lat\nabc,def\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Malformed { .. })));
    }

    #[test]
    fn out_of_range_node_is_malformed() {
        let dir = tmp();
        let base = write_grid(dir.path());
        fs::write(&base, "format,version,node_count,edge_count\nrc-dataset,1,1,0\n").unwrap();
        fs::write(DatasetPaths::new(&base).nodes, "lon,lat\n200.0,43.7\n").unwrap();
        fs::write(DatasetPaths::new(&base).edges, "from,to,length_m,travel_ms\n").unwrap();
        assert!(matches!(read_dataset(&base), Err(GraphError::Malformed { .. })));
    }
}
