//! Synthetic Monaco road network.
//!
//! Eleven hand-placed nodes around the harbour, roughly following the
//! Boulevard Albert 1er / Avenue d'Ostende corridor.  Enough to exercise
//! route and table queries without an OSM extract.

use rc_core::{BBox, Coordinate, NodeId};
use rc_graph::{RoadNetwork, RoadNetworkBuilder};

/// Bounding box used for random table queries.
pub fn monaco_bbox() -> BBox {
    BBox::new(Coordinate::new(7.413194, 43.731056), Coordinate::new(7.421639, 43.735440))
}

fn road(b: &mut RoadNetworkBuilder, x: NodeId, y: NodeId, kmh: f64) {
    let len = b.node_pos(x).distance_m(b.node_pos(y));
    let ms = (len / (kmh / 3.6) * 1_000.0).ceil() as u32;
    b.add_road(x, y, len as f32, ms);
}

fn one_way(b: &mut RoadNetworkBuilder, x: NodeId, y: NodeId, kmh: f64) {
    let len = b.node_pos(x).distance_m(b.node_pos(y));
    let ms = (len / (kmh / 3.6) * 1_000.0).ceil() as u32;
    b.add_directed_edge(x, y, len as f32, ms);
}

pub fn build_network() -> RoadNetwork {
    let mut b = RoadNetworkBuilder::with_capacity(11, 32);

    let fontvieille  = b.add_node(Coordinate::new(7.419758, 43.731142));
    let stade        = b.add_node(Coordinate::new(7.415500, 43.727600));
    let rocher       = b.add_node(Coordinate::new(7.423000, 43.731000));
    let pont_ste_dev = b.add_node(Coordinate::new(7.420300, 43.733200));
    let port_sud     = b.add_node(Coordinate::new(7.422100, 43.734300));
    let rainier_iii  = b.add_node(Coordinate::new(7.419900, 43.735000));
    let condamine    = b.add_node(Coordinate::new(7.418000, 43.735600));
    let ostende      = b.add_node(Coordinate::new(7.423700, 43.737000));
    let albert_1er   = b.add_node(Coordinate::new(7.421200, 43.736200));
    let moneghetti   = b.add_node(Coordinate::new(7.419505, 43.736825));
    let casino       = b.add_node(Coordinate::new(7.427500, 43.739300));

    road(&mut b, fontvieille,  stade,        30.0);
    road(&mut b, fontvieille,  pont_ste_dev, 40.0);
    road(&mut b, fontvieille,  rocher,       20.0);
    road(&mut b, rocher,       port_sud,     20.0);
    road(&mut b, pont_ste_dev, rainier_iii,  40.0);
    road(&mut b, pont_ste_dev, condamine,    30.0);
    road(&mut b, rainier_iii,  condamine,    30.0);
    road(&mut b, rainier_iii,  moneghetti,   30.0);
    road(&mut b, condamine,    moneghetti,   20.0);
    road(&mut b, port_sud,     ostende,      40.0);
    road(&mut b, ostende,      casino,       30.0);
    road(&mut b, albert_1er,   moneghetti,   30.0);

    // Boulevard Albert 1er runs one way along the harbour.
    one_way(&mut b, port_sud,    albert_1er, 50.0);
    one_way(&mut b, albert_1er,  ostende,    50.0);
    one_way(&mut b, rainier_iii, port_sud,   40.0);

    b.build()
}
