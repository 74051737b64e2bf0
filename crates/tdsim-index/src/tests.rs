use tdsim_core::{geohash_encode, TaxiId, VertexId};
use tdsim_network::{dijkstra, EdgeId, RoadNetwork};

use crate::index::SpatioTemporalDatabase;

const PRECISION: u8 = 5;
const AVG_SPEED: f64 = 7.0;

const SF_LAT: f64 = 37.7749;
const SF_LON: f64 = -122.4194;
const LDN_LAT: f64 = 51.5074;
const LDN_LON: f64 = -0.1278;

fn sf_hash() -> String {
    geohash_encode(SF_LAT, SF_LON, PRECISION)
}

fn ldn_hash() -> String {
    geohash_encode(LDN_LAT, LDN_LON, PRECISION)
}

/// Two vertices in San Francisco (same cell) connected to one vertex in
/// London (a different cell), with no return edge.
fn two_cell_network() -> RoadNetwork {
    let mut net = RoadNetwork::new(PRECISION);
    net.add_vertex(VertexId(0), SF_LAT, SF_LON);
    net.add_vertex(VertexId(1), SF_LAT + 0.0001, SF_LON - 0.0001);
    net.add_vertex(VertexId(2), LDN_LAT, LDN_LON);

    net.add_edge(EdgeId(0), VertexId(0), VertexId(1), 5.0);
    net.add_edge(EdgeId(1), VertexId(1), VertexId(2), 100_000.0);
    net
}

fn built_database(net: &RoadNetwork) -> SpatioTemporalDatabase {
    let mut db = SpatioTemporalDatabase::new();
    db.load_road_network(net);
    db.determine_anchor(net);
    db.compute_distance_matrix(net, AVG_SPEED);
    db.construct_static_list();
    db
}

#[test]
fn load_road_network_buckets_vertices_by_geohash() {
    let net = two_cell_network();
    let db = built_database(&net);

    assert_eq!(db.grid.len(), 2);
    assert_eq!(db.grid[&sf_hash()].vertices.len(), 2);
    assert_eq!(db.grid[&ldn_hash()].vertices.len(), 1);
}

#[test]
fn determine_anchor_picks_a_vertex_in_the_cell() {
    let net = two_cell_network();
    let db = built_database(&net);

    let sf_anchor = db.grid[&sf_hash()].anchor.expect("sf cell has vertices");
    assert!(sf_anchor == VertexId(0) || sf_anchor == VertexId(1));

    let ldn_anchor = db.grid[&ldn_hash()].anchor.expect("london cell has vertices");
    assert_eq!(ldn_anchor, VertexId(2));
}

#[test]
fn self_distance_is_zero() {
    let net = two_cell_network();
    let db = built_database(&net);

    let mc = db.grid_distance_matrix[&sf_hash()][&sf_hash()];
    assert_eq!(mc.d, 0.0);
    assert_eq!(mc.t, 0.0);
}

#[test]
fn unreachable_cell_pair_falls_back_to_straight_distance_over_speed() {
    // SF -> London has no return edge, so single-source Dijkstra from the
    // London anchor never reaches the SF anchor.
    let net = two_cell_network();
    let db = built_database(&net);

    let mc = db.grid_distance_matrix[&ldn_hash()][&sf_hash()];
    assert!((mc.t - mc.d / AVG_SPEED).abs() < 1e-9);
}

#[test]
fn spatial_grid_list_is_sorted_ascending_with_self_first() {
    let net = two_cell_network();
    let db = built_database(&net);

    let list = &db.grid[&sf_hash()].spatial_grid_list;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].0, sf_hash());
    assert_eq!(list[0].1, 0.0);
    assert!(list[0].1 <= list[1].1);
}

#[test]
fn map_match_picks_closest_vertex_in_same_cell() {
    let net = two_cell_network();
    let db = built_database(&net);

    let query_loc = tdsim_core::Location::new(SF_LAT, SF_LON, PRECISION);
    let matched = db.map_match(&query_loc, &net).expect("sf cell has vertices");
    assert_eq!(matched, VertexId(0));
}

#[test]
fn map_match_fails_on_a_cell_with_no_vertices() {
    let net = two_cell_network();
    let db = built_database(&net);

    // The antimeridian is far from both San Francisco and London.
    let empty_cell_loc = tdsim_core::Location::new(0.0, 179.9, PRECISION);
    assert!(db.map_match(&empty_cell_loc, &net).is_none());
}

#[test]
fn update_taxi_list_only_records_cell_boundary_crossings() {
    let net = two_cell_network();
    let mut db = built_database(&net);

    let route = dijkstra(&net, VertexId(0), VertexId(2));
    assert_eq!(route.vertices, vec![VertexId(0), VertexId(1), VertexId(2)]);

    db.update_taxi_list(100.0, TaxiId(7), &route, &net, AVG_SPEED);

    // Never left the SF cell on the first edge, so no entry should appear there.
    assert!(!db.grid[&sf_hash()].taxi_list.contains_key(&TaxiId(7)));

    let expected_arrival = 100.0 + (5.0 + 100_000.0) / AVG_SPEED;
    let actual = db.grid[&ldn_hash()].taxi_list[&TaxiId(7)];
    assert!((actual - expected_arrival).abs() < 1e-6);
}

#[test]
fn init_dynamic_info_registers_each_taxi_in_its_starting_cell() {
    let net = two_cell_network();
    let mut db = built_database(&net);

    let sf_loc = tdsim_core::Location::new(SF_LAT, SF_LON, PRECISION);
    let taxis = vec![(TaxiId(1), &sf_loc)];
    db.init_dynamic_info(taxis, 9 * 3600.0);

    assert_eq!(db.grid[&sf_hash()].taxi_list[&TaxiId(1)], 9.0 * 3600.0);
}
