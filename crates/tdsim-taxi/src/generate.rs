//! Deterministic taxi fleet generation.

use std::collections::HashMap;

use tdsim_core::TaxiId;
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::RoadNetwork;

use crate::taxi::Taxi;

/// Place `num_taxi` taxis across the road network, proportional to each grid
/// cell's share of total vertices.
///
/// For determinism, cells are visited in ascending geohash order and, within
/// a cell, vertices in ascending id order (the original iterates Python
/// `dict`s, whose order is incidental; this port makes the same outcome
/// reproducible without changing the counting formula).
pub fn gen_taxi(database: &SpatioTemporalDatabase, network: &RoadNetwork, num_taxi: u32, speed: f64, capacity: u32) -> HashMap<TaxiId, Taxi> {
    let mut taxi_set = HashMap::with_capacity(num_taxi as usize);
    let total_num_vertex = network.vertex_count() as f64;
    let mut identifier: u32 = 0;

    let mut geohashes: Vec<&String> = database.grid.keys().collect();
    geohashes.sort();

    for geohash in geohashes {
        let cell = &database.grid[geohash];
        let num_vertex = cell.vertices.len();
        let num_taxi_in_cell = ((num_vertex as f64 / total_num_vertex) * num_taxi as f64).round() as usize;
        if num_taxi_in_cell == 0 {
            continue;
        }

        let mut vertex_ids: Vec<_> = cell.vertices.iter().copied().collect();
        vertex_ids.sort();

        for &v_id in vertex_ids.iter().take(num_taxi_in_cell) {
            let location = network.get_vertex(v_id).expect("cell only holds known vertex ids").location;
            let taxi = Taxi::new(TaxiId(identifier), location, v_id, speed, capacity);
            taxi_set.insert(TaxiId(identifier), taxi);
            identifier += 1;
        }
    }

    taxi_set
}
