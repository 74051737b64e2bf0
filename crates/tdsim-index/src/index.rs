//! The spatio-temporal database: the grid of cells, their precomputed
//! distance matrix, and the dynamic per-cell taxi lists.

use std::collections::HashMap;
use std::fs;
use std::path::Path as FsPath;

use tdsim_core::{great_circle_distance, Location, TaxiId, VertexId};
use tdsim_network::{construct_path, single_source_dijkstra, Path as RoutePath, RoadNetwork};

use crate::error::IndexResult;
use crate::grid::{GridCell, MatrixCell};

/// Grid of geohash cells plus their precomputed distance matrix.
///
/// Construction order matches the original phases exactly:
/// [`load_road_network`](Self::load_road_network) →
/// [`determine_anchor`](Self::determine_anchor) →
/// [`compute_distance_matrix`](Self::compute_distance_matrix) →
/// [`construct_static_list`](Self::construct_static_list) →
/// [`init_dynamic_info`](Self::init_dynamic_info).
#[derive(Clone, Debug, Default)]
pub struct SpatioTemporalDatabase {
    pub grid: HashMap<String, GridCell>,
    pub grid_distance_matrix: HashMap<String, HashMap<String, MatrixCell>>,
}

impl SpatioTemporalDatabase {
    pub fn new() -> Self {
        Self { grid: HashMap::new(), grid_distance_matrix: HashMap::new() }
    }

    /// Phase 1: scan every vertex, bucket it into its geohash cell, creating
    /// the cell on first sight.
    pub fn load_road_network(&mut self, network: &RoadNetwork) {
        let precision = network.geohash_precision();
        for v_id in network.vertex_ids() {
            let vertex = network.get_vertex(v_id).expect("vertex_ids() yields only present vertices");
            let geohash = vertex.location.geohash_str().to_string();
            self.grid
                .entry(geohash.clone())
                .or_insert_with(|| GridCell::new(geohash, precision))
                .vertices
                .insert(v_id);
        }
    }

    /// Phase 2: pick, per cell, the vertex closest to the cell's decoded
    /// center.
    pub fn determine_anchor(&mut self, network: &RoadNetwork) {
        for cell in self.grid.values_mut() {
            let mut anchor = None;
            let mut min_dis = f64::INFINITY;
            for &v_id in &cell.vertices {
                let vertex = network.get_vertex(v_id).expect("cell only holds known vertex ids");
                let dis = great_circle_distance(vertex.location, cell.center);
                if dis < min_dis {
                    anchor = Some(v_id);
                    min_dis = dis;
                }
            }
            cell.anchor = anchor;
        }
    }

    /// Phase 3 (offline/cacheable): single-source Dijkstra from every cell's
    /// anchor, filling in the `(d, t)` matrix entry for every ordered cell
    /// pair.
    pub fn compute_distance_matrix(&mut self, network: &RoadNetwork, average_speed_mps: f64) {
        let geohashes: Vec<String> = self.grid.keys().cloned().collect();

        for i in &geohashes {
            let anchor_i = match self.grid[i].anchor {
                Some(a) => a,
                None => continue, // cell with no vertices; never produced by load_road_network
            };
            let anchor_i_loc = network.get_vertex(anchor_i).unwrap().location;
            let came_from = single_source_dijkstra(network, anchor_i);

            let mut row = HashMap::with_capacity(geohashes.len());
            for j in &geohashes {
                let anchor_j = match self.grid[j].anchor {
                    Some(a) => a,
                    None => continue,
                };
                let anchor_j_loc = network.get_vertex(anchor_j).unwrap().location;
                let d = great_circle_distance(anchor_i_loc, anchor_j_loc);

                let shortest_path = construct_path(network, anchor_i, anchor_j, &came_from);
                let t = if shortest_path.is_empty() {
                    d / average_speed_mps
                } else {
                    shortest_path.distance / average_speed_mps
                };

                row.insert(j.clone(), MatrixCell { d, t });
            }
            self.grid_distance_matrix.insert(i.clone(), row);
        }
    }

    /// Phase 4: derive `spatial_grid_list`/`temporal_grid_list` from the
    /// distance matrix, ascending, ties broken by geohash string order.
    pub fn construct_static_list(&mut self) {
        for (i, row) in &self.grid_distance_matrix {
            let mut spatial: Vec<(String, f64)> = row.iter().map(|(j, mc)| (j.clone(), mc.d)).collect();
            spatial.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then_with(|| a.0.cmp(&b.0)));

            let mut temporal: Vec<(String, f64)> = row.iter().map(|(j, mc)| (j.clone(), mc.t)).collect();
            temporal.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then_with(|| a.0.cmp(&b.0)));

            if let Some(cell) = self.grid.get_mut(i) {
                cell.spatial_grid_list = spatial;
                cell.temporal_grid_list = temporal;
            }
        }
    }

    /// Phase 5: register every taxi's starting cell with its spawn time.
    pub fn init_dynamic_info<'a>(&mut self, taxis: impl IntoIterator<Item = (TaxiId, &'a Location)>, start_time: f64) {
        for (taxi_id, location) in taxis {
            if let Some(cell) = self.grid.get_mut(location.geohash_str()) {
                cell.add_taxi(taxi_id, start_time);
            }
        }
    }

    /// Dynamic maintenance: record a taxi's predicted future cell-crossing
    /// times along a freshly computed route. Does not touch the taxi's
    /// *current* cell membership — that is updated by taxi motion itself
    /// whenever the taxi actually crosses a cell boundary.
    pub fn update_taxi_list(&mut self, timestamp: f64, taxi_id: TaxiId, route: &RoutePath, network: &RoadNetwork, average_speed_mps: f64) {
        if route.is_empty() {
            return;
        }

        let mut cur_vid = route.vertices[0];
        let mut cur_geohash = network.get_vertex(cur_vid).unwrap().location.geohash_str().to_string();
        let mut dis = 0.0;

        for &e_id in &route.edges {
            let edge = network.get_edge(e_id).unwrap();
            let end_vid = edge.end;
            let next_geohash = network.get_vertex(end_vid).unwrap().location.geohash_str().to_string();
            dis += edge.weight;

            if next_geohash != cur_geohash {
                if let Some(cell) = self.grid.get_mut(&next_geohash) {
                    cell.add_taxi(taxi_id, timestamp + dis / average_speed_mps);
                }
                cur_vid = end_vid;
                cur_geohash = next_geohash;
            }
        }
        let _ = cur_vid;
    }

    /// Find the vertex in `location`'s own geohash cell closest to it. Yields
    /// `None` if the cell holds no vertices (map-match failure, §7).
    pub fn map_match(&self, location: &Location, network: &RoadNetwork) -> Option<VertexId> {
        let cell = self.grid.get(location.geohash_str())?;

        let mut matched = None;
        let mut min_dis = f64::INFINITY;
        for &v_id in &cell.vertices {
            let vertex = network.get_vertex(v_id)?;
            let dis = great_circle_distance(vertex.location, *location);
            if dis < min_dis {
                matched = Some(v_id);
                min_dis = dis;
            }
        }
        matched
    }

    /// Load a previously computed grid distance matrix from a JSON cache
    /// file, skipping the `O(|cells|^2)` recomputation.
    pub fn load_distance_matrix_cache(path: &FsPath) -> IndexResult<HashMap<String, HashMap<String, MatrixCell>>> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Persist the current grid distance matrix as a JSON cache file.
    pub fn save_distance_matrix_cache(&self, path: &FsPath) -> IndexResult<()> {
        let bytes = serde_json::to_vec(&self.grid_distance_matrix)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
