//! Grid cells: the spatial buckets keyed by geohash string that the index
//! partitions the road network and the taxi fleet into.

use std::collections::{HashMap, HashSet};

use tdsim_core::{geohash_decode, Location, TaxiId, VertexId};

/// One geohash cell of the grid.
#[derive(Clone, Debug)]
pub struct GridCell {
    pub geohash: String,
    /// Decoded center of the geohash cell (not any particular vertex).
    pub center: Location,
    /// Vertex closest to `center`, chosen once the road network is loaded.
    pub anchor: Option<VertexId>,
    pub vertices: HashSet<VertexId>,

    /// Other cells ordered by ascending great-circle distance from this one.
    pub spatial_grid_list: Vec<(String, f64)>,
    /// Other cells ordered by ascending travel time from this one.
    pub temporal_grid_list: Vec<(String, f64)>,

    /// `{taxi_id -> predicted arrival time in this cell}`.
    pub taxi_list: HashMap<TaxiId, f64>,
}

impl GridCell {
    pub fn new(geohash: String, precision: u8) -> Self {
        let (lat, lon) = geohash_decode(&geohash);
        Self {
            geohash,
            center: Location::new(lat, lon, precision),
            anchor: None,
            vertices: HashSet::new(),
            spatial_grid_list: Vec::new(),
            temporal_grid_list: Vec::new(),
            taxi_list: HashMap::new(),
        }
    }

    pub fn num_vertex(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_taxi(&self) -> usize {
        self.taxi_list.len()
    }

    pub fn add_taxi(&mut self, taxi_id: TaxiId, t_arrive: f64) {
        self.taxi_list.insert(taxi_id, t_arrive);
    }

    pub fn remove_taxi(&mut self, taxi_id: TaxiId) {
        self.taxi_list.remove(&taxi_id);
    }
}

/// `(d, t)`: the great-circle distance and predicted travel time between two
/// cells' anchors, in meters and seconds respectively.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatrixCell {
    pub d: f64,
    pub t: f64,
}
