//! Fluent builder for constructing a [`Sim`].

use std::collections::{HashMap, VecDeque};

use tdsim_core::SimConfig;
use tdsim_dispatch::Dispatcher;
use tdsim_index::{MatrixCell, SpatioTemporalDatabase};
use tdsim_network::RoadNetwork;
use tdsim_query::Query;
use tdsim_taxi::gen_taxi;

use crate::error::{SimError, SimResult};
use crate::sim::Sim;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] and a loaded [`RoadNetwork`], supplied to [`Self::new`].
///
/// # Optional inputs (have defaults)
///
/// | Method                          | Default                                     |
/// |----------------------------------|---------------------------------------------|
/// | `.queries(v)`                   | No queries (an idle simulation)             |
/// | `.precomputed_distance_matrix(m)` | Compute via `compute_distance_matrix`     |
///
/// `build()` runs the index construction phases (§4.3), generates the taxi
/// fleet deterministically from the network and grid (§1.2), map-matches
/// every supplied query, and registers each taxi's starting cell.
pub struct SimBuilder {
    config: SimConfig,
    network: RoadNetwork,
    queries: Vec<Query>,
    distance_matrix: Option<HashMap<String, HashMap<String, MatrixCell>>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, network: RoadNetwork) -> Self {
        Self { config, network, queries: Vec::new(), distance_matrix: None }
    }

    /// Supply the queries to simulate (already parsed, not yet map-matched).
    pub fn queries(mut self, queries: Vec<Query>) -> Self {
        self.queries = queries;
        self
    }

    /// Supply a previously computed grid distance matrix, skipping the
    /// `O(|cells|^2)` offline Dijkstra pass entirely (§6 "Precomputed
    /// artifact").
    pub fn precomputed_distance_matrix(mut self, matrix: HashMap<String, HashMap<String, MatrixCell>>) -> Self {
        self.distance_matrix = Some(matrix);
        self
    }

    pub fn build(self) -> SimResult<Sim> {
        if self.config.sim_start > self.config.sim_end {
            return Err(SimError::Config(format!(
                "sim_start ({}) is after sim_end ({})",
                self.config.sim_start, self.config.sim_end
            )));
        }

        let mut database = SpatioTemporalDatabase::new();
        database.load_road_network(&self.network);
        database.determine_anchor(&self.network);

        match self.distance_matrix {
            Some(matrix) => database.grid_distance_matrix = matrix,
            None => database.compute_distance_matrix(&self.network, self.config.average_speed_mps),
        }
        database.construct_static_list();

        let taxi_set = gen_taxi(
            &database,
            &self.network,
            self.config.num_taxi,
            self.config.average_speed_mps,
            self.config.taxi_capacity,
        );

        database.init_dynamic_info(
            taxi_set.iter().map(|(&id, taxi)| (id, &taxi.location)),
            self.config.sim_start as f64,
        );

        let mut query_set = HashMap::with_capacity(self.queries.len());
        let mut arrival_queue: Vec<_> = Vec::with_capacity(self.queries.len());
        for mut query in self.queries {
            query.init_schedule_node(&self.network, &database);
            arrival_queue.push(query.id);
            query_set.insert(query.id, query);
        }
        arrival_queue.sort_by_key(|&id| query_set[&id].timestamp);

        Ok(Sim {
            config: self.config,
            network: self.network,
            database,
            query_set,
            taxi_set,
            dispatcher: Dispatcher::new(),
            arrival_queue: VecDeque::from(arrival_queue),
        })
    }
}
