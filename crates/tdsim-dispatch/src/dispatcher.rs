//! The dispatcher: candidate search, taxi selection, schedule insertion, and
//! the four query bookkeeping collections.

use std::collections::{HashMap, HashSet, VecDeque};

use tdsim_core::{great_circle_distance, Location, QueryId, TaxiId};
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::RoadNetwork;
use tdsim_query::Query;
use tdsim_taxi::Taxi;

use crate::candidate::single_side_search;
use crate::error::{DispatchError, DispatchResult};

/// Outcome of one `dispatch` attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched(TaxiId),
    Failed,
}

/// Candidate search + taxi selection + schedule insertion, plus the four
/// query bookkeeping collections described in `SPEC_FULL.md` §4.4.
///
/// `waiting_queries` and `failed_queries` hold only ids — the `Query` values
/// themselves live in the simulation driver's query set, matching this
/// workspace's arena convention (ids, not ownership, at cross-reference
/// seams; see `DESIGN.md`).
#[derive(Default)]
pub struct Dispatcher {
    /// FIFO queue of queries that failed to find a taxi; retried every
    /// subsequent timestep until their pickup window expires.
    pub failed_queries: VecDeque<QueryId>,
    /// Ids of queries currently matched to a taxi and not yet picked up.
    pub waiting_queries: HashSet<QueryId>,
    pub completed_queries: Vec<QueryId>,
    pub cancelled_queries: Vec<QueryId>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to dispatch a taxi for `query_id`. Records the outcome in the
    /// appropriate bookkeeping collection (`waiting_queries` on success,
    /// `failed_queries` for retry otherwise) and returns it to the caller.
    pub fn dispatch(
        &mut self,
        timestamp: i64,
        query_id: QueryId,
        query_set: &mut HashMap<QueryId, Query>,
        taxi_set: &mut HashMap<TaxiId, Taxi>,
        database: &SpatioTemporalDatabase,
        network: &RoadNetwork,
    ) -> DispatchResult<DispatchOutcome> {
        let (o_geohash, pickup_late, origin, o_node, d_node) = {
            let query = query_set.get(&query_id).ok_or(DispatchError::QueryNotFound(query_id))?;
            (
                query.o_geohash.clone(),
                query.pickup_window.late,
                query.origin,
                query.o_schedule_node.expect("schedule nodes must be map-matched before dispatch"),
                query.d_schedule_node.expect("schedule nodes must be map-matched before dispatch"),
            )
        };

        let candidates = single_side_search(timestamp, &o_geohash, pickup_late, database);
        let picked = select_taxi(&candidates, origin, taxi_set);

        match picked {
            Some(taxi_id) => {
                let taxi = taxi_set.get_mut(&taxi_id).ok_or(DispatchError::TaxiNotFound(taxi_id))?;
                taxi.schedule.push_back(o_node);
                taxi.schedule.push_back(d_node);
                // Always recompute from the taxi's current vertex, even if a
                // route was already in progress — preserved verbatim, see
                // SPEC_FULL.md §9.
                taxi.update_route(network, None);

                let query = query_set.get_mut(&query_id).expect("checked above");
                query.matched_taxi = Some(taxi_id);

                self.add_waiting_query(query_id);
                Ok(DispatchOutcome::Dispatched(taxi_id))
            }
            None => {
                self.add_failed_query(query_id);
                Ok(DispatchOutcome::Failed)
            }
        }
    }

    pub fn add_cancelled_query(&mut self, query_id: QueryId) {
        self.cancelled_queries.push(query_id);
    }

    pub fn add_waiting_query(&mut self, query_id: QueryId) {
        self.waiting_queries.insert(query_id);
    }

    /// A query transitioning from WAITING to RIDING leaves the dispatcher's
    /// bookkeeping entirely (it becomes the taxi's `serving_queries`
    /// responsibility).
    pub fn remove_waiting_query(&mut self, query_id: QueryId) {
        self.waiting_queries.remove(&query_id);
    }

    pub fn add_failed_query(&mut self, query_id: QueryId) {
        self.failed_queries.push_back(query_id);
    }

    pub fn add_completed_query(&mut self, query_id: QueryId) {
        self.completed_queries.push(query_id);
    }
}

/// From `candidates`, keep only available taxis and pick the one minimizing
/// great-circle distance from its current location to `origin`. Returns
/// `None` if every candidate is unavailable (this is a documented bug fix
/// over the original, which defaulted to `candidates[0]` even when no
/// candidate was available — see `DESIGN.md`'s open-question resolution).
fn select_taxi(candidates: &[TaxiId], origin: Location, taxi_set: &HashMap<TaxiId, Taxi>) -> Option<TaxiId> {
    let mut picked = None;
    let mut min_dis = f64::INFINITY;

    for &taxi_id in candidates {
        let Some(taxi) = taxi_set.get(&taxi_id) else { continue };
        if !taxi.is_available() {
            continue;
        }
        let dis = great_circle_distance(taxi.location, origin);
        if dis < min_dis {
            picked = Some(taxi_id);
            min_dis = dis;
        }
    }

    picked
}
