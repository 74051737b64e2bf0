//! Per-taxi state and per-tick motion.

use std::collections::{HashMap, HashSet, VecDeque};

use tdsim_core::{bearing, destination, great_circle_distance, EdgeId, Location, QueryId, TaxiId, VertexId};
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::{astar, Path, RoadNetwork};
use tdsim_query::{Query, QueryStatus, ScheduleNode};

use crate::error::{TaxiError, TaxiResult};
use crate::event::TaxiEvent;

/// A single taxi: its current position, schedule of pickup/dropoff
/// obligations, and the route toward the head of that schedule.
///
/// Unlike the data this is ported from, `serving_queries` holds only
/// [`QueryId`]s, not a second copy of each `Query` — the query set is the
/// sole owner of `Query` values, and a taxi looks queries up through it.
/// Likewise there is no separate `geohash` field: `location.geohash_str()`
/// (precomputed when the `Location` was built) is always current.
#[derive(Clone, Debug)]
pub struct Taxi {
    pub id: TaxiId,
    pub location: Location,
    pub speed: f64,
    pub capacity: u32,
    pub num_riders: u32,

    pub schedule: VecDeque<ScheduleNode>,
    pub route: Option<Path>,

    pub v_id: VertexId,
    pub e_id: Option<EdgeId>,
    eid_index: Option<usize>,

    pub driving_distance: f64,
    pub serving_queries: HashSet<QueryId>,
}

impl Taxi {
    pub fn new(id: TaxiId, location: Location, v_id: VertexId, speed: f64, capacity: u32) -> Self {
        Self {
            id,
            location,
            speed,
            capacity,
            num_riders: 0,
            schedule: VecDeque::new(),
            route: None,
            v_id,
            e_id: None,
            eid_index: None,
            driving_distance: 0.0,
            serving_queries: HashSet::new(),
        }
    }

    /// A taxi is available iff it has spare capacity *and* its schedule is
    /// non-empty — preserved verbatim from the original, including the
    /// consequence that a freshly generated taxi with nothing on its
    /// schedule is not available until something assigns it one (there is no
    /// taxi-rebalancing subsystem to do so; see `DESIGN.md`).
    pub fn is_available(&self) -> bool {
        self.num_riders < self.capacity && !self.schedule.is_empty()
    }

    /// Advance this taxi by one simulation timestep.
    ///
    /// Returns `Ok(None)` if the taxi has no route, its destination is
    /// unreachable, it is mid-edge after this step, or it just advanced to
    /// the next edge of its current route. Returns `Ok(Some(event))` when a
    /// schedule node was reached — either by physically arriving, or
    /// immediately, if the new head's matched vertex was already the
    /// taxi's own position. Returns `Err` only on a genuine invariant
    /// violation (§7).
    pub fn drive(
        &mut self,
        timestamp: i64,
        time_step_s: i64,
        network: &RoadNetwork,
        query_set: &mut HashMap<QueryId, Query>,
        database: &mut SpatioTemporalDatabase,
        average_speed_mps: f64,
    ) -> TaxiResult<Option<TaxiEvent>> {
        let Some(route) = self.route.as_ref() else {
            return Ok(None);
        };

        if route.is_empty() {
            if route.vertices.is_empty() {
                // Genuinely unreachable: the taxi stalls forever at its
                // current vertex (SPEC_FULL.md scenario 2).
                return Ok(None);
            }

            // The route's start and target vertex coincide — the taxi is
            // already standing on the new head's matched vertex (e.g. a
            // pickup at the taxi's own position). There is no distance to
            // cover, so the node is reached with zero travel; resolve it now
            // rather than stalling forever waiting for motion that would
            // never happen (SPEC_FULL.md scenario 1).
            let schedule_node = self.schedule.pop_front().expect("non-empty route implies non-empty schedule");
            let event = self.resolve_schedule_node(schedule_node, query_set)?;
            self.update_route(network, Some(schedule_node));

            let empty_route = Path::default();
            let new_route = self.route.as_ref().unwrap_or(&empty_route);
            database.update_taxi_list(timestamp as f64, self.id, new_route, network, average_speed_mps);

            return Ok(Some(event));
        }

        let d = self.speed * time_step_s as f64;
        self.driving_distance += d;

        let e_id = self.e_id.expect("non-empty route implies a current edge");
        let cur_edge = *network.get_edge(e_id).expect("taxi's current edge must exist in the network");
        let to_location = network.get_vertex(cur_edge.end).expect("edge endpoint must exist").location;

        let theta = bearing(self.location, to_location);
        let next_pos = destination(self.location, theta, d, network.geohash_precision());

        let e_start_location = network.get_vertex(cur_edge.start).expect("edge start must exist").location;
        let edge_offset = great_circle_distance(e_start_location, next_pos);

        if edge_offset < cur_edge.weight {
            self.update_position(timestamp, next_pos, database);
            return Ok(None);
        }

        // Arrived at the end of the current edge.
        self.update_position(timestamp, to_location, database);
        self.v_id = cur_edge.end;

        if let Some(next_eid) = self.next_edge_id() {
            self.e_id = Some(next_eid);
            self.eid_index = Some(self.eid_index.unwrap() + 1);
            return Ok(None);
        }

        // Last edge of the route: the taxi has reached the head schedule node.
        let schedule_node = self.schedule.pop_front().expect("non-empty route implies non-empty schedule");
        let event = self.resolve_schedule_node(schedule_node, query_set)?;
        self.update_route(network, Some(schedule_node));

        let empty_route = Path::default();
        let new_route = self.route.as_ref().unwrap_or(&empty_route);
        database.update_taxi_list(timestamp as f64, self.id, new_route, network, average_speed_mps);

        Ok(Some(event))
    }

    fn resolve_schedule_node(&mut self, schedule_node: ScheduleNode, query_set: &mut HashMap<QueryId, Query>) -> TaxiResult<TaxiEvent> {
        let query = query_set.get_mut(&schedule_node.query_id).expect("schedule node references a live query");

        if schedule_node.is_origin {
            if query.status == QueryStatus::Waiting {
                query.status = QueryStatus::Riding;
                self.serving_queries.insert(query.id);
                self.num_riders += 1;
                Ok(TaxiEvent::PickedUp(query.id))
            } else {
                // The query was cancelled while this taxi was en route to pick it
                // up. Drop its destination node so the taxi never tries to serve it.
                if let Some(pos) = self.schedule.iter().position(|n| n.query_id == schedule_node.query_id) {
                    self.schedule.remove(pos);
                }
                Ok(TaxiEvent::PickupCancelled(query.id))
            }
        } else if query.status == QueryStatus::Riding {
            query.status = QueryStatus::Satisfied;
            self.serving_queries.remove(&query.id);
            self.num_riders -= 1;
            Ok(TaxiEvent::DroppedOff(query.id))
        } else {
            Err(TaxiError::ScheduleInvariantViolation(query.id))
        }
    }

    fn update_position(&mut self, timestamp: i64, new_pos: Location, database: &mut SpatioTemporalDatabase) {
        let prev_geohash = self.location.geohash_str().to_string();
        self.location = new_pos;
        let next_geohash = new_pos.geohash_str();

        if next_geohash != prev_geohash {
            if let Some(cell) = database.grid.get_mut(&prev_geohash) {
                cell.remove_taxi(self.id);
            }
            if let Some(cell) = database.grid.get_mut(next_geohash) {
                cell.add_taxi(self.id, timestamp as f64);
            }
        }
    }

    fn next_edge_id(&self) -> Option<EdgeId> {
        let route = self.route.as_ref()?;
        let idx = self.eid_index?;
        if idx + 1 == route.edges.len() {
            None
        } else {
            Some(route.edges[idx + 1])
        }
    }

    /// Recompute the route toward the head of the schedule.
    ///
    /// `from_schedule_node` is the node the taxi just finished (its matched
    /// vertex is the new route's start); `None` means this is the taxi's
    /// very first route, starting from its current vertex.
    ///
    /// A route is `Some(empty Path)`, never an error, when either endpoint
    /// failed to map-match (`ScheduleNode::matched_vid == None`) or the
    /// destination is simply unreachable in the road network — both are
    /// normal "taxi stalls" outcomes, not failures.
    pub fn update_route(&mut self, network: &RoadNetwork, from_schedule_node: Option<ScheduleNode>) {
        if self.schedule.is_empty() {
            self.route = None;
            self.e_id = None;
            self.eid_index = None;
            return;
        }

        let from_vid = match from_schedule_node {
            Some(node) => node.matched_vid,
            None => Some(self.v_id),
        };
        let to_vid = self.schedule.front().and_then(|n| n.matched_vid);

        let route = match (from_vid, to_vid) {
            (Some(f), Some(t)) => astar(network, f, t),
            _ => Path::default(),
        };

        if !route.is_empty() {
            self.e_id = Some(route.edges[0]);
            self.eid_index = Some(0);
        } else {
            self.e_id = None;
            self.eid_index = None;
        }
        self.route = Some(route);
    }
}
