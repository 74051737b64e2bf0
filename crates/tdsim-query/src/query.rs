//! The passenger query model.

use tdsim_core::{geohash_encode, Location, QueryId, TaxiId, TimeWindow, MAX_INT};
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::RoadNetwork;

use crate::schedule::ScheduleNode;

/// Lifecycle state of a [`Query`]. Transitions are monotone: WAITING leads to
/// either RIDING or CANCELLED; RIDING leads only to SATISFIED. No state is
/// ever revisited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Waiting,
    Riding,
    Satisfied,
    Cancelled,
}

/// A passenger's ride request.
#[derive(Clone, Debug)]
pub struct Query {
    pub id: QueryId,
    pub timestamp: i64,
    pub origin: Location,
    pub destination: Location,
    pub o_geohash: String,
    pub d_geohash: String,

    pub o_schedule_node: Option<ScheduleNode>,
    pub d_schedule_node: Option<ScheduleNode>,

    pub pickup_window: TimeWindow,
    pub delivery_window: TimeWindow,

    pub matched_taxi: Option<TaxiId>,
    pub status: QueryStatus,
    pub waiting_time: i64,
}

impl Query {
    /// Construct a query at the moment it arrives. Schedule nodes are not
    /// yet map-matched; call [`Query::init_schedule_node`] before dispatch.
    pub fn new(id: QueryId, timestamp: i64, origin: Location, destination: Location, patience_s: i64, geohash_precision: u8) -> Self {
        let o_geohash = geohash_encode(origin.lat, origin.lon, geohash_precision);
        let d_geohash = geohash_encode(destination.lat, destination.lon, geohash_precision);

        Self {
            id,
            timestamp,
            origin,
            destination,
            o_geohash,
            d_geohash,
            o_schedule_node: None,
            d_schedule_node: None,
            pickup_window: TimeWindow::new(timestamp, timestamp + patience_s),
            delivery_window: TimeWindow::new(timestamp, timestamp + MAX_INT),
            matched_taxi: None,
            status: QueryStatus::Waiting,
            waiting_time: 0,
        }
    }

    /// Map-match both endpoints against the road network, producing this
    /// query's origin and destination [`ScheduleNode`]s.
    pub fn init_schedule_node(&mut self, network: &RoadNetwork, database: &SpatioTemporalDatabase) {
        let o_vid = database.map_match(&self.origin, network);
        let d_vid = database.map_match(&self.destination, network);
        self.o_schedule_node = Some(ScheduleNode::new(self.id, true, o_vid));
        self.d_schedule_node = Some(ScheduleNode::new(self.id, false, d_vid));
    }

    /// Advance this query's waiting-time accounting by one timestep.
    ///
    /// Called for every query whose status is currently `Waiting` in the
    /// global query set — *including* queries transiently sitting in
    /// `failed_queries` (the original updates by iterating the query set,
    /// not the dispatcher's queues, so stranded queries accrue waiting time
    /// too; preserved here deliberately, see `DESIGN.md`).
    pub fn update_status(&mut self, timestamp: i64) {
        if self.status == QueryStatus::Waiting {
            self.waiting_time += 1;
            if timestamp > self.pickup_window.late {
                self.cancel();
            }
        }
    }

    pub fn cancel(&mut self) {
        self.status = QueryStatus::Cancelled;
    }
}
