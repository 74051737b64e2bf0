use std::collections::HashMap;

use tdsim_core::{EdgeId, Location, QueryId, TaxiId, VertexId};
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::RoadNetwork;
use tdsim_query::{Query, QueryStatus, ScheduleNode};

use crate::event::TaxiEvent;
use crate::taxi::Taxi;

const PRECISION: u8 = 5;
const SPEED: f64 = 7.0;

// Two points exactly 700m apart along the same meridian: for points sharing a
// longitude the great-circle path is the meridian itself, so the spherical
// law of cosines gives an exact distance of R * delta_lat(radians).
const A_LAT: f64 = 39.9042;
const A_LON: f64 = 116.4074;
const B_LAT: f64 = 39.9104952321;
const B_LON: f64 = 116.4074;

fn a_loc() -> Location {
    Location::new(A_LAT, A_LON, PRECISION)
}

fn b_loc() -> Location {
    Location::new(B_LAT, B_LON, PRECISION)
}

fn query_waiting(id: QueryId, o_vid: Option<VertexId>, d_vid: Option<VertexId>) -> Query {
    let mut q = Query::new(id, 1, a_loc(), b_loc(), 300, PRECISION);
    q.o_schedule_node = Some(ScheduleNode::new(id, true, o_vid));
    q.d_schedule_node = Some(ScheduleNode::new(id, false, d_vid));
    q
}

/// Scenario 1: a query whose origin coincides with the taxi's own vertex is
/// picked up without any motion, then the taxi drives the 700m edge to the
/// destination at 7 m/s, dropping off once it arrives.
#[test]
fn taxi_picks_up_at_its_own_vertex_then_drives_to_dropoff() {
    let mut network = RoadNetwork::new(PRECISION);
    network.add_vertex(VertexId(0), A_LAT, A_LON);
    network.add_vertex(VertexId(1), B_LAT, B_LON);
    network.add_edge(EdgeId(0), VertexId(0), VertexId(1), 700.0);

    let mut database = SpatioTemporalDatabase::new();

    let query_id = QueryId(0);
    let query = query_waiting(query_id, Some(VertexId(0)), Some(VertexId(1)));
    let mut query_set = HashMap::from([(query_id, query.clone())]);

    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    taxi.schedule.push_back(query.o_schedule_node.unwrap());
    taxi.schedule.push_back(query.d_schedule_node.unwrap());
    taxi.update_route(&network, None);
    assert!(!taxi.route.as_ref().unwrap().vertices.is_empty());
    assert!(taxi.route.as_ref().unwrap().is_empty()); // trivial: already at A

    // Tick 1: the trivial route resolves immediately — pickup, no travel.
    let event = taxi.drive(1, 1, &network, &mut query_set, &mut database, SPEED).unwrap();
    assert_eq!(event, Some(TaxiEvent::PickedUp(query_id)));
    assert_eq!(query_set[&query_id].status, QueryStatus::Riding);
    assert_eq!(taxi.num_riders, 1);
    let route = taxi.route.as_ref().unwrap();
    assert!(!route.is_empty());
    assert_eq!(route.edges, vec![EdgeId(0)]);

    // Ticks 2..=101: 7 m/s along the 700m edge, arriving around t=101.
    let mut dropped_off_at = None;
    for t in 2..=110 {
        let event = taxi.drive(t, 1, &network, &mut query_set, &mut database, SPEED).unwrap();
        if let Some(TaxiEvent::DroppedOff(q)) = event {
            assert_eq!(q, query_id);
            dropped_off_at = Some(t);
            break;
        }
    }

    let t = dropped_off_at.expect("taxi never dropped off the passenger");
    assert!((99..=102).contains(&t), "unexpected dropoff tick {t}");
    assert_eq!(query_set[&query_id].status, QueryStatus::Satisfied);
    assert_eq!(taxi.num_riders, 0);
    assert_eq!(taxi.v_id, VertexId(1));
    assert!(taxi.schedule.is_empty());
    assert!(taxi.route.is_none());
}

/// Scenario 2: the destination is in a disconnected component. After pickup
/// the taxi's route to it is empty with no vertices at all (genuinely
/// unreachable) — the taxi stalls at the pickup vertex forever, and the
/// query is never dropped off.
#[test]
fn taxi_stalls_when_destination_is_unreachable() {
    let mut network = RoadNetwork::new(PRECISION);
    network.add_vertex(VertexId(0), A_LAT, A_LON);
    network.add_vertex(VertexId(1), B_LAT, B_LON); // no edge between them

    let mut database = SpatioTemporalDatabase::new();

    let query_id = QueryId(0);
    let query = query_waiting(query_id, Some(VertexId(0)), Some(VertexId(1)));
    let mut query_set = HashMap::from([(query_id, query.clone())]);

    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    taxi.schedule.push_back(query.o_schedule_node.unwrap());
    taxi.schedule.push_back(query.d_schedule_node.unwrap());
    taxi.update_route(&network, None);

    // Pickup happens immediately (trivial route, taxi already at A).
    let event = taxi.drive(1, 1, &network, &mut query_set, &mut database, SPEED).unwrap();
    assert_eq!(event, Some(TaxiEvent::PickedUp(query_id)));
    assert!(taxi.route.as_ref().unwrap().vertices.is_empty()); // unreachable

    for t in 2..200 {
        let event = taxi.drive(t, 1, &network, &mut query_set, &mut database, SPEED).unwrap();
        assert_eq!(event, None);
    }

    assert_eq!(taxi.v_id, VertexId(0));
    assert_eq!(query_set[&query_id].status, QueryStatus::Riding);
    assert_eq!(taxi.num_riders, 1);
}

/// Scenario 6: a query is cancelled while the taxi is still approaching its
/// origin. When the taxi reaches the (now-stale) origin node it must not pick
/// up a cancelled passenger; it drops the destination node from its schedule
/// instead.
#[test]
fn cancellation_during_approach_drops_the_destination_node() {
    let mut network = RoadNetwork::new(PRECISION);
    network.add_vertex(VertexId(0), A_LAT, A_LON); // taxi start
    network.add_vertex(VertexId(1), B_LAT, B_LON); // query origin
    network.add_vertex(VertexId(2), B_LAT, B_LON); // query destination (unused)
    network.add_edge(EdgeId(0), VertexId(0), VertexId(1), 700.0);

    let mut database = SpatioTemporalDatabase::new();

    let query_id = QueryId(0);
    let mut query = query_waiting(query_id, Some(VertexId(1)), Some(VertexId(2)));
    query.status = QueryStatus::Cancelled;
    let mut query_set = HashMap::from([(query_id, query.clone())]);

    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    taxi.schedule.push_back(query.o_schedule_node.unwrap());
    taxi.schedule.push_back(query.d_schedule_node.unwrap());
    taxi.update_route(&network, None);
    assert!(!taxi.route.as_ref().unwrap().is_empty()); // non-trivial: 700m away

    let mut cancelled_at = None;
    for t in 1..=110 {
        let event = taxi.drive(t, 1, &network, &mut query_set, &mut database, SPEED).unwrap();
        if let Some(TaxiEvent::PickupCancelled(q)) = event {
            assert_eq!(q, query_id);
            cancelled_at = Some(t);
            break;
        }
    }

    cancelled_at.expect("taxi never resolved the cancelled pickup");
    assert!(taxi.schedule.is_empty(), "destination node should have been dropped");
    assert!(taxi.route.is_none());
    assert_eq!(taxi.num_riders, 0);
    assert!(taxi.serving_queries.is_empty());
}

#[test]
fn is_available_requires_spare_capacity_and_a_nonempty_schedule() {
    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    assert!(!taxi.is_available(), "freshly generated taxi has no schedule yet");

    taxi.schedule.push_back(ScheduleNode::new(QueryId(0), true, Some(VertexId(1))));
    assert!(taxi.is_available());

    taxi.num_riders = taxi.capacity;
    assert!(!taxi.is_available(), "at capacity, even with a pending schedule");
}

#[test]
fn update_route_with_empty_schedule_clears_the_route() {
    let network = RoadNetwork::new(PRECISION);
    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    taxi.route = Some(tdsim_network::astar(&network, VertexId(0), VertexId(0)));
    taxi.update_route(&network, None);
    assert!(taxi.route.is_none());
    assert!(taxi.e_id.is_none());
}

#[test]
fn update_route_yields_empty_path_when_an_endpoint_failed_to_map_match() {
    let mut network = RoadNetwork::new(PRECISION);
    network.add_vertex(VertexId(0), A_LAT, A_LON);

    let mut taxi = Taxi::new(TaxiId(0), a_loc(), VertexId(0), SPEED, 1);
    taxi.schedule.push_back(ScheduleNode::new(QueryId(0), true, None));
    taxi.update_route(&network, None);

    let route = taxi.route.as_ref().unwrap();
    assert!(route.is_empty());
    assert!(taxi.e_id.is_none());
}
