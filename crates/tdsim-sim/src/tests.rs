use tdsim_core::{EdgeId, Location, QueryId, SimConfig, TaxiId, VertexId};
use tdsim_network::RoadNetwork;
use tdsim_query::{Query, QueryStatus, ScheduleNode};

use crate::builder::SimBuilder;
use crate::observer::NoopObserver;

const PRECISION: u8 = 5;

// Same two points used by `tdsim-taxi`'s motion tests: exactly 700m apart
// along a shared meridian, within the same geohash cell at precision 5.
const A_LAT: f64 = 39.9042;
const A_LON: f64 = 116.4074;
const B_LAT: f64 = 39.9104952321;
const B_LON: f64 = 116.4074;

fn two_vertex_network() -> RoadNetwork {
    let mut network = RoadNetwork::new(PRECISION);
    network.add_vertex(VertexId(0), A_LAT, A_LON);
    network.add_vertex(VertexId(1), B_LAT, B_LON);
    network.add_edge(EdgeId(0), VertexId(0), VertexId(1), 700.0);
    network
}

fn one_taxi_config(sim_start: i64, sim_end: i64, patience_s: i64) -> SimConfig {
    SimConfig {
        num_taxi: 1,
        taxi_capacity: 1,
        average_speed_mps: 7.0,
        patience_s,
        sim_start,
        sim_end,
        time_step_s: 1,
        ..SimConfig::default()
    }
}

/// Default behavior with no workaround: a freshly generated taxi's schedule
/// is empty, so `is_available()` never passes (`SPEC_FULL.md` §9's
/// documented paradox) — every dispatch attempt for this query fails until
/// its pickup window expires, at which point it is cancelled.
#[test]
fn query_is_cancelled_when_no_taxi_is_ever_available() {
    let network = two_vertex_network();
    let query_id = QueryId(0);
    let query = Query::new(query_id, 0, Location::new(A_LAT, A_LON, PRECISION), Location::new(B_LAT, B_LON, PRECISION), 3, PRECISION);

    let mut sim = SimBuilder::new(one_taxi_config(0, 10, 3), network).queries(vec![query]).build().unwrap();

    // The lone taxi exists and is registered in the grid, but its schedule
    // starts empty.
    assert!(!sim.taxi_set[&TaxiId(0)].is_available());

    sim.run(&mut NoopObserver).unwrap();

    assert_eq!(sim.query_set[&query_id].status, QueryStatus::Cancelled);
    assert!(sim.dispatcher.cancelled_queries.contains(&query_id));
    assert!(sim.dispatcher.completed_queries.is_empty());
}

/// End-to-end happy path: a taxi is seeded with a dummy, already-cancelled
/// schedule obligation purely so `is_available()` passes (the same
/// workaround used in `tdsim-dispatch`'s tests, see `DESIGN.md`'s
/// idle-taxi-availability open-question note) — this exercises dispatch,
/// pickup, motion, and dropoff through the full driver loop, not the
/// paradox itself.
#[test]
fn query_is_dispatched_picked_up_and_dropped_off() {
    let network = two_vertex_network();
    let real_id = QueryId(0);
    let real_query = Query::new(real_id, 0, Location::new(A_LAT, A_LON, PRECISION), Location::new(B_LAT, B_LON, PRECISION), 300, PRECISION);

    let mut sim = SimBuilder::new(one_taxi_config(0, 110, 300), network).queries(vec![real_query]).build().unwrap();

    let dummy_id = QueryId(999);
    let mut dummy_query = Query::new(dummy_id, 0, Location::new(A_LAT, A_LON, PRECISION), Location::new(A_LAT, A_LON, PRECISION), 300, PRECISION);
    dummy_query.status = QueryStatus::Cancelled;
    sim.query_set.insert(dummy_id, dummy_query);

    let taxi = sim.taxi_set.get_mut(&TaxiId(0)).unwrap();
    taxi.schedule.push_back(ScheduleNode::new(dummy_id, true, Some(VertexId(0))));
    let network_ref = &sim.network;
    taxi.update_route(network_ref, None);

    assert!(sim.taxi_set[&TaxiId(0)].is_available());

    sim.run(&mut NoopObserver).unwrap();

    assert_eq!(sim.query_set[&real_id].status, QueryStatus::Satisfied);
    assert!(sim.dispatcher.completed_queries.contains(&real_id));
    assert_eq!(sim.taxi_set[&TaxiId(0)].num_riders, 0);
    assert!(sim.taxi_set[&TaxiId(0)].serving_queries.is_empty());
    assert!(sim.taxi_set[&TaxiId(0)].schedule.is_empty());
}

/// A dispatch failure that never recovers (no candidate cell at all)
/// produces a steady stream of `on_dispatch_failed` calls and no crash.
#[test]
fn dispatch_with_no_reachable_taxi_cell_fails_silently() {
    let network = RoadNetwork::new(PRECISION); // no vertices, no taxis at all
    let query_id = QueryId(0);
    let query = Query::new(query_id, 0, Location::new(0.0, 179.9, PRECISION), Location::new(0.0, 179.9, PRECISION), 2, PRECISION);

    let mut config = one_taxi_config(0, 5, 2);
    config.num_taxi = 0;
    let mut sim = SimBuilder::new(config, network).queries(vec![query]).build().unwrap();

    sim.run(&mut NoopObserver).unwrap();

    assert_eq!(sim.query_set[&query_id].status, QueryStatus::Cancelled);
}
