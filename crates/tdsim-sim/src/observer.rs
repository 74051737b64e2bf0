//! Simulation observer trait for progress reporting and event logging.

use tdsim_core::{QueryId, TaxiId};

use crate::tally::SimTally;

/// Callbacks invoked by [`crate::Sim::run`] at each per-timestep event.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about — matching the teacher's `dt-sim`
/// observer pattern, generalized from one tick-boundary hook to one hook per
/// dispatch/motion event since that is this domain's natural granularity.
pub trait SimObserver {
    /// Called at the very start of each timestep, before any processing.
    fn on_tick_start(&mut self, _t: i64) {}

    /// A query was matched to a taxi and its schedule nodes appended.
    fn on_dispatched(&mut self, _t: i64, _query: QueryId, _taxi: TaxiId) {}

    /// A dispatch attempt found no available candidate; the query is
    /// queued for retry next timestep.
    fn on_dispatch_failed(&mut self, _t: i64, _query: QueryId) {}

    /// A query's pickup window expired (or it was cancelled while still
    /// waiting for a taxi to reach it).
    fn on_cancelled(&mut self, _t: i64, _query: QueryId) {}

    /// A taxi reached a query's origin while the query was still waiting:
    /// the passenger got in.
    fn on_picked_up(&mut self, _t: i64, _taxi: TaxiId, _query: QueryId) {}

    /// A taxi reached a query's (now-stale) origin after the query had
    /// already been cancelled.
    fn on_pickup_cancelled(&mut self, _t: i64, _taxi: TaxiId, _query: QueryId) {}

    /// A taxi reached a query's destination: the passenger got out.
    fn on_dropped_off(&mut self, _t: i64, _taxi: TaxiId, _query: QueryId) {}

    /// Called at the end of each timestep, after taxi motion.
    fn on_tick_end(&mut self, _t: i64) {}

    /// Called once after the final timestep, with the final query census.
    fn on_sim_end(&mut self, _tally: &SimTally) {}
}

/// A [`SimObserver`] that does nothing. Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that prints one line per event to stdout, in the
/// original's phrasing (`taxi.py`'s `"Taxi %d picks query %d"` /
/// `"Taxi %d drops off query %d"`, `query.py`'s `"Query %d is cancelled"`).
///
/// The teacher workspace has no `tracing`/`log` dependency anywhere in its
/// lineage; this port follows that idiom rather than introducing one.
#[derive(Default)]
pub struct LoggingObserver;

impl SimObserver for LoggingObserver {
    fn on_dispatched(&mut self, t: i64, query: QueryId, taxi: TaxiId) {
        println!("[{t}] Taxi {} is dispatched to query {}", taxi.0, query.0);
    }

    fn on_dispatch_failed(&mut self, t: i64, query: QueryId) {
        println!("[{t}] Query {} found no available taxi", query.0);
    }

    fn on_cancelled(&mut self, t: i64, query: QueryId) {
        println!("[{t}] Query {} is cancelled", query.0);
    }

    fn on_picked_up(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        println!("[{t}] Taxi {} picks query {}", taxi.0, query.0);
    }

    fn on_pickup_cancelled(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        println!("[{t}] Taxi {} reaches query {} too late, already cancelled", taxi.0, query.0);
    }

    fn on_dropped_off(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        println!("[{t}] Taxi {} drops off query {}", taxi.0, query.0);
    }

    fn on_sim_end(&mut self, tally: &SimTally) {
        println!(
            "Simulation complete: {} completed, {} cancelled, {} still riding, {} still waiting",
            tally.completed, tally.cancelled, tally.riding, tally.waiting
        );
    }
}
