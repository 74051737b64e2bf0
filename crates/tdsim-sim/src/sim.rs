//! The [`Sim`] struct and its per-timestep driver loop.

use std::collections::{HashMap, VecDeque};

use tdsim_core::{QueryId, SimConfig, TaxiId};
use tdsim_dispatch::{DispatchOutcome, Dispatcher};
use tdsim_index::SpatioTemporalDatabase;
use tdsim_network::RoadNetwork;
use tdsim_query::{Query, QueryStatus};
use tdsim_taxi::{Taxi, TaxiEvent};

use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::tally::SimTally;

/// The main simulation runner.
///
/// Holds every piece of mutable state the driver loop touches — the query
/// set, the taxi fleet, the dispatcher's bookkeeping queues, and the
/// spatio-temporal index — and advances them one integer timestep at a
/// time via [`Sim::step`]. Create via [`crate::SimBuilder`].
pub struct Sim {
    pub config: SimConfig,
    pub network: RoadNetwork,
    pub database: SpatioTemporalDatabase,
    pub query_set: HashMap<QueryId, Query>,
    pub taxi_set: HashMap<TaxiId, Taxi>,
    pub dispatcher: Dispatcher,
    /// Queries not yet processed, sorted ascending by arrival timestamp —
    /// the "arrival priority queue" of §4.6 step 1.
    pub(crate) arrival_queue: VecDeque<QueryId>,
}

impl Sim {
    /// Run every timestep from `config.sim_start` to `config.sim_end`
    /// inclusive, then return the final query census.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimTally> {
        let mut t = self.config.sim_start;
        while t <= self.config.sim_end {
            self.step(t, observer)?;
            t += self.config.time_step_s;
        }

        let tally = SimTally::from_query_set(&self.query_set);
        observer.on_sim_end(&tally);
        Ok(tally)
    }

    /// Advance the simulation by exactly one timestep, per §4.6.
    pub fn step<O: SimObserver>(&mut self, t: i64, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(t);

        let mut pending = self.drain_arrivals(t);
        pending.extend(self.dispatcher.failed_queries.drain(..));

        self.process_pending(t, pending, observer)?;
        self.update_query_statuses(t, observer);
        self.drive_taxis(t, observer)?;

        observer.on_tick_end(t);
        Ok(())
    }

    /// Step 1: pop every query from the front of the arrival queue whose
    /// timestamp has come due. The queue is sorted ascending, so this is a
    /// peek-and-stop scan, not a full drain.
    fn drain_arrivals(&mut self, t: i64) -> VecDeque<QueryId> {
        let mut due = VecDeque::new();
        while let Some(&id) = self.arrival_queue.front() {
            if self.query_set[&id].timestamp > t {
                break;
            }
            due.push_back(id);
            self.arrival_queue.pop_front();
        }
        due
    }

    /// Step 3: resolve every query due this timestep — cancelled queries
    /// are recorded as such, everything else goes through the dispatcher.
    fn process_pending<O: SimObserver>(&mut self, t: i64, mut pending: VecDeque<QueryId>, observer: &mut O) -> SimResult<()> {
        while let Some(query_id) = pending.pop_front() {
            if self.query_set[&query_id].status == QueryStatus::Cancelled {
                self.dispatcher.add_cancelled_query(query_id);
                observer.on_cancelled(t, query_id);
                continue;
            }

            let outcome = self.dispatcher.dispatch(t, query_id, &mut self.query_set, &mut self.taxi_set, &self.database, &self.network)?;
            match outcome {
                DispatchOutcome::Dispatched(taxi_id) => observer.on_dispatched(t, query_id, taxi_id),
                DispatchOutcome::Failed => observer.on_dispatch_failed(t, query_id),
            }
        }
        Ok(())
    }

    /// Step 4: accrue waiting time (and expire patience) for every query
    /// that has arrived and is still WAITING — including ones stranded in
    /// `failed_queries`, preserved verbatim (`SPEC_FULL.md` §9).
    fn update_query_statuses<O: SimObserver>(&mut self, t: i64, observer: &mut O) {
        let mut newly_cancelled = Vec::new();
        for query in self.query_set.values_mut() {
            if query.timestamp <= t && query.status == QueryStatus::Waiting {
                query.update_status(t);
                if query.status == QueryStatus::Cancelled {
                    newly_cancelled.push(query.id);
                }
            }
        }
        for query_id in newly_cancelled {
            observer.on_cancelled(t, query_id);
        }
    }

    /// Step 5: advance every taxi by one timestep and forward any event it
    /// produces to the dispatcher's bookkeeping.
    fn drive_taxis<O: SimObserver>(&mut self, t: i64, observer: &mut O) -> SimResult<()> {
        // Explicit field borrows so the borrow checker sees disjoint access
        // to `taxi_set` (iterated mutably) and the other fields it needs.
        let Sim { config, network, query_set, taxi_set, database, dispatcher, .. } = self;

        for (&taxi_id, taxi) in taxi_set.iter_mut() {
            let event = taxi.drive(t, config.time_step_s, network, query_set, database, config.average_speed_mps)?;
            match event {
                Some(TaxiEvent::PickedUp(query_id)) => {
                    dispatcher.remove_waiting_query(query_id);
                    observer.on_picked_up(t, taxi_id, query_id);
                }
                Some(TaxiEvent::PickupCancelled(query_id)) => {
                    dispatcher.remove_waiting_query(query_id);
                    observer.on_pickup_cancelled(t, taxi_id, query_id);
                }
                Some(TaxiEvent::DroppedOff(query_id)) => {
                    dispatcher.add_completed_query(query_id);
                    observer.on_dropped_off(t, taxi_id, query_id);
                }
                None => {}
            }
        }
        Ok(())
    }
}
