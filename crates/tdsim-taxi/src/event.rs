//! Events emitted by [`crate::taxi::Taxi::drive`] for the simulation driver
//! to react to (dispatcher bookkeeping, `SimObserver` notifications).
//!
//! A taxi never calls into the dispatcher directly — that would create a
//! dependency cycle (`tdsim-dispatch` already depends on `tdsim-taxi` to
//! check availability). Instead `drive` mutates the query directly (status,
//! `serving_queries`) and returns at most one event per timestep, which the
//! driver forwards to `Dispatcher::add_serving_query`/`add_completed_query`.

use tdsim_core::QueryId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaxiEvent {
    /// The query's origin node was reached while still `Waiting`: the
    /// passenger got in.
    PickedUp(QueryId),
    /// The query's origin node was reached after the query had already been
    /// cancelled: its destination node was dropped from the schedule.
    PickupCancelled(QueryId),
    /// The query's destination node was reached: the passenger got out.
    DroppedOff(QueryId),
}
