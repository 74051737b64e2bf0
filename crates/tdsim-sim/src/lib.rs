//! `tdsim-sim` — the per-timestep driver loop tying the road network,
//! spatio-temporal index, dispatcher, and taxi fleet together.
//!
//! # Per-timestep order (§4.6)
//!
//! ```text
//! for t in sim_start..=sim_end:
//!   ① Arrivals — pop every query from the arrival queue whose timestamp
//!                has come due.
//!   ② Retries  — drain the dispatcher's failed_queries queue in too.
//!   ③ Process  — cancelled queries are recorded as such; everything else
//!                goes through Dispatcher::dispatch.
//!   ④ Status   — every still-WAITING query (including ones stranded in
//!                failed_queries) accrues waiting_time and may expire.
//!   ⑤ Motion   — every taxi advances one step; pickup/dropoff/cancel
//!                events are forwarded to the dispatcher's bookkeeping.
//! ```
//!
//! Create a [`Sim`] via [`SimBuilder`], run it with [`Sim::run`], and
//! inspect the result via the returned [`SimTally`].

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod tally;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{LoggingObserver, NoopObserver, SimObserver};
pub use sim::Sim;
pub use tally::SimTally;
