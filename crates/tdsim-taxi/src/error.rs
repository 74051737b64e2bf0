//! Taxi-subsystem error type.

use thiserror::Error;

use tdsim_core::QueryId;

/// Errors produced by `tdsim-taxi`.
///
/// [`TaxiError::ScheduleInvariantViolation`] is the one variant in this
/// crate's taxonomy that represents a genuine programming-error condition
/// (a destination `ScheduleNode` was reached for a query that was never
/// picked up) rather than an ordinary simulated outcome — it aborts the run
/// via `SimError` rather than being folded into a tally counter.
#[derive(Debug, Error)]
pub enum TaxiError {
    #[error("destination schedule node reached for query {0:?}, which was never picked up (status != Riding)")]
    ScheduleInvariantViolation(QueryId),
}

pub type TaxiResult<T> = Result<T, TaxiError>;
