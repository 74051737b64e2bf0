//! Dispatch-subsystem error type.

use thiserror::Error;

use tdsim_core::{QueryId, TaxiId};

/// Errors produced by `tdsim-dispatch`.
///
/// Both variants represent a caller passing an id that is not present in the
/// query/taxi set — a programming error in the driver, never a reachable
/// outcome of normal dispatch (candidate exhaustion and schedule-invariant
/// violations are represented elsewhere, see `SPEC_FULL.md` §7).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("query {0} not found in query set")]
    QueryNotFound(QueryId),
    #[error("taxi {0} not found in taxi set")]
    TaxiNotFound(TaxiId),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
