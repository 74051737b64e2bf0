//! Top-level simulation error type.

use thiserror::Error;

use tdsim_dispatch::DispatchError;
use tdsim_taxi::TaxiError;

/// Errors that can abort a simulation run.
///
/// Everything recoverable (an empty route, a failed dispatch attempt, a
/// cancelled query) is represented in-band as ordinary state and rolled up
/// into the end-of-run [`crate::SimTally`] — it never reaches this type.
/// What's left are genuine invariant violations and builder misuse.
///
/// `IoError` (malformed CSV rows, a corrupt distance-matrix cache) is
/// deliberately not one of this enum's variants: `tdsim-io` needs this
/// crate's [`crate::Sim`]/[`crate::SimBuilder`] to wire a load into a
/// runnable simulation, so `tdsim-sim` cannot depend back on `tdsim-io`
/// without a cycle. The CLI binary unifies both error types with `anyhow`
/// at the outermost layer instead, the same way the teacher's demo
/// binaries unify heterogeneous crate errors (see `DESIGN.md`).
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("taxi error: {0}")]
    Taxi(#[from] TaxiError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
