//! Network-subsystem error type.

use thiserror::Error;

use tdsim_core::VertexId;

/// Errors produced by `tdsim-network`.
///
/// Unreachability is deliberately *not* a variant here — per the
/// specification, every search returns an empty [`crate::Path`] rather than
/// an `Err` when no route exists, since "stalled taxi" is a normal outcome,
/// not a failure.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("vertex {0} not found in network")]
    VertexNotFound(VertexId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
