//! Framework error type.
//!
//! Sub-crates define their own error enums and convert them into `CoreError`
//! (or roll up into `tdsim-sim::SimError`) via `#[from]`, matching the split
//! used throughout this workspace.

use thiserror::Error;

use crate::{QueryId, TaxiId, VertexId};

/// The top-level error type for `tdsim-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("taxi {0} not found")]
    TaxiNotFound(TaxiId),

    #[error("query {0} not found")]
    QueryNotFound(QueryId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `tdsim-core`.
pub type CoreResult<T> = Result<T, CoreError>;
