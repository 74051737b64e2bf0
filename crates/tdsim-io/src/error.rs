//! I/O-subsystem error type.

use thiserror::Error;

/// Errors produced while loading CSV inputs or writing CSV output.
///
/// Malformed input aborts the load (§7 "InputMalformed"); nothing here is
/// recoverable in-band, unlike the dispatch/motion outcomes tracked by
/// `tdsim-sim::SimTally`.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("malformed row in {file} line {line}: {detail}")]
    Malformed { file: String, line: u64, detail: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IoResult<T> = Result<T, IoError>;
