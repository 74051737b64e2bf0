//! Query-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{file}:{line}: malformed query row: {detail}")]
    Malformed { file: String, line: u64, detail: String },
    #[error("io error reading query files: {0}")]
    Io(#[from] std::io::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;
