//! Spatio-temporal index error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to (de)serialize grid distance matrix cache: {0}")]
    Cache(#[from] serde_json::Error),
    #[error("io error reading/writing grid distance matrix cache: {0}")]
    Io(#[from] std::io::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;
