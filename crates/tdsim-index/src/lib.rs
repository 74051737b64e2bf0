//! `tdsim-index` — spatio-temporal grid index over a road network.
//!
//! Partitions the road network into geohash cells, precomputes an
//! anchor-to-anchor distance/time matrix between every pair of cells, and
//! tracks which taxis are predicted to arrive in which cell and when. The
//! dispatcher's candidate search (`tdsim-dispatch`) walks a cell's
//! `temporal_grid_list` to answer "which taxis can plausibly reach this
//! pickup in time" without a network-wide search.

pub mod error;
pub mod grid;
pub mod index;

#[cfg(test)]
mod tests;

pub use error::{IndexError, IndexResult};
pub use grid::{GridCell, MatrixCell};
pub use index::SpatioTemporalDatabase;
