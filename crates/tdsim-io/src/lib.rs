//! `tdsim-io` — CSV loaders and CSV output logging for `tdsim` (§6 "External
//! Interfaces").
//!
//! | Module            | Contents                                                |
//! |-------------------|-------------------------------------------------------------|
//! | [`network_loader`] | `load_road_network`, `vertices.csv`/`edges.csv` parsing     |
//! | [`event_log`]      | [`CsvEventLogger`], a `SimObserver` writing `events.csv`/`tally.csv` |
//! | [`error`]          | `IoError`, `IoResult<T>`                                    |
//!
//! Query-file loading (`queries/*.csv`) and the grid distance matrix's JSON
//! cache live in `tdsim-query::loader` and `tdsim-index::SpatioTemporalDatabase`
//! respectively, since each is intrinsic to the type it loads; this crate
//! covers only the inputs/outputs that have no natural home in another
//! `tdsim-*` crate — the road network and the per-run event log.

pub mod error;
pub mod event_log;
pub mod network_loader;

#[cfg(test)]
mod tests;

pub use error::{IoError, IoResult};
pub use event_log::CsvEventLogger;
pub use network_loader::{load_road_network, load_edges_reader, load_vertices_reader};
