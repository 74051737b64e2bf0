//! `tdsim-dispatch` — per-request candidate search, taxi selection, and
//! schedule insertion.
//!
//! [`candidate::single_side_search`] walks a query's origin cell's
//! `temporal_grid_list` to enumerate taxis that can plausibly reach the
//! pickup within the patience window; [`Dispatcher::dispatch`] then picks
//! the closest *available* one, appends the query's schedule nodes, and
//! recomputes the taxi's route.

pub mod candidate;
pub mod dispatcher;
pub mod error;


pub use candidate::single_side_search;
pub use dispatcher::{Dispatcher, DispatchOutcome};
pub use error::{DispatchError, DispatchResult};
