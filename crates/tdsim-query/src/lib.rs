//! `tdsim-query` — the passenger query model, schedule nodes, and the query
//! CSV loader.

pub mod error;
pub mod loader;
pub mod query;
pub mod schedule;


pub use error::{QueryError, QueryResult};
pub use loader::load_queries_dir;
pub use query::{Query, QueryStatus};
pub use schedule::ScheduleNode;
