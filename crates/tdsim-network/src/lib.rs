//! `tdsim-network` — directed weighted road-network graph and shortest-path
//! search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|---------------------------------------------------------------|
//! | [`graph`]   | `Vertex`, `Edge`, `RoadNetwork` (id-indexed arenas)          |
//! | [`search`]  | `Path`, `construct_path`, BFS/Dijkstra/Greedy-BFS/A*/Floyd-Warshall |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! Unlike a CSR-built-once graph, `RoadNetwork` supports incremental
//! `add_vertex`/`add_edge` calls with auto-vertex-creation, since the
//! simulator's CSV loader streams edges that may reference not-yet-seen
//! vertex ids.

pub mod error;
pub mod graph;
pub mod search;


pub use error::{NetworkError, NetworkResult};
pub use graph::{Edge, RoadNetwork, Vertex};
pub use search::{astar, bfs, dijkstra, floyd_warshall, greedy_best_first, single_source_dijkstra, Path};
