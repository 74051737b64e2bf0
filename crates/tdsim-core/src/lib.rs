//! `tdsim-core` — foundational types for the `tdsim` taxi-dispatch simulator.
//!
//! This crate is a dependency of every other `tdsim-*` crate. It intentionally
//! has minimal external dependencies (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `VertexId`, `EdgeId`, `TaxiId`, `QueryId`                |
//! | [`geo`]    | `Location`, geohash encode/decode, great-circle geometry |
//! | [`config`] | `SimConfig`, `TimeWindow`                                |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `tdsim-index`'s grid-distance-matrix cache.     |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, TimeWindow, MAX_INT};
pub use error::{CoreError, CoreResult};
pub use geo::{bearing, destination, geohash_decode, geohash_encode, great_circle_distance, Location};
pub use ids::{EdgeId, QueryId, TaxiId, VertexId};
