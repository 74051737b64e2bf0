//! A query's pickup/dropoff obligations, pinned to road-network vertices.

use tdsim_core::{QueryId, VertexId};

/// A pickup (`is_origin = true`) or dropoff obligation for a query, anchored
/// to a matched road-network vertex.
///
/// `matched_vid` is `None` when map-matching failed to find any vertex in
/// the endpoint's geohash cell — the query can never be dispatched and is
/// left to expire via its pickup window (§7 "EmptyCell").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleNode {
    pub query_id: QueryId,
    pub is_origin: bool,
    pub matched_vid: Option<VertexId>,
}

impl ScheduleNode {
    pub fn new(query_id: QueryId, is_origin: bool, matched_vid: Option<VertexId>) -> Self {
        Self { query_id, is_origin, matched_vid }
    }
}
