//! End-of-run query census.

use std::collections::HashMap;

use tdsim_core::QueryId;
use tdsim_query::{Query, QueryStatus};

/// A count of every query by its final [`QueryStatus`].
///
/// Deliberately mirrors `QueryStatus` one-for-one rather than inventing a
/// separate "failed" bucket: failure is a per-attempt outcome
/// (`DispatchOutcome::Failed`), not a terminal state a query can be left
/// in — a query that keeps failing either eventually finds a taxi or gets
/// cancelled once its pickup window expires (§4.6). `waiting` therefore
/// covers both "not yet attempted" and "stuck retrying in
/// `failed_queries`" queries alike.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimTally {
    pub waiting: usize,
    pub riding: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl SimTally {
    pub fn from_query_set(query_set: &HashMap<QueryId, Query>) -> Self {
        let mut tally = Self::default();
        for query in query_set.values() {
            match query.status {
                QueryStatus::Waiting => tally.waiting += 1,
                QueryStatus::Riding => tally.riding += 1,
                QueryStatus::Satisfied => tally.completed += 1,
                QueryStatus::Cancelled => tally.cancelled += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.waiting + self.riding + self.completed + self.cancelled
    }
}
