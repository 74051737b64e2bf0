//! Single-side candidate search over the spatio-temporal index.

use tdsim_core::TaxiId;
use tdsim_index::SpatioTemporalDatabase;

/// Enumerate taxis that can plausibly reach `o_geohash` in time to satisfy
/// `pickup_late`, by walking the origin cell's `temporal_grid_list` in
/// ascending order.
///
/// Stops at the first cell whose temporal distance alone already exceeds the
/// patience window — cells later in the (sorted) list can only be farther.
/// Preserves the original's `t_ij + eta` comparison verbatim: `eta` is an
/// *absolute* simulator time, not an interval relative to `timestamp`, which
/// conflates relative and absolute time (see `SPEC_FULL.md` §9). A taxi may
/// appear more than once if it is registered in more than one candidate
/// cell's `taxi_list` (e.g. a current cell plus a predicted future one).
pub fn single_side_search(timestamp: i64, o_geohash: &str, pickup_late: i64, database: &SpatioTemporalDatabase) -> Vec<TaxiId> {
    let mut candidates = Vec::new();

    let Some(origin_cell) = database.grid.get(o_geohash) else {
        return candidates;
    };

    for (grid_id, t_ij) in &origin_cell.temporal_grid_list {
        if *t_ij + timestamp as f64 > pickup_late as f64 {
            break;
        }

        let Some(grid) = database.grid.get(grid_id) else {
            continue;
        };
        for (&taxi_id, &eta) in &grid.taxi_list {
            if *t_ij + eta <= pickup_late as f64 {
                candidates.push(taxi_id);
            }
        }
    }

    candidates
}
