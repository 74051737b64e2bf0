//! CSV query loader.
//!
//! # File format
//!
//! One file per data source under a `queries/` directory, each containing
//! one ride request per line, no header:
//!
//! ```csv
//! 09:00:01,39.904200,116.407400,39.915000,116.420000
//! ```
//!
//! `HH:MM:SS` is the wall-clock arrival time; the simulation timestamp is
//! `seconds_since_midnight(HH:MM:SS) + 1`. Rows whose timestamp falls outside
//! `[sim_start, sim_end]` are dropped during load, not merely ignored later —
//! query ids are assigned only to rows that survive the filter, so ids stay
//! densely packed starting at 0.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tdsim_core::{Location, QueryId};

use crate::error::{QueryError, QueryResult};
use crate::query::Query;

#[derive(Deserialize)]
struct QueryRecord {
    time_str: String,
    ori_lat: f64,
    ori_lon: f64,
    des_lat: f64,
    des_lon: f64,
}

fn parse_timestamp(file: &str, line: u64, time_str: &str) -> QueryResult<i64> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 3 {
        return Err(QueryError::Malformed {
            file: file.to_string(),
            line,
            detail: format!("expected HH:MM:SS, got {time_str:?}"),
        });
    }
    let parse_part = |s: &str| -> QueryResult<i64> {
        s.parse::<i64>().map_err(|_| QueryError::Malformed {
            file: file.to_string(),
            line,
            detail: format!("invalid time component {s:?} in {time_str:?}"),
        })
    };
    let (h, m, s) = (parse_part(parts[0])?, parse_part(parts[1])?, parse_part(parts[2])?);
    Ok(h * 3600 + m * 60 + s + 1)
}

/// Load every query file in `dir`, filtering by `[sim_start, sim_end]` and
/// assigning sequential ids to the surviving rows.
pub fn load_queries_dir(dir: &Path, sim_start: i64, sim_end: i64, patience_s: i64, geohash_precision: u8) -> QueryResult<Vec<Query>> {
    let mut file_names: Vec<_> = std::fs::read_dir(dir)?.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    file_names.sort();

    let mut queries = Vec::new();
    let mut next_id: u32 = 0;

    for path in file_names {
        let file_label = path.display().to_string();
        let reader = std::fs::File::open(&path)?;
        let (mut rows, updated_id) = load_queries_reader(reader, &file_label, next_id, sim_start, sim_end, patience_s, geohash_precision)?;
        queries.append(&mut rows);
        next_id = updated_id;
    }

    Ok(queries)
}

/// Parse one query file from any `Read` source, filtering and id-assigning
/// as [`load_queries_dir`] does. `start_id` is the first id to assign; the
/// returned `u32` is the next unused id, threaded across files by the caller.
///
/// Split out from [`load_queries_dir`] so file parsing can be tested against
/// an in-memory `Cursor` without touching the filesystem.
pub fn load_queries_reader<R: Read>(
    reader: R,
    file_label: &str,
    start_id: u32,
    sim_start: i64,
    sim_end: i64,
    patience_s: i64,
    geohash_precision: u8,
) -> QueryResult<(Vec<Query>, u32)> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut queries = Vec::new();
    let mut next_id = start_id;

    for (line, result) in csv_reader.deserialize::<QueryRecord>().enumerate() {
        let line = line as u64 + 1;
        let row = result.map_err(|e| QueryError::Malformed {
            file: file_label.to_string(),
            line,
            detail: e.to_string(),
        })?;

        let timestamp = parse_timestamp(file_label, line, &row.time_str)?;
        if timestamp < sim_start || timestamp > sim_end {
            continue;
        }

        let origin = Location::new(row.ori_lat, row.ori_lon, geohash_precision);
        let destination = Location::new(row.des_lat, row.des_lon, geohash_precision);

        queries.push(Query::new(QueryId(next_id), timestamp, origin, destination, patience_s, geohash_precision));
        next_id += 1;
    }

    Ok((queries, next_id))
}
