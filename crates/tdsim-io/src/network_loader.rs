//! CSV loaders for `vertices.csv` / `edges.csv` (§6 "Inputs").
//!
//! ```csv
//! # vertices.csv
//! v_id,lat,lon
//! 1,39.904200,116.407400
//!
//! # edges.csv
//! e_id,start_vid,end_vid,length
//! 1,1,2,713.4
//! ```
//!
//! Vertices must be loaded before edges in practice — `add_edge` auto-creates
//! unplaced endpoints it has not seen yet (`tdsim-network`'s documented
//! construction-order contract), so loading out of order silently produces
//! vertices with `NaN` coordinates rather than failing.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tdsim_core::{EdgeId, VertexId};
use tdsim_network::RoadNetwork;

use crate::error::{IoError, IoResult};

#[derive(Deserialize)]
struct VertexRecord {
    v_id: u32,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    e_id: u32,
    start_vid: u32,
    end_vid: u32,
    length: f64,
}

/// Load a full road network from `vertices_path`/`edges_path`.
pub fn load_road_network(vertices_path: &Path, edges_path: &Path, geohash_precision: u8) -> IoResult<RoadNetwork> {
    let mut network = RoadNetwork::new(geohash_precision);

    let vertices_label = vertices_path.display().to_string();
    let vertices_file = std::fs::File::open(vertices_path)?;
    load_vertices_reader(vertices_file, &vertices_label, &mut network)?;

    let edges_label = edges_path.display().to_string();
    let edges_file = std::fs::File::open(edges_path)?;
    load_edges_reader(edges_file, &edges_label, &mut network)?;

    Ok(network)
}

/// Parse `vertices.csv` from any `Read` source into an existing network.
///
/// Split out from [`load_road_network`] so parsing can be tested against an
/// in-memory `Cursor` without touching the filesystem.
pub fn load_vertices_reader<R: Read>(reader: R, file_label: &str, network: &mut RoadNetwork) -> IoResult<()> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    for (line, result) in csv_reader.deserialize::<VertexRecord>().enumerate() {
        let line = line as u64 + 2; // +1 for 1-based, +1 for the header row
        let row: VertexRecord = result.map_err(|e| IoError::Malformed {
            file: file_label.to_string(),
            line,
            detail: e.to_string(),
        })?;
        network.add_vertex(VertexId(row.v_id), row.lat, row.lon);
    }
    Ok(())
}

/// Parse `edges.csv` from any `Read` source into an existing network.
pub fn load_edges_reader<R: Read>(reader: R, file_label: &str, network: &mut RoadNetwork) -> IoResult<()> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    for (line, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let line = line as u64 + 2;
        let row: EdgeRecord = result.map_err(|e| IoError::Malformed {
            file: file_label.to_string(),
            line,
            detail: e.to_string(),
        })?;
        network.add_edge(EdgeId(row.e_id), VertexId(row.start_vid), VertexId(row.end_vid), row.length);
    }
    Ok(())
}
