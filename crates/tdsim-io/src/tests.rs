use std::io::Cursor;

use tdsim_core::{EdgeId, QueryId, TaxiId, VertexId};
use tdsim_network::RoadNetwork;
use tdsim_sim::{SimObserver, SimTally};

use crate::event_log::CsvEventLogger;
use crate::network_loader::{load_edges_reader, load_vertices_reader};

const PRECISION: u8 = 5;

#[test]
fn load_vertices_populates_network() {
    let csv = "v_id,lat,lon\n0,39.9042,116.4074\n1,39.9150,116.4200\n";
    let mut net = RoadNetwork::new(PRECISION);
    load_vertices_reader(Cursor::new(csv), "vertices.csv", &mut net).unwrap();

    assert_eq!(net.vertex_count(), 2);
    assert_eq!(net.get_vertex(VertexId(0)).unwrap().location.lat, 39.9042);
}

#[test]
fn load_edges_links_existing_vertices() {
    let vertices = "v_id,lat,lon\n0,39.9042,116.4074\n1,39.9150,116.4200\n";
    let edges = "e_id,start_vid,end_vid,length\n0,0,1,713.4\n";

    let mut net = RoadNetwork::new(PRECISION);
    load_vertices_reader(Cursor::new(vertices), "vertices.csv", &mut net).unwrap();
    load_edges_reader(Cursor::new(edges), "edges.csv", &mut net).unwrap();

    assert_eq!(net.edge_count(), 1);
    assert_eq!(net.edge_weight(VertexId(0), VertexId(1)), 713.4);
}

#[test]
fn load_edges_auto_creates_unseen_endpoints() {
    let edges = "e_id,start_vid,end_vid,length\n0,7,8,100.0\n";
    let mut net = RoadNetwork::new(PRECISION);
    load_edges_reader(Cursor::new(edges), "edges.csv", &mut net).unwrap();

    assert_eq!(net.vertex_count(), 2);
    assert!(net.get_vertex(VertexId(7)).unwrap().location.is_unplaced());
}

#[test]
fn malformed_vertex_row_is_an_error() {
    let csv = "v_id,lat,lon\nnot-a-number,39.9042,116.4074\n";
    let mut net = RoadNetwork::new(PRECISION);
    let result = load_vertices_reader(Cursor::new(csv), "vertices.csv", &mut net);
    assert!(result.is_err());
}

#[test]
fn csv_event_logger_creates_files_with_headers() {
    let dir = tempfile::tempdir().unwrap();
    let mut logger = CsvEventLogger::new(dir.path()).unwrap();
    logger.finish().unwrap();

    assert!(dir.path().join("events.csv").exists());
    assert!(dir.path().join("tally.csv").exists());

    let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
    let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(headers, ["tick", "kind", "query_id", "taxi_id"]);
}

#[test]
fn csv_event_logger_writes_one_row_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let mut logger = CsvEventLogger::new(dir.path()).unwrap();

    logger.on_dispatched(1, QueryId(0), TaxiId(0));
    logger.on_picked_up(5, TaxiId(0), QueryId(0));
    logger.on_dropped_off(100, TaxiId(0), QueryId(0));
    logger.on_sim_end(&SimTally { waiting: 0, riding: 0, completed: 1, cancelled: 0 });

    assert!(logger.take_error().is_none());

    let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
    let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "dispatched");
    assert_eq!(&rows[1][1], "picked_up");
    assert_eq!(&rows[2][1], "dropped_off");

    let mut tally_rdr = csv::Reader::from_path(dir.path().join("tally.csv")).unwrap();
    let tally_rows: Vec<_> = tally_rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(tally_rows.len(), 1);
    assert_eq!(&tally_rows[0][2], "1"); // completed
}

#[test]
fn csv_event_logger_finish_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut logger = CsvEventLogger::new(dir.path()).unwrap();
    logger.finish().unwrap();
    logger.finish().unwrap();
}
