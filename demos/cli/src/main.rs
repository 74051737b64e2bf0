//! `tdsim-cli` — a runnable example over a small embedded road network.
//!
//! Wires the full pipeline this workspace implements: CSV road-network and
//! query loading (`tdsim-io`/`tdsim-query`) into a [`tdsim_sim::SimBuilder`],
//! run with a console observer, summarized into a final tally — the same
//! load → build → run → print shape as the teacher's `demos/xsmall` binary,
//! over this domain's inputs instead of a population-mobility schedule.
//!
//! Swap the embedded strings below for real `vertices.csv`/`edges.csv`/
//! query files (§6 "External Interfaces") to run against an actual city
//! extract; nothing else in this binary changes.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use tdsim_core::SimConfig;
use tdsim_network::RoadNetwork;
use tdsim_query::loader::load_queries_reader;
use tdsim_sim::{LoggingObserver, SimBuilder};

// A six-vertex, five-segment road strip near the original dataset's Beijing
// coordinates, each segment ~300 m, wired as a bidirectional chain.
const VERTICES_CSV: &str = "\
v_id,lat,lon
0,39.9042,116.4074
1,39.9060,116.4090
2,39.9080,116.4110
3,39.9100,116.4130
4,39.9120,116.4150
5,39.9140,116.4170
";

const EDGES_CSV: &str = "\
e_id,start_vid,end_vid,length
0,0,1,300.0
1,1,0,300.0
2,1,2,300.0
3,2,1,300.0
4,2,3,300.0
5,3,2,300.0
6,3,4,300.0
7,4,3,300.0
8,4,5,300.0
9,5,4,300.0
";

// One line per query: `HH:MM:SS,ori_lat,ori_lon,des_lat,des_lon`.
const QUERIES_CSV: &str = "\
09:00:05,39.9042,116.4074,39.9140,116.4170
09:05:00,39.9060,116.4090,39.9042,116.4074
09:10:00,39.9140,116.4170,39.9080,116.4110
";

fn main() -> Result<()> {
    println!("=== tdsim-cli — taxi-dispatch simulation ===");

    let config = SimConfig {
        num_taxi: 3,
        ..SimConfig::default()
    };

    let mut network = RoadNetwork::new(config.geohash_precision);
    tdsim_io::network_loader::load_vertices_reader(Cursor::new(VERTICES_CSV), "vertices.csv", &mut network)?;
    tdsim_io::network_loader::load_edges_reader(Cursor::new(EDGES_CSV), "edges.csv", &mut network)?;
    println!("Road network: {} vertices, {} edges", network.vertex_count(), network.edge_count());

    let (queries, _) = load_queries_reader(
        Cursor::new(QUERIES_CSV),
        "queries.csv",
        0,
        config.sim_start,
        config.sim_end,
        config.patience_s,
        config.geohash_precision,
    )?;
    println!("Loaded {} queries", queries.len());

    let mut sim = SimBuilder::new(config.clone(), network).queries(queries).build()?;
    println!(
        "Fleet: {} taxis, capacity {} | window [{}, {}], step {}s",
        sim.taxi_set.len(),
        config.taxi_capacity,
        config.sim_start,
        config.sim_end,
        config.time_step_s
    );
    println!();

    let t0 = Instant::now();
    let mut observer = LoggingObserver;
    let tally = sim.run(&mut observer)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  waiting: {}  riding: {}  completed: {}  cancelled: {}",
        tally.waiting, tally.riding, tally.completed, tally.cancelled
    );

    Ok(())
}
