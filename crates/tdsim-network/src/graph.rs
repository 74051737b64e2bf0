//! Road network representation: vertices, directed edges, and their
//! adjacency.
//!
//! # Data layout
//!
//! Vertex and edge ids are whatever integers the input data uses (CSV `v_id`
//! / `e_id` columns) — not necessarily dense or zero-based. The network is
//! therefore `HashMap`-indexed rather than built as a fixed CSR array, which
//! also lets `add_edge` auto-create endpoints it has not seen yet (the
//! construction-order contract documented in `SPEC_FULL.md` §9: load
//! vertices before edges in practice, but the graph tolerates either order).

use std::collections::HashMap;

use tdsim_core::{great_circle_distance, EdgeId, Location, VertexId};

/// A road intersection: an id, a geographic location, and a directed
/// adjacency map to neighboring vertices.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub location: Location,
    /// `{neighbor_id -> outgoing_edge_id}`, directed.
    pub neighbors: HashMap<VertexId, EdgeId>,
}

/// A directed road segment.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    /// Length in meters.
    pub weight: f64,
}

/// Directed weighted road-network graph.
///
/// Do not construct the fields directly from outside the crate; use
/// [`RoadNetwork::new`] plus [`RoadNetwork::add_vertex`]/[`RoadNetwork::add_edge`].
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    vertices: HashMap<VertexId, Vertex>,
    edges: HashMap<EdgeId, Edge>,
    geohash_precision: u8,
}

impl RoadNetwork {
    /// Construct an empty network. `geohash_precision` is stamped on every
    /// vertex's `Location` (including auto-created, unplaced ones).
    pub fn new(geohash_precision: u8) -> Self {
        Self { vertices: HashMap::new(), edges: HashMap::new(), geohash_precision }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add (or update the location of) a vertex. Existing adjacency is
    /// preserved — re-adding a vertex never wipes edges already attached to
    /// it (a deliberate simplification over the original, which replaced
    /// the whole vertex record; see `DESIGN.md`).
    pub fn add_vertex(&mut self, id: VertexId, lat: f64, lon: f64) {
        let location = Location::new(lat, lon, self.geohash_precision);
        self.vertices
            .entry(id)
            .and_modify(|v| v.location = location)
            .or_insert_with(|| Vertex { id, location, neighbors: HashMap::new() });
    }

    /// Add a directed edge, auto-creating `start`/`end` as unplaced vertices
    /// (NaN lat/lon) if they do not already exist.
    pub fn add_edge(&mut self, id: EdgeId, start: VertexId, end: VertexId, weight: f64) {
        self.vertices.entry(start).or_insert_with(|| Vertex {
            id: start,
            location: Location::unplaced(),
            neighbors: HashMap::new(),
        });
        self.vertices.entry(end).or_insert_with(|| Vertex {
            id: end,
            location: Location::unplaced(),
            neighbors: HashMap::new(),
        });

        self.edges.insert(id, Edge { id, start, end, weight });
        self.vertices.get_mut(&start).unwrap().neighbors.insert(end, id);
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Neighbor vertex ids of `v`, in arbitrary (hash-map) order.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.get(&v).into_iter().flat_map(|vx| vx.neighbors.keys().copied())
    }

    pub fn edge_id(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.vertices.get(&u).and_then(|vx| vx.neighbors.get(&v).copied())
    }

    /// Weight of edge `(u, v)`, or `+infinity` if no such edge exists.
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> f64 {
        self.edge_id(u, v).and_then(|e| self.edges.get(&e)).map_or(f64::INFINITY, |e| e.weight)
    }

    /// Great-circle distance between two vertices' locations.
    pub fn straight_distance(&self, u: VertexId, v: VertexId) -> f64 {
        match (self.vertices.get(&u), self.vertices.get(&v)) {
            (Some(a), Some(b)) => great_circle_distance(a.location, b.location),
            _ => f64::INFINITY,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn geohash_precision(&self) -> u8 {
        self.geohash_precision
    }
}
