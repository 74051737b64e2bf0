//! Shortest-path search: BFS, Dijkstra, Greedy best-first, A*, Floyd-Warshall,
//! and single-source Dijkstra for offline matrix construction.
//!
//! All searches share [`construct_path`] to turn a `came_from` predecessor
//! map into a [`Path`]. Per the specification, an unreachable target yields
//! an empty `Path` (empty vertex/edge lists, zero distance) rather than an
//! error — callers detect this by checking `path.edges.is_empty()`.
//!
//! Priority searches use the "insert duplicates, skip stale" idiom: a
//! neighbor may be pushed onto the heap more than once as cheaper costs are
//! discovered, and a popped entry whose cost no longer matches the best
//! known cost is simply skipped, mirroring `tdsim-network`'s Dijkstra-based
//! sibling crates' `BinaryHeap<Reverse<(cost, id)>>` convention.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use ordered_float::OrderedFloat;
use tdsim_core::VertexId;

use crate::graph::RoadNetwork;

/// An ordered vertex/edge sequence and its total distance in meters.
#[derive(Clone, Debug, Default)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<tdsim_core::EdgeId>,
    pub distance: f64,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Reconstruct a [`Path`] from `s` to `e` given a `came_from` predecessor map
/// (`came_from[v] = predecessor of v`; `s` itself has no entry). Returns an
/// empty `Path` if `e` is unreachable from `s`.
pub fn construct_path(network: &RoadNetwork, s: VertexId, e: VertexId, came_from: &HashMap<VertexId, VertexId>) -> Path {
    let mut vertices = vec![e];
    let mut current = e;
    while current != s {
        match came_from.get(&current) {
            Some(&prev) => {
                current = prev;
                vertices.push(current);
            }
            None => {
                // s --> e is unreachable.
                return Path::default();
            }
        }
    }
    vertices.reverse();

    let mut edges = Vec::with_capacity(vertices.len().saturating_sub(1));
    let mut distance = 0.0;
    for pair in vertices.windows(2) {
        let (u, v) = (pair[0], pair[1]);
        if let Some(eid) = network.edge_id(u, v) {
            edges.push(eid);
        }
        distance += network.edge_weight(u, v);
    }

    Path { vertices, edges, distance }
}

/// Breadth-first search for reachability; returns the first path found
/// (unweighted, not necessarily shortest by distance).
pub fn bfs(network: &RoadNetwork, s: VertexId, e: VertexId) -> Path {
    let mut frontier = VecDeque::new();
    frontier.push_back(s);
    let mut came_from: HashMap<VertexId, VertexId> = HashMap::new();
    let mut visited: std::collections::HashSet<VertexId> = std::collections::HashSet::new();
    visited.insert(s);

    while let Some(current) = frontier.pop_front() {
        if current == e {
            break;
        }
        for neighbor in network.neighbors(current) {
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
                came_from.insert(neighbor, current);
            }
        }
    }

    construct_path(network, s, e, &came_from)
}

/// Exact shortest path by Dijkstra's algorithm.
pub fn dijkstra(network: &RoadNetwork, s: VertexId, e: VertexId) -> Path {
    let mut cost_so_far: HashMap<VertexId, f64> = HashMap::new();
    let mut came_from: HashMap<VertexId, VertexId> = HashMap::new();
    cost_so_far.insert(s, 0.0);

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), s)));

    while let Some(Reverse((cost, current))) = heap.pop() {
        if current == e {
            break;
        }
        if cost.0 > *cost_so_far.get(&current).unwrap_or(&f64::INFINITY) {
            continue;
        }
        for neighbor in network.neighbors(current) {
            let new_cost = cost_so_far[&current] + network.edge_weight(current, neighbor);
            if new_cost < *cost_so_far.get(&neighbor).unwrap_or(&f64::INFINITY) {
                cost_so_far.insert(neighbor, new_cost);
                came_from.insert(neighbor, current);
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    construct_path(network, s, e, &came_from)
}

/// Greedy best-first search: expands the neighbor with smallest straight-line
/// distance to the goal, ignoring accumulated cost. Not guaranteed optimal.
pub fn greedy_best_first(network: &RoadNetwork, s: VertexId, e: VertexId) -> Path {
    let mut came_from: HashMap<VertexId, VertexId> = HashMap::new();
    let mut visited: std::collections::HashSet<VertexId> = std::collections::HashSet::new();
    visited.insert(s);

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), s)));

    while let Some(Reverse((_, current))) = heap.pop() {
        if current == e {
            break;
        }
        for neighbor in network.neighbors(current) {
            if visited.insert(neighbor) {
                came_from.insert(neighbor, current);
                let priority = network.straight_distance(neighbor, e);
                heap.push(Reverse((OrderedFloat(priority), neighbor)));
            }
        }
    }

    construct_path(network, s, e, &came_from)
}

/// A* search: cost-so-far plus straight-line heuristic. The production
/// search used by taxis to compute routes.
pub fn astar(network: &RoadNetwork, s: VertexId, e: VertexId) -> Path {
    let mut cost_so_far: HashMap<VertexId, f64> = HashMap::new();
    let mut came_from: HashMap<VertexId, VertexId> = HashMap::new();
    cost_so_far.insert(s, 0.0);

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), s)));

    while let Some(Reverse((_, current))) = heap.pop() {
        if current == e {
            break;
        }
        for neighbor in network.neighbors(current) {
            let new_cost = cost_so_far[&current] + network.edge_weight(current, neighbor);
            if new_cost < *cost_so_far.get(&neighbor).unwrap_or(&f64::INFINITY) {
                cost_so_far.insert(neighbor, new_cost);
                came_from.insert(neighbor, current);
                let priority = new_cost + network.straight_distance(neighbor, e);
                heap.push(Reverse((OrderedFloat(priority), neighbor)));
            }
        }
    }

    construct_path(network, s, e, &came_from)
}

/// All-pairs shortest distances via Floyd-Warshall. `O(|V|^3)` time and
/// `O(|V|^2)` space — intended for small offline graphs only (`|V| <= 5000`),
/// never called from the simulation driver.
pub fn floyd_warshall(network: &RoadNetwork) -> HashMap<VertexId, HashMap<VertexId, f64>> {
    let ids: Vec<VertexId> = network.vertex_ids().collect();

    let mut dist: HashMap<VertexId, HashMap<VertexId, f64>> = HashMap::new();
    for &u in &ids {
        let mut row = HashMap::new();
        for &v in &ids {
            row.insert(v, if u == v { 0.0 } else { f64::INFINITY });
        }
        dist.insert(u, row);
    }
    for &u in &ids {
        for v in network.neighbors(u) {
            let w = network.edge_weight(u, v);
            dist.get_mut(&u).unwrap().insert(v, w);
        }
    }

    for &k in &ids {
        for &i in &ids {
            let via_k = dist[&i][&k];
            if !via_k.is_finite() {
                continue;
            }
            for &j in &ids {
                let candidate = via_k + dist[&k][&j];
                let current = dist[&i][&j];
                if candidate < current {
                    dist.get_mut(&i).unwrap().insert(j, candidate);
                }
            }
        }
    }

    dist
}

/// Dijkstra from a single source to every reachable vertex; returns the
/// `came_from` predecessor map for use by [`construct_path`] (used by the
/// spatio-temporal index's offline distance-matrix build).
pub fn single_source_dijkstra(network: &RoadNetwork, start: VertexId) -> HashMap<VertexId, VertexId> {
    let mut cost_so_far: HashMap<VertexId, f64> = HashMap::new();
    let mut came_from: HashMap<VertexId, VertexId> = HashMap::new();
    cost_so_far.insert(start, 0.0);

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), start)));

    while let Some(Reverse((cost, current))) = heap.pop() {
        if cost.0 > *cost_so_far.get(&current).unwrap_or(&f64::INFINITY) {
            continue;
        }
        for neighbor in network.neighbors(current) {
            let new_cost = cost_so_far[&current] + network.edge_weight(current, neighbor);
            if new_cost < *cost_so_far.get(&neighbor).unwrap_or(&f64::INFINITY) {
                cost_so_far.insert(neighbor, new_cost);
                came_from.insert(neighbor, current);
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    came_from
}
