//! Shortest-path solver interface and the default Dijkstra implementation.
//!
//! The map core only *builds* the weighted graph and *consumes* an ordered
//! arc-id path; the solving algorithm itself is a collaborator behind
//! [`PathSolver`], so hosts can substitute A*, contraction hierarchies, or a
//! remote service without touching the orchestrator.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use carto_core::{ArcId, NodeId};

/// The weighted directed graph handed to a solver.
///
/// `arcs`, `endpoints`, and `weights` are parallel arrays.  The builder
/// guarantees that every endpoint id appears in `nodes` and that every
/// weight is `≥ 0` (with `+∞` marking an impassable arc).
#[derive(Debug, Clone, Default)]
pub struct WeightedSubgraph {
    pub nodes: Vec<NodeId>,
    pub arcs: Vec<ArcId>,
    /// `(start node, end node)` of each arc.
    pub endpoints: Vec<(NodeId, NodeId)>,
    pub weights: Vec<f64>,
}

/// Pluggable shortest-path engine.
pub trait PathSolver {
    /// An ordered sequence of arc ids forming a minimum-total-weight path
    /// from `source` to `target`, or an empty sequence if `target` is
    /// unreachable.
    fn shortest_path(
        &self,
        graph: &WeightedSubgraph,
        source: NodeId,
        target: NodeId,
    ) -> Vec<ArcId>;
}

// ── DijkstraSolver ────────────────────────────────────────────────────────────

/// Textbook Dijkstra over the subgraph's adjacency, used when the host does
/// not supply its own solver.
pub struct DijkstraSolver;

/// Heap entry ordered as a min-heap on cost, with the node index as a
/// deterministic tie-break.
struct State {
    cost: f64,
    node: usize,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathSolver for DijkstraSolver {
    fn shortest_path(
        &self,
        graph: &WeightedSubgraph,
        source: NodeId,
        target: NodeId,
    ) -> Vec<ArcId> {
        if source == target {
            return Vec::new();
        }

        // Dense re-indexing of the node ids for array-based state.
        let index_of: FxHashMap<NodeId, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect();
        let (Some(&src), Some(&dst)) = (index_of.get(&source), index_of.get(&target)) else {
            return Vec::new();
        };

        // Outgoing arc indices per node.
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
        for (arc_idx, &(from, _)) in graph.endpoints.iter().enumerate() {
            if graph.weights[arc_idx].is_finite() {
                adjacency[index_of[&from]].push(arc_idx);
            }
        }

        let mut dist = vec![f64::INFINITY; graph.nodes.len()];
        let mut prev_arc: Vec<Option<usize>> = vec![None; graph.nodes.len()];
        dist[src] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 0.0, node: src });

        while let Some(State { cost, node }) = heap.pop() {
            if node == dst {
                return reconstruct(graph, &index_of, &prev_arc, dst);
            }
            // Skip stale heap entries.
            if cost > dist[node] {
                continue;
            }
            for &arc_idx in &adjacency[node] {
                let neighbor = index_of[&graph.endpoints[arc_idx].1];
                let next_cost = cost + graph.weights[arc_idx];
                if next_cost < dist[neighbor] {
                    dist[neighbor] = next_cost;
                    prev_arc[neighbor] = Some(arc_idx);
                    heap.push(State { cost: next_cost, node: neighbor });
                }
            }
        }

        // Target unreachable: "no path" is a normal outcome.
        Vec::new()
    }
}

fn reconstruct(
    graph: &WeightedSubgraph,
    index_of: &FxHashMap<NodeId, usize>,
    prev_arc: &[Option<usize>],
    target: usize,
) -> Vec<ArcId> {
    let mut arcs = Vec::new();
    let mut current = target;
    while let Some(arc_idx) = prev_arc[current] {
        arcs.push(graph.arcs[arc_idx]);
        current = index_of[&graph.endpoints[arc_idx].0];
    }
    arcs.reverse();
    arcs
}
