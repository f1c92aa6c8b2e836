//! Shortest directed paths from one entity, bounded by hop count.

use std::collections::{HashMap, VecDeque};

use lectern_core::models::GraphHit;
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::graph::IndexedGraph;

use super::TraversalConfig;

/// Label used when a path edge carries no relation (never expected).
const FALLBACK_RELATION: &str = "related_to";

/// For every node reachable from `start` within `config.max_hops` directed
/// edges, one shortest path (by edge count).
///
/// Hits are ordered by ascending hops; ties keep entity insertion order.
/// Returns an empty list when `start` is not in the graph.
pub fn trace(graph: &IndexedGraph, start: &str, config: &TraversalConfig) -> Vec<GraphHit> {
    let origin = match graph.get_node(start) {
        Some(idx) => idx,
        None => return Vec::new(),
    };

    let (depth, parent) = breadth_first(graph, origin, config.max_hops);

    let mut hits: Vec<GraphHit> = graph
        .graph
        .node_indices()
        .filter(|&idx| idx != origin)
        .filter_map(|idx| {
            let hops = *depth.get(&idx)?;
            Some(build_hit(graph, origin, idx, hops, &parent))
        })
        .collect();

    // Stable: equal hop counts keep insertion order.
    hits.sort_by_key(|h| h.hops);
    hits.truncate(config.max_results);
    hits
}

/// BFS limited to `max_hops`. Neighbours are expanded in index order so the
/// chosen shortest path is deterministic.
fn breadth_first(
    graph: &IndexedGraph,
    origin: NodeIndex,
    max_hops: usize,
) -> (HashMap<NodeIndex, usize>, HashMap<NodeIndex, NodeIndex>) {
    let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::new();

    depth.insert(origin, 0);
    queue.push_back((origin, 0usize));

    while let Some((node, d)) = queue.pop_front() {
        if d >= max_hops {
            continue;
        }
        let mut next: Vec<NodeIndex> = graph
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        next.sort();
        next.dedup();

        for n in next {
            if depth.contains_key(&n) {
                continue;
            }
            depth.insert(n, d + 1);
            parent.insert(n, node);
            queue.push_back((n, d + 1));
        }
    }

    (depth, parent)
}

fn build_hit(
    graph: &IndexedGraph,
    origin: NodeIndex,
    target: NodeIndex,
    hops: usize,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> GraphHit {
    let mut nodes = vec![target];
    let mut cursor = target;
    while cursor != origin {
        match parent.get(&cursor) {
            Some(&p) => {
                nodes.push(p);
                cursor = p;
            }
            None => break,
        }
    }
    nodes.reverse();

    let relations = nodes
        .windows(2)
        .map(|pair| {
            graph
                .edge(pair[0], pair[1])
                .map(|e| e.label.clone())
                .unwrap_or_else(|| FALLBACK_RELATION.to_string())
        })
        .collect();

    let path = nodes
        .iter()
        .filter_map(|&idx| graph.label(idx).map(str::to_string))
        .collect();

    GraphHit {
        entity: graph.label(target).unwrap_or_default().to_string(),
        path,
        relations,
        hops,
    }
}
