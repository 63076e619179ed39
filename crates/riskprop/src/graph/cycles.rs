//! Circular supply-chain relationships.
//!
//! Loads the edge list into a petgraph `DiGraph` and reports every strongly
//! connected component that contains a cycle.

use crate::domain::{Edge, Node, Relation};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// A set of nodes that can all reach each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Cycle {
    /// Node ids in the cycle, sorted
    pub nodes: Vec<String>,
}

/// Find all cycles in the directed graph.
///
/// A component counts when it has more than one node, or a single node with
/// a self-loop. Edge endpoints missing from `nodes` take part as well.
/// Output is sorted for stable display.
#[must_use]
pub fn detect_cycles(nodes: &[Node], edges: &[Edge]) -> Vec<Cycle> {
    let graph = build_digraph(nodes, edges);

    let mut cycles: Vec<Cycle> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        })
        .map(|component| {
            let mut ids: Vec<String> = component.iter().map(|&ix| graph[ix].to_string()).collect();
            ids.sort();
            Cycle { nodes: ids }
        })
        .collect();

    cycles.sort();
    tracing::debug!(count = cycles.len(), "Cycle detection complete");
    cycles
}

/// Build a petgraph view of the graph, one graph node per distinct id.
fn build_digraph<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> DiGraph<&'a str, Relation> {
    let mut graph = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    let ids = nodes
        .iter()
        .map(|n| n.id.as_str())
        .chain(edges.iter().flat_map(|e| [e.source.as_str(), e.target.as_str()]));
    for id in ids {
        node_map.entry(id).or_insert_with(|| graph.add_node(id));
    }

    for edge in edges {
        let from = node_map[edge.source.as_str()];
        let to = node_map[edge.target.as_str()];
        graph.add_edge(from, to, edge.relation);
    }

    graph
}
