//! Whole-graph centrality metrics.
//!
//! These are independent of propagation; they describe how connected each
//! node is and how risky its surroundings are.

use crate::domain::{Edge, Node, data::index_nodes};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Count of edge endpoints per node.
///
/// Every node starts at zero. Each edge adds one to its source and one to its
/// target, so a self-loop counts twice and parallel edges count separately.
/// Edge endpoints that are not in `nodes` still receive a count.
#[must_use]
pub fn degree_centrality(nodes: &[Node], edges: &[Edge]) -> BTreeMap<String, usize> {
    let mut degree: BTreeMap<String, usize> =
        nodes.iter().map(|n| (n.id.clone(), 0)).collect();

    for edge in edges {
        *degree.entry(edge.source.clone()).or_default() += 1;
        *degree.entry(edge.target.clone()).or_default() += 1;
    }

    degree
}

/// Neighbour count scaled by the mean risk of those neighbours.
///
/// For each node, `neighbors * (1 + avg_neighbor_risk / 100)` where
/// neighbours are the distinct nodes joined to it by an edge in either
/// direction. Unknown neighbour ids contribute a risk of 0; a node without
/// neighbours scores 0.
#[must_use]
pub fn risk_weighted_centrality(nodes: &[Node], edges: &[Edge]) -> BTreeMap<String, f64> {
    let neighbors = neighbor_index(edges);
    let node_index = index_nodes(nodes);

    nodes
        .iter()
        .map(|node| {
            let score = neighbors.get(node.id.as_str()).map_or(0.0, |set| {
                let total: u64 = set
                    .iter()
                    .map(|id| node_index.get(id).map_or(0, |n| u64::from(n.risk_score)))
                    .sum();
                #[allow(clippy::cast_precision_loss)]
                let count = set.len() as f64;
                #[allow(clippy::cast_precision_loss)]
                let average = total as f64 / count;
                count * (1.0 + average / 100.0)
            });
            (node.id.clone(), score)
        })
        .collect()
}

/// Sort scores descending, ties broken by id, and keep at most `limit`.
#[must_use]
pub fn top_ranked<T>(scores: &BTreeMap<String, T>, limit: usize) -> Vec<(&str, T)>
where
    T: Copy + PartialOrd,
{
    let mut ranked: Vec<(&str, T)> = scores.iter().map(|(id, &s)| (id.as_str(), s)).collect();
    // BTreeMap iteration is already id-ordered and the sort is stable
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

/// Distinct neighbours of every id, in either edge direction.
fn neighbor_index(edges: &[Edge]) -> HashMap<&str, HashSet<&str>> {
    let mut index: HashMap<&str, HashSet<&str>> = HashMap::new();
    for edge in edges {
        index
            .entry(edge.source.as_str())
            .or_default()
            .insert(edge.target.as_str());
        index
            .entry(edge.target.as_str())
            .or_default()
            .insert(edge.source.as_str());
    }
    index
}
