//! Dependency tree rooted at one node.

use crate::domain::{Edge, Node, Relation, data::index_nodes};
use crate::graph::AdjacencyIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A node in a dependency tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// The graph node
    #[serde(flatten)]
    pub node: Node,

    /// Relation of the edge leading here from the parent (`None` at the root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,

    /// Children, in edge-list order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, itself included.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Build the tree reachable from `root_id` along outgoing edges.
///
/// Returns `None` when `root_id` is not a node. A single visited set spans
/// the whole walk, so each node appears once, under the first parent that
/// reaches it depth-first. Edge targets that are not nodes are dropped.
#[must_use]
pub fn build_tree(nodes: &[Node], edges: &[Edge], root_id: &str) -> Option<TreeNode> {
    let by_id = index_nodes(nodes);
    let adjacency = AdjacencyIndex::build(edges);
    let mut visited = HashSet::new();
    build_node(root_id, None, &by_id, &adjacency, &mut visited)
}

fn build_node<'a>(
    id: &'a str,
    relation: Option<Relation>,
    by_id: &HashMap<&'a str, &'a Node>,
    adjacency: &AdjacencyIndex<'a>,
    visited: &mut HashSet<&'a str>,
) -> Option<TreeNode> {
    if !visited.insert(id) {
        return None;
    }
    let node = *by_id.get(id)?;

    let children = adjacency
        .outgoing(id)
        .iter()
        .filter_map(|edge| {
            build_node(
                edge.target.as_str(),
                Some(edge.relation),
                by_id,
                adjacency,
                visited,
            )
        })
        .collect();

    Some(TreeNode {
        node: node.clone(),
        relation,
        children,
    })
}
