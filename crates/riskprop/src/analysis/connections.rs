//! Direct connections of a single node.

use crate::domain::Edge;
use serde::Serialize;

/// Edges touching one node, split by direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connections<'a> {
    /// Edges pointing at the node
    pub incoming: Vec<&'a Edge>,
    /// Edges leaving the node
    pub outgoing: Vec<&'a Edge>,
}

impl Connections<'_> {
    /// Number of distinct edges touching the node.
    ///
    /// A self-loop appears in both lists but is counted once.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        let self_loops = self
            .outgoing
            .iter()
            .filter(|e| e.source == e.target)
            .count();
        self.incoming.len() + self.outgoing.len() - self_loops
    }
}

/// Collect the edges into and out of `node_id`, in edge-list order.
#[must_use]
pub fn connections<'a>(node_id: &str, edges: &'a [Edge]) -> Connections<'a> {
    Connections {
        incoming: edges.iter().filter(|e| e.target == node_id).collect(),
        outgoing: edges.iter().filter(|e| e.source == node_id).collect(),
    }
}
