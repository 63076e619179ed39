//! Graph data container, loading and validation.

use super::{Edge, MAX_RISK_SCORE, Node};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// A complete supply-chain graph: the node set plus the edge set.
///
/// The on-disk format is a JSON object `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// All nodes
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// All edges
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    /// Create a graph from its parts.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a graph from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let graph: GraphData = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Load a graph from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let graph = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Loaded graph"
        );
        Ok(graph)
    }

    /// Check the data model invariants.
    ///
    /// Node ids must be unique and risk scores must not exceed 100. Dangling
    /// edge endpoints are tolerated; they are only logged.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::InvalidGraph(format!("duplicate node id '{}'", node.id)));
            }
            if node.risk_score > MAX_RISK_SCORE {
                return Err(Error::InvalidGraph(format!(
                    "node '{}' has risk score {} (maximum is {MAX_RISK_SCORE})",
                    node.id, node.risk_score
                )));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    tracing::debug!(
                        source = %edge.source,
                        target = %edge.target,
                        missing = %endpoint,
                        "Edge references unknown node"
                    );
                }
            }
        }

        Ok(())
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node by id, failing with [`Error::NodeNotFound`].
    pub fn require_node(&self, id: &str) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }
}

/// Build an id -> node lookup.
///
/// When ids repeat, the first node wins, matching a linear search.
pub(crate) fn index_nodes(nodes: &[Node]) -> HashMap<&str, &Node> {
    let mut index = HashMap::with_capacity(nodes.len());
    for node in nodes {
        index.entry(node.id.as_str()).or_insert(node);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeType, Relation};
    use std::io::Write;

    #[test]
    fn parses_graph_json() {
        let json = r#"{
            "nodes": [
                {"id": "a", "type": "product", "name": "A", "risk_score": 40},
                {"id": "b", "type": "software", "name": "B", "risk_score": 60, "vendor": "Acme"}
            ],
            "edges": [
                {"source": "a", "target": "b", "relation": "depends_on", "confidence": 0.9}
            ]
        }"#;

        let graph = GraphData::from_json_str(json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges[0].relation, Relation::DependsOn);
        assert_eq!(graph.node("b").unwrap().vendor.as_deref(), Some("Acme"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let graph = GraphData::new(
            vec![
                Node::new("a", NodeType::Product, "A", 1),
                Node::new("a", NodeType::Product, "A again", 2),
            ],
            vec![],
        );
        let err = graph.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_risk_above_maximum() {
        let json = r#"{"nodes": [{"id": "a", "type": "product", "name": "A", "risk_score": 101}]}"#;
        let err = GraphData::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn tolerates_dangling_edges() {
        let graph = GraphData::new(
            vec![Node::new("a", NodeType::Product, "A", 1)],
            vec![Edge::new("a", "ghost", Relation::DependsOn)],
        );
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GraphData::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": "x", "type": "organization", "name": "X", "risk_score": 5}}], "edges": []}}"#
        )
        .unwrap();

        let graph = GraphData::load(file.path()).unwrap();
        assert_eq!(graph.nodes[0].id, "x");
    }

    #[test]
    fn require_node_reports_missing_id() {
        let graph = GraphData::default();
        assert!(matches!(
            graph.require_node("nope"),
            Err(Error::NodeNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn index_keeps_first_duplicate() {
        let nodes = vec![
            Node::new("a", NodeType::Product, "first", 10),
            Node::new("a", NodeType::Product, "second", 90),
        ];
        let index = index_nodes(&nodes);
        assert_eq!(index["a"].name, "first");
    }
}
