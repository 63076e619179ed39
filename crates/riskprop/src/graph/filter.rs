//! Type and minimum-risk projection of the graph.

use crate::domain::{Edge, MAX_RISK_SCORE, Node, NodeType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Which node types a view keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    /// Keep every type
    #[default]
    All,

    /// Keep only this type
    Only(NodeType),
}

impl TypeFilter {
    /// Whether a node of `node_type` passes the filter.
    #[must_use]
    pub fn accepts(self, node_type: NodeType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => wanted == node_type,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => write!(f, "{t}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

/// Predicates selecting a subgraph: a type filter plus a risk floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Node types to keep
    pub node_type: TypeFilter,

    /// Minimum risk score (inclusive)
    pub min_risk: u8,
}

impl ViewFilter {
    /// Create a filter, rejecting a risk floor above 100.
    pub fn new(node_type: TypeFilter, min_risk: u8) -> Result<Self> {
        if min_risk > MAX_RISK_SCORE {
            return Err(Error::InvalidFilter(format!(
                "minimum risk {min_risk} exceeds {MAX_RISK_SCORE}"
            )));
        }
        Ok(Self {
            node_type,
            min_risk,
        })
    }

    /// Whether `node` passes both predicates.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        self.node_type.accepts(node.node_type) && node.risk_score >= self.min_risk
    }

    /// Select matching nodes, then the edges whose endpoints both survived.
    ///
    /// Returns freshly allocated copies; the input is untouched.
    #[must_use]
    pub fn project(&self, nodes: &[Node], edges: &[Edge]) -> GraphView {
        let nodes: Vec<Node> = nodes.iter().filter(|n| self.matches(n)).cloned().collect();
        let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = edges
            .iter()
            .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            filter = %self.node_type,
            min_risk = self.min_risk,
            nodes = nodes.len(),
            "Projected graph view"
        );

        GraphView { nodes, edges }
    }
}

/// A filtered copy of the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    /// Nodes passing the filter, in original order
    pub nodes: Vec<Node>,

    /// Edges between kept nodes, in original order
    pub edges: Vec<Edge>,
}
