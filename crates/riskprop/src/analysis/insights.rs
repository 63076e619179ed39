//! Ecosystem-wide risk insights and recommendations.

use super::stats::rounded_average_risk;
use crate::domain::{Edge, Node, NodeType, Relation, Severity, data::index_nodes};
use crate::graph::AdjacencyIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Risk score at or above which a node counts as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 70;

/// Deepest hop explored when looking for dependency chains.
const MAX_CHAIN_DEPTH: usize = 3;

/// Number of dependency chains reported.
const MAX_CHAINS: usize = 3;

/// Separator between names in a rendered chain.
const CHAIN_SEPARATOR: &str = " → ";

/// Overall exposure of the ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureLevel {
    /// Few high-risk nodes
    Low,
    /// More than 2 high-risk nodes
    Medium,
    /// More than 5 high-risk nodes
    High,
    /// At least one critical node
    Critical,
}

impl fmt::Display for ExposureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExposureLevel::Low => "low",
            ExposureLevel::Medium => "medium",
            ExposureLevel::High => "high",
            ExposureLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Suggested follow-up action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Patch the critical vulnerabilities first
    PatchCritical {
        /// How many critical nodes exist
        count: usize,
    },
    /// Audit high-risk suppliers
    AuditHighRiskSuppliers,
    /// Add controls against cascading failures
    CascadeControls,
    /// Review supply chain contracts for security clauses
    ReviewContracts,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::PatchCritical { count: 1 } => {
                f.write_str("Prioritize patching 1 critical vulnerability")
            }
            Recommendation::PatchCritical { count } => {
                write!(f, "Prioritize patching {count} critical vulnerabilities")
            }
            Recommendation::AuditHighRiskSuppliers => {
                f.write_str("Conduct deep-dive audit on high-risk suppliers")
            }
            Recommendation::CascadeControls => {
                f.write_str("Implement additional controls for cascade scenarios")
            }
            Recommendation::ReviewContracts => {
                f.write_str("Review supply chain contracts for security clauses")
            }
        }
    }
}

/// Findings derived from the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Nodes with critical severity
    pub critical_count: usize,
    /// Nodes with a risk score of at least 70
    pub high_risk_count: usize,
    /// Vulnerability nodes
    pub vulnerability_count: usize,
    /// All nodes
    pub total_nodes: usize,
    /// All edges
    pub total_edges: usize,
    /// Mean risk score, rounded
    pub avg_risk: u8,
    /// Up to three organization-rooted chains ending in a leaf
    pub critical_chains: Vec<String>,
    /// Many high-risk nodes or any critical node
    pub has_high_exposure: bool,
    /// A vulnerability fans out to more than two `affected_by` targets
    pub has_cascade_risk: bool,
    /// Overall exposure
    pub exposure_level: ExposureLevel,
    /// Follow-up actions, most urgent first
    pub recommendations: Vec<Recommendation>,
}

impl Insights {
    /// Analyse the graph.
    #[must_use]
    pub fn compute(nodes: &[Node], edges: &[Edge]) -> Self {
        let critical_count = nodes
            .iter()
            .filter(|n| n.severity == Some(Severity::Critical))
            .count();
        let high_risk_count = nodes
            .iter()
            .filter(|n| n.risk_score >= HIGH_RISK_THRESHOLD)
            .count();
        let vulnerability_count = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Vulnerability)
            .count();

        let adjacency = AdjacencyIndex::build(edges);
        let has_cascade_risk = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Vulnerability)
            .any(|v| {
                adjacency
                    .outgoing(&v.id)
                    .iter()
                    .filter(|e| e.relation == Relation::AffectedBy)
                    .count()
                    > 2
            });

        let has_high_exposure = high_risk_count > 3 || critical_count > 0;
        let exposure_level = if critical_count > 0 {
            ExposureLevel::Critical
        } else if high_risk_count > 5 {
            ExposureLevel::High
        } else if high_risk_count > 2 {
            ExposureLevel::Medium
        } else {
            ExposureLevel::Low
        };

        let mut recommendations = Vec::new();
        if critical_count > 0 {
            recommendations.push(Recommendation::PatchCritical {
                count: critical_count,
            });
        }
        if has_high_exposure {
            recommendations.push(Recommendation::AuditHighRiskSuppliers);
        }
        if has_cascade_risk {
            recommendations.push(Recommendation::CascadeControls);
        }
        recommendations.push(Recommendation::ReviewContracts);

        Self {
            critical_count,
            high_risk_count,
            vulnerability_count,
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            avg_risk: rounded_average_risk(nodes),
            critical_chains: dependency_chains(nodes, &adjacency),
            has_high_exposure,
            has_cascade_risk,
            exposure_level,
            recommendations,
        }
    }
}

/// Walk forward from each organization and collect chains ending at a leaf.
///
/// The visited set is shared across one organization's walk, so a node
/// reached twice from the same root only contributes once.
fn dependency_chains(nodes: &[Node], adjacency: &AdjacencyIndex<'_>) -> Vec<String> {
    let by_id = index_nodes(nodes);
    let mut chains = Vec::new();

    for org in nodes.iter().filter(|n| n.node_type == NodeType::Organization) {
        let mut walk = ChainWalk {
            by_id: &by_id,
            adjacency,
            visited: HashSet::new(),
            chains: &mut chains,
        };
        walk.visit(&org.id, &mut Vec::new(), 0);
    }

    chains.truncate(MAX_CHAINS);
    chains
}

struct ChainWalk<'w, 'a> {
    by_id: &'w HashMap<&'a str, &'a Node>,
    adjacency: &'w AdjacencyIndex<'a>,
    visited: HashSet<&'a str>,
    chains: &'w mut Vec<String>,
}

impl<'a> ChainWalk<'_, 'a> {
    fn visit(&mut self, id: &'a str, names: &mut Vec<&'a str>, depth: usize) {
        if depth > MAX_CHAIN_DEPTH || !self.visited.insert(id) {
            return;
        }
        let Some(node) = self.by_id.get(id).copied() else {
            return;
        };

        names.push(node.name.as_str());
        let adjacency = self.adjacency;
        let outgoing = adjacency.outgoing(id);
        if outgoing.is_empty() && names.len() >= 3 {
            self.chains.push(names.join(CHAIN_SEPARATOR));
        }
        for &edge in outgoing {
            self.visit(edge.target.as_str(), names, depth + 1);
        }
        names.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, node_type: NodeType, risk: u8) -> Node {
        Node::new(id, node_type, id.to_uppercase(), risk)
    }

    #[test]
    fn quiet_graph_has_low_exposure() {
        let nodes = vec![
            node("o", NodeType::Organization, 10),
            node("p", NodeType::Product, 75),
        ];
        let insights = Insights::compute(&nodes, &[]);

        assert_eq!(insights.high_risk_count, 1);
        assert!(!insights.has_high_exposure);
        assert_eq!(insights.exposure_level, ExposureLevel::Low);
        assert_eq!(insights.recommendations, vec![Recommendation::ReviewContracts]);
    }

    #[test]
    fn critical_node_dominates_exposure() {
        let nodes = vec![node("v", NodeType::Vulnerability, 10).with_severity(Severity::Critical)];
        let insights = Insights::compute(&nodes, &[]);

        assert_eq!(insights.exposure_level, ExposureLevel::Critical);
        assert!(insights.has_high_exposure);
        assert_eq!(
            insights.recommendations,
            vec![
                Recommendation::PatchCritical { count: 1 },
                Recommendation::AuditHighRiskSuppliers,
                Recommendation::ReviewContracts,
            ]
        );
    }

    #[test]
    fn cascade_needs_more_than_two_affected_by_edges() {
        let nodes = vec![node("v", NodeType::Vulnerability, 90)];
        let mut edges: Vec<Edge> = ["a", "b"]
            .iter()
            .map(|t| Edge::new("v", *t, Relation::AffectedBy))
            .collect();
        assert!(!Insights::compute(&nodes, &edges).has_cascade_risk);

        edges.push(Edge::new("v", "c", Relation::AffectedBy));
        assert!(Insights::compute(&nodes, &edges).has_cascade_risk);
    }

    #[test]
    fn chains_require_three_names_and_a_leaf() {
        let nodes = vec![
            node("org", NodeType::Organization, 10),
            node("prod", NodeType::Product, 10),
            node("lib", NodeType::Software, 10),
            node("short", NodeType::Product, 10),
        ];
        let edges = vec![
            Edge::new("org", "prod", Relation::Uses),
            Edge::new("prod", "lib", Relation::DependsOn),
            Edge::new("org", "short", Relation::Uses),
        ];

        let insights = Insights::compute(&nodes, &edges);
        assert_eq!(insights.critical_chains, vec!["ORG → PROD → LIB"]);
    }

    #[test]
    fn chains_stop_below_depth_limit() {
        let ids = ["o", "a", "b", "c", "d"];
        let nodes: Vec<Node> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let t = if i == 0 { NodeType::Organization } else { NodeType::Software };
                node(id, t, 10)
            })
            .collect();
        let edges: Vec<Edge> = ids
            .windows(2)
            .map(|w| Edge::new(w[0], w[1], Relation::Uses))
            .collect();

        // d sits at depth 4 and c still has an outgoing edge, so no chain ends
        assert!(Insights::compute(&nodes, &edges).critical_chains.is_empty());
    }

    #[test]
    fn recommendation_text_is_pluralised() {
        assert_eq!(
            Recommendation::PatchCritical { count: 2 }.to_string(),
            "Prioritize patching 2 critical vulnerabilities"
        );
    }
}
