//! Summary counts over the node set.

use crate::domain::{Node, NodeType, Severity};
use serde::Serialize;

/// Node counts and average risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// All nodes
    pub total: usize,
    /// Organization nodes
    pub organizations: usize,
    /// Product nodes
    pub products: usize,
    /// Software nodes
    pub software: usize,
    /// Vulnerability nodes
    pub vulnerabilities: usize,
    /// Nodes with critical severity
    pub critical: usize,
    /// Nodes with high severity
    pub high: usize,
    /// Mean risk score, rounded; 0 when there are no nodes
    pub avg_risk: u8,
}

impl GraphStats {
    /// Count nodes by type and severity.
    #[must_use]
    pub fn compute(nodes: &[Node]) -> Self {
        let count_type = |t: NodeType| nodes.iter().filter(|n| n.node_type == t).count();
        let count_severity = |s: Severity| nodes.iter().filter(|n| n.severity == Some(s)).count();

        Self {
            total: nodes.len(),
            organizations: count_type(NodeType::Organization),
            products: count_type(NodeType::Product),
            software: count_type(NodeType::Software),
            vulnerabilities: count_type(NodeType::Vulnerability),
            critical: count_severity(Severity::Critical),
            high: count_severity(Severity::High),
            avg_risk: rounded_average_risk(nodes),
        }
    }
}

/// Mean risk score over `nodes`, rounded half away from zero.
pub(crate) fn rounded_average_risk(nodes: &[Node]) -> u8 {
    if nodes.is_empty() {
        return 0;
    }
    let total: u64 = nodes.iter().map(|n| u64::from(n.risk_score)).sum();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let avg = (total as f64 / nodes.len() as f64).round() as u8;
    avg
}
