//! Blast-radius ranking: propagate from every node and compare.
//!
//! Each run is an independent pure call, so the sources are processed in
//! parallel with rayon and merged afterwards.

use super::propagation::propagate;
use crate::domain::{GraphData, ImpactLevel};
use rayon::prelude::*;
use serde::Serialize;

/// Summary of one source's propagation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlastRadius {
    /// Source node id
    pub source: String,
    /// Source node name
    pub name: String,
    /// Nodes affected, source excluded
    pub affected_count: usize,
    /// Impact classification
    pub impact_level: ImpactLevel,
    /// Mean risk over the affected set
    pub average_risk: f64,
}

/// Propagate from every node and rank by affected count.
///
/// Sorted by affected count (descending), then id.
#[must_use]
pub fn propagate_all(graph: &GraphData, max_depth: usize) -> Vec<BlastRadius> {
    let mut ranking: Vec<BlastRadius> = graph
        .nodes
        .par_iter()
        .map(|node| {
            let result = propagate(&node.id, &graph.nodes, &graph.edges, max_depth);
            BlastRadius {
                source: node.id.clone(),
                name: node.name.clone(),
                affected_count: result.affected_count,
                impact_level: result.impact_level,
                average_risk: result.average_risk,
            }
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.affected_count
            .cmp(&a.affected_count)
            .then_with(|| a.source.cmp(&b.source))
    });

    tracing::debug!(sources = ranking.len(), max_depth, "Ranked blast radii");
    ranking
}
