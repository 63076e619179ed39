//! Bounded breadth-first risk propagation.
//!
//! Risk spreads outward from a source node under two expansion rules:
//!
//! 1. **Upstream**: every node with an edge *into* the current node (it uses,
//!    depends on, is supplied by, or is affected by the current node) is
//!    affected.
//! 2. **Affected-by**: the target of every outgoing `affected_by` edge of the
//!    current node is affected.
//!
//! The frontier is a FIFO queue and a node is added at most once, so the
//! traversal terminates on cyclic graphs and the first path recorded to any
//! node is a minimum-hop path. Neighbours are visited in edge-list order,
//! which makes the result fully deterministic.
//!
//! # Impact classification
//!
//! After traversal the outcome is classified from the number of affected
//! nodes (excluding the source) and the mean risk score over the whole
//! affected set (including the source; unknown ids count as 0):
//!
//! | condition (first match wins)        | level    |
//! |-------------------------------------|----------|
//! | count == 0                          | low      |
//! | count < 3 and avg < 50              | low      |
//! | count < 5 and avg < 70              | medium   |
//! | count < 10 or avg < 80              | high     |
//! | otherwise                           | critical |
//!
//! A source with `critical` severity forces `critical` whenever anything was
//! affected.

use super::adjacency::AdjacencyIndex;
use crate::domain::{Edge, ImpactLevel, Node, Relation, Severity, data::index_nodes};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Depth used when the caller does not choose one.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Tuning knobs for a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationOptions {
    /// Maximum number of hops from the source. Zero yields only the source.
    pub max_depth: usize,

    /// Maximum number of nodes (excluding the source) to discover.
    ///
    /// `None` means unbounded. When the budget is exhausted the traversal
    /// stops and the result is flagged as truncated.
    pub visit_budget: Option<usize>,
}

impl PropagationOptions {
    /// Options with the given depth and no visit budget.
    #[must_use]
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            visit_budget: None,
        }
    }

    /// Cap the number of discovered nodes.
    #[must_use]
    pub fn with_budget(mut self, visit_budget: usize) -> Self {
        self.visit_budget = Some(visit_budget);
        self
    }
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self::with_depth(DEFAULT_MAX_DEPTH)
    }
}

/// Outcome of a single propagation run.
///
/// Built fresh for every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropagationResult {
    /// The node risk spread from.
    pub source: String,

    /// Every affected node id in discovery order, starting with the source.
    pub affected_nodes: Vec<String>,

    /// Path from the source to each affected node (source excluded).
    pub propagation_paths: BTreeMap<String, Vec<String>>,

    /// Qualitative classification of the outcome.
    pub impact_level: ImpactLevel,

    /// Number of affected nodes, not counting the source.
    pub affected_count: usize,

    /// Mean risk score over the affected set, source included.
    pub average_risk: f64,

    /// Depth limit the run used.
    pub max_depth: usize,

    /// Whether the visit budget cut the traversal short.
    pub truncated: bool,
}

impl PropagationResult {
    /// Whether `id` is in the affected set (the source always is).
    #[must_use]
    pub fn is_affected(&self, id: &str) -> bool {
        self.source == id || self.propagation_paths.contains_key(id)
    }

    /// The recorded path from the source to `id`.
    #[must_use]
    pub fn path(&self, id: &str) -> Option<&[String]> {
        self.propagation_paths.get(id).map(Vec::as_slice)
    }

    /// Number of hops from the source to `id`; 0 for the source itself.
    #[must_use]
    pub fn hop_count(&self, id: &str) -> Option<usize> {
        if self.source == id {
            return Some(0);
        }
        self.path(id).map(|p| p.len().saturating_sub(1))
    }

    /// Edges of `edges` that join two consecutive nodes on a recorded path.
    ///
    /// Either orientation matches, since upstream hops run against the edge
    /// direction. Edge-list order is kept.
    #[must_use]
    pub fn propagation_edges<'e>(&self, edges: &'e [Edge]) -> Vec<&'e Edge> {
        let hops: HashSet<(&str, &str)> = self
            .propagation_paths
            .values()
            .flat_map(|path| path.windows(2))
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect();

        edges
            .iter()
            .filter(|e| {
                let (s, t) = (e.source.as_str(), e.target.as_str());
                hops.contains(&(s, t)) || hops.contains(&(t, s))
            })
            .collect()
    }
}

/// Propagate risk from `source_id` for at most `max_depth` hops.
///
/// Never fails: an unknown source still traverses whatever edges mention it,
/// and missing nodes contribute a risk score of 0.
#[must_use]
pub fn propagate(
    source_id: &str,
    nodes: &[Node],
    edges: &[Edge],
    max_depth: usize,
) -> PropagationResult {
    propagate_with_options(
        source_id,
        nodes,
        edges,
        PropagationOptions::with_depth(max_depth),
    )
}

/// Propagate risk with explicit [`PropagationOptions`].
#[must_use]
pub fn propagate_with_options(
    source_id: &str,
    nodes: &[Node],
    edges: &[Edge],
    options: PropagationOptions,
) -> PropagationResult {
    let adjacency = AdjacencyIndex::build(edges);
    let traversal = traverse(source_id, &adjacency, options);

    let node_index = index_nodes(nodes);
    let total_risk: u64 = traversal
        .order
        .iter()
        .map(|id| node_index.get(id).map_or(0, |n| u64::from(n.risk_score)))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let average_risk = total_risk as f64 / traversal.order.len() as f64;

    let affected_count = traversal.order.len() - 1;
    let source_severity = node_index.get(source_id).and_then(|n| n.severity);
    let impact_level = classify_impact(affected_count, average_risk, source_severity);

    let propagation_paths = traversal
        .order
        .iter()
        .skip(1)
        .map(|&id| (id.to_string(), traversal.path_to(id)))
        .collect();

    tracing::debug!(
        source = source_id,
        max_depth = options.max_depth,
        affected = affected_count,
        average_risk,
        impact = %impact_level,
        truncated = traversal.truncated,
        "Propagation complete"
    );

    PropagationResult {
        source: source_id.to_string(),
        affected_nodes: traversal.order.iter().map(ToString::to_string).collect(),
        propagation_paths,
        impact_level,
        affected_count,
        average_risk,
        max_depth: options.max_depth,
        truncated: traversal.truncated,
    }
}

/// Classify a propagation outcome.
///
/// Rows are checked in order. Once the low and medium rows fail, the high
/// row almost always matches, so `critical` is reached only with at least 10
/// affected nodes averaging 80 or more, or through a critical source.
#[must_use]
pub fn classify_impact(
    affected_count: usize,
    average_risk: f64,
    source_severity: Option<Severity>,
) -> ImpactLevel {
    let level = if affected_count == 0 || (affected_count < 3 && average_risk < 50.0) {
        ImpactLevel::Low
    } else if affected_count < 5 && average_risk < 70.0 {
        ImpactLevel::Medium
    } else if affected_count < 10 || average_risk < 80.0 {
        ImpactLevel::High
    } else {
        ImpactLevel::Critical
    };

    if source_severity == Some(Severity::Critical) && affected_count > 0 {
        ImpactLevel::Critical
    } else {
        level
    }
}

/// Raw traversal output: discovery order plus the BFS parent of each node.
struct Traversal<'a> {
    order: Vec<&'a str>,
    parents: HashMap<&'a str, &'a str>,
    truncated: bool,
}

impl<'a> Traversal<'a> {
    /// Rebuild the source-to-`id` path by walking parent links.
    fn path_to(&self, id: &'a str) -> Vec<String> {
        let mut path = vec![id.to_string()];
        let mut current = id;
        while let Some(&parent) = self.parents.get(current) {
            path.push(parent.to_string());
            current = parent;
        }
        path.reverse();
        path
    }
}

fn traverse<'a>(
    source_id: &'a str,
    adjacency: &AdjacencyIndex<'a>,
    options: PropagationOptions,
) -> Traversal<'a> {
    let mut visited: HashSet<&'a str> = HashSet::from([source_id]);
    let mut order = vec![source_id];
    let mut parents = HashMap::new();
    let mut queue: VecDeque<(&'a str, usize)> = VecDeque::from([(source_id, 0)]);
    let mut truncated = false;

    'bfs: while let Some((current, depth)) = queue.pop_front() {
        if depth >= options.max_depth {
            continue;
        }

        let upstream = adjacency
            .incoming(current)
            .iter()
            .map(|&edge| edge.source.as_str());
        let affected_by = adjacency
            .outgoing(current)
            .iter()
            .filter(|edge| edge.relation == Relation::AffectedBy)
            .map(|&edge| edge.target.as_str());

        for next in upstream.chain(affected_by) {
            if visited.contains(next) {
                continue;
            }
            if options
                .visit_budget
                .is_some_and(|budget| order.len() - 1 >= budget)
            {
                tracing::warn!(
                    source = source_id,
                    budget = ?options.visit_budget,
                    "Visit budget exhausted, propagation truncated"
                );
                truncated = true;
                break 'bfs;
            }

            visited.insert(next);
            order.push(next);
            parents.insert(next, current);
            queue.push_back((next, depth + 1));
            tracing::trace!(node = next, via = current, depth = depth + 1, "Risk reached node");
        }
    }

    Traversal {
        order,
        parents,
        truncated,
    }
}
