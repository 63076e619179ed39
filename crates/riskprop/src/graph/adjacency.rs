//! Forward and reverse edge lookups.

use crate::domain::Edge;
use std::collections::HashMap;

/// Edge lists keyed by source (outgoing) and by target (incoming).
///
/// Entries sharing a key keep the order of the original edge list, so any
/// traversal driven by this index visits neighbours deterministically. Ids
/// with no edges behave as if they mapped to an empty list.
#[derive(Debug, Default)]
pub struct AdjacencyIndex<'a> {
    outgoing: HashMap<&'a str, Vec<&'a Edge>>,
    incoming: HashMap<&'a str, Vec<&'a Edge>>,
}

impl<'a> AdjacencyIndex<'a> {
    /// Index the given edges in one pass.
    #[must_use]
    pub fn build(edges: &'a [Edge]) -> Self {
        let mut index = Self::default();
        for edge in edges {
            index
                .outgoing
                .entry(edge.source.as_str())
                .or_default()
                .push(edge);
            index
                .incoming
                .entry(edge.target.as_str())
                .or_default()
                .push(edge);
        }
        index
    }

    /// Edges whose source is `id`.
    #[must_use]
    pub fn outgoing(&self, id: &str) -> &[&'a Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges whose target is `id`.
    #[must_use]
    pub fn incoming(&self, id: &str) -> &[&'a Edge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
