//! Free-text node search.

use crate::domain::Node;

/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Queries shorter than this (after trimming, in UTF-16 code units) return
/// nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Find nodes whose name, description or vendor contains `query`.
///
/// Matching is case-insensitive and keeps node order. At most `limit` nodes
/// are returned.
#[must_use]
pub fn search<'a>(nodes: &'a [Node], query: &str, limit: usize) -> Vec<&'a Node> {
    // UTF-16 units, so a single astral character such as an emoji is long enough
    if query.trim().encode_utf16().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    nodes
        .iter()
        .filter(|n| {
            contains(&n.name)
                || n.description.as_deref().is_some_and(contains)
                || n.vendor.as_deref().is_some_and(contains)
        })
        .take(limit)
        .collect()
}
