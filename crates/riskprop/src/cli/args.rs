//! CLI argument structs for all commands.

use std::num::NonZeroUsize;

use clap::Parser;

use super::types::NodeTypeArg;
use crate::analysis::DEFAULT_SEARCH_LIMIT;

/// Default number of rows shown by ranking commands.
const DEFAULT_RANK_LIMIT: &str = "10";

/// Arguments for the `propagate` command
#[derive(Parser, Debug, Clone)]
pub struct PropagateArgs {
    /// Node id risk spreads from
    pub source: String,

    /// Maximum number of hops (defaults to the configured depth)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Stop after this many nodes have been reached
    #[arg(short, long)]
    pub budget: Option<NonZeroUsize>,
}

/// Arguments for the `rank` command
#[derive(Parser, Debug, Clone)]
pub struct RankArgs {
    /// Maximum number of hops per propagation (defaults to the configured depth)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Number of sources shown
    #[arg(short, long, default_value = DEFAULT_RANK_LIMIT)]
    pub limit: usize,
}

/// Arguments for the `centrality` command
#[derive(Parser, Debug, Clone)]
pub struct CentralityArgs {
    /// Weight each node's degree by the mean risk of its neighbors
    #[arg(short, long)]
    pub weighted: bool,

    /// Number of nodes shown
    #[arg(short, long, default_value = DEFAULT_RANK_LIMIT)]
    pub limit: usize,
}

/// Arguments for the `filter` command
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Node type to keep (defaults to the configured type)
    #[arg(short = 't', long = "type", value_enum)]
    pub node_type: Option<NodeTypeArg>,

    /// Minimum risk score, 0-100 (defaults to the configured value)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_risk: Option<u8>,
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Text matched against names, descriptions and vendors
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Node id
    pub node: String,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Node id the tree starts from
    pub root: String,
}
