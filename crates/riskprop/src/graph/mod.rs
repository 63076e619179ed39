//! Graph algorithms over the supply-chain model.
//!
//! - [`adjacency`]: forward/reverse edge lookups
//! - [`propagation`]: bounded BFS risk propagation and impact classification
//! - [`centrality`]: degree and risk-weighted centrality
//! - [`filter`]: type / minimum-risk projection
//! - [`cycles`]: strongly connected components via petgraph
//! - [`ranking`]: parallel propagation from every node
//!
//! ## Edge direction
//!
//! Edges point from the dependent entity to what it relies on
//! (`product -depends_on-> software`, `software -affected_by-> vulnerability`).
//! Risk therefore travels against the edge direction, except along
//! `affected_by` edges where it also travels forward.

pub mod adjacency;
pub mod centrality;
pub mod cycles;
pub mod filter;
pub mod propagation;
pub mod ranking;

pub use adjacency::AdjacencyIndex;
pub use centrality::{degree_centrality, risk_weighted_centrality, top_ranked};
pub use cycles::{Cycle, detect_cycles};
pub use filter::{GraphView, TypeFilter, ViewFilter};
pub use propagation::{
    DEFAULT_MAX_DEPTH, PropagationOptions, PropagationResult, classify_impact, propagate,
    propagate_with_options,
};
pub use ranking::{BlastRadius, propagate_all};
