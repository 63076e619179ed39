//! Whole-graph analysis used by reports and the details views.
//!
//! Submodules:
//! - [`stats`]: counts per type and severity
//! - [`insights`]: exposure assessment, dependency chains, recommendations
//! - [`search`]: free-text node search
//! - [`tree`]: dependency tree from a root node
//! - [`connections`]: incoming/outgoing edges of one node

pub mod connections;
pub mod insights;
pub mod search;
pub mod stats;
pub mod tree;

pub use connections::{Connections, connections};
pub use insights::{ExposureLevel, Insights, Recommendation};
pub use search::{DEFAULT_SEARCH_LIMIT, search};
pub use stats::GraphStats;
pub use tree::{TreeNode, build_tree};
