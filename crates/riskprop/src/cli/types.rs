//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::NodeType;
use crate::graph::TypeFilter;

/// Node type filter for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTypeArg {
    /// Every node type
    All,
    /// Organizations only
    Organization,
    /// Products only
    Product,
    /// Software components only
    Software,
    /// Vulnerabilities only
    Vulnerability,
}

impl From<NodeTypeArg> for TypeFilter {
    fn from(arg: NodeTypeArg) -> Self {
        match arg {
            NodeTypeArg::All => TypeFilter::All,
            NodeTypeArg::Organization => TypeFilter::Only(NodeType::Organization),
            NodeTypeArg::Product => TypeFilter::Only(NodeType::Product),
            NodeTypeArg::Software => TypeFilter::Only(NodeType::Software),
            NodeTypeArg::Vulnerability => TypeFilter::Only(NodeType::Vulnerability),
        }
    }
}
