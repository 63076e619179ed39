//! Domain types for the supply-chain risk graph.
//!
//! Nodes are organizations, products, software components and
//! vulnerabilities. Edges are directed and typed; several edges may connect
//! the same ordered pair with different relations.

pub(crate) mod data;

pub use data::GraphData;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest valid risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// Kind of entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A company or public body
    Organization,

    /// A commercial or open-source product
    Product,

    /// A software component or library
    Software,

    /// A published vulnerability
    Vulnerability,
}

impl NodeType {
    /// All node types, in display order.
    pub const ALL: [NodeType; 4] = [
        NodeType::Organization,
        NodeType::Product,
        NodeType::Software,
        NodeType::Vulnerability,
    ];

    /// The lowercase name used in graph files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Organization => "organization",
            NodeType::Product => "product",
            NodeType::Software => "software",
            NodeType::Vulnerability => "vulnerability",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organization" => Ok(NodeType::Organization),
            "product" => Ok(NodeType::Product),
            "software" => Ok(NodeType::Software),
            "vulnerability" => Ok(NodeType::Vulnerability),
            other => Err(Error::InvalidFilter(format!(
                "unknown node type '{other}' (expected organization, product, software or vulnerability)"
            ))),
        }
    }
}

/// Relationship carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Source uses target (organization -> product)
    Uses,

    /// Source depends on target (product -> software)
    DependsOn,

    /// Source is affected by target (software -> vulnerability)
    AffectedBy,

    /// Source supplies to target (organization -> organization)
    SuppliesTo,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::Uses => "uses",
            Relation::DependsOn => "depends_on",
            Relation::AffectedBy => "affected_by",
            Relation::SuppliesTo => "supplies_to",
        };
        f.write_str(s)
    }
}

/// Severity rating attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity
    Low,

    /// Medium severity
    Medium,

    /// High severity
    High,

    /// Critical severity
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Qualitative classification of a propagation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    /// Little or no spread
    Low,

    /// Limited spread
    Medium,

    /// Broad spread or high-risk spread
    High,

    /// Wide spread of high-risk entities, or a critical source
    Critical,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
            ImpactLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// An entity in the supply-chain graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: String,

    /// Entity kind
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Display name
    pub name: String,

    /// Risk score, 0-100
    pub risk_score: u8,

    /// Severity rating (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Vendor name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Version string (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Number of systems known to be affected (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_systems: Option<u32>,

    /// Free-form description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form exposure label (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_level: Option<String>,

    /// Last update date, as supplied by the data source (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Node {
    /// Create a node with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        node_type: NodeType,
        name: impl Into<String>,
        risk_score: u8,
    ) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: name.into(),
            risk_score,
            severity: None,
            vendor: None,
            version: None,
            affected_systems: None,
            description: None,
            exposure_level: None,
            last_updated: None,
        }
    }

    /// Set the severity rating.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set the vendor name.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A directed, typed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the source node
    pub source: String,

    /// Id of the target node
    pub target: String,

    /// Relationship type
    pub relation: Relation,

    /// Confidence in the relationship, 0.0-1.0 (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Presentation weight, 0-100 (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<u8>,
}

impl Edge {
    /// Create an edge without confidence or impact weighting.
    pub fn new(source: impl Into<String>, target: impl Into<String>, relation: Relation) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
            confidence: None,
            impact_score: None,
        }
    }

    /// Set the confidence value.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether this edge touches the given node on either end.
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}
