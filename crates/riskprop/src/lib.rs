//! Riskprop - supply-chain risk graph analysis.
//!
//! This crate provides both a CLI application and a library for modelling
//! a supply chain as a directed graph of organizations, products, software
//! components and vulnerabilities, and for simulating how risk spreads
//! through it.
//!
//! ```
//! use riskprop::graph::propagate;
//! use riskprop::sample::sample_graph;
//! use riskprop::domain::ImpactLevel;
//!
//! let graph = sample_graph();
//! let result = propagate("vuln_cve2021_44228", &graph.nodes, &graph.edges, 2);
//! assert_eq!(result.affected_count, 3);
//! assert_eq!(result.impact_level, ImpactLevel::High);
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod sample;

// Public CLI module (needed by binary)
pub mod cli;

// Rendering for the CLI
pub mod output;

pub use domain::{Edge, GraphData, ImpactLevel, Node, NodeType, Relation, Severity};
pub use error::{Error, Result};
pub use graph::{PropagationOptions, PropagationResult, propagate, propagate_with_options};
