//! Error types for riskprop operations.
//!
//! The propagation engine and the graph metrics never fail: malformed but
//! structurally valid input degrades to a well-defined result. Errors only
//! come from the edges of the system (loading graph files, reading
//! configuration, and lookups that need a concrete node).

use std::io;
use thiserror::Error;

/// Result type for riskprop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for riskprop operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Graph file could not be parsed
    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration file or values
    #[error("configuration error: {0}")]
    Config(String),

    /// A node id was required but is not part of the graph
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A filter value could not be interpreted
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A loaded graph violates the data model
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}
