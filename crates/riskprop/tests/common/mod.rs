//! Common test utilities shared across integration tests.

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use riskprop::{Edge, GraphData, Node, NodeType, Relation};

/// Path of the compiled riskprop binary
pub fn riskprop_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_riskprop"))
}

/// Run the riskprop binary in `dir` with colors disabled
pub fn run_riskprop_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(riskprop_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute riskprop binary")
}

/// Software node with the given risk
pub fn node(id: &str, risk: u8) -> Node {
    Node::new(id, NodeType::Software, id.to_uppercase(), risk)
}

/// Edge shorthand
pub fn edge(source: &str, target: &str, relation: Relation) -> Edge {
    Edge::new(source, target, relation)
}

/// Write a graph as JSON into `dir` and return its path
pub fn write_graph(dir: &Path, name: &str, graph: &GraphData) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(graph).expect("Failed to serialize graph");
    fs::write(&path, json).expect("Failed to write graph file");
    path
}
