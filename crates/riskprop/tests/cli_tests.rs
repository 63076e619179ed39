//! Integration tests that drive the riskprop binary.

use std::fs;

use riskprop::{GraphData, Relation};
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{edge, node, run_riskprop_in_dir, write_graph};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn run_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = run_riskprop_in_dir(dir.path(), args);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// Basic invocation
// ============================================================================

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["propagate", "rank", "centrality", "filter", "tree"] {
        assert!(text.contains(command), "help is missing {command}");
    }
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0.1.0"));
}

#[test]
fn missing_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &[]);
    assert!(!output.status.success());
}

// ============================================================================
// Commands against the built-in sample
// ============================================================================

#[test]
fn propagate_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(
        &dir,
        &["--json", "propagate", "vuln_cve2021_44228", "--depth", "2"],
    );
    assert_eq!(value["affected_count"], 3);
    assert_eq!(value["impact_level"], "high");
    assert_eq!(value["truncated"], false);
    assert_eq!(
        value["propagation_paths"]["product_jenkins"],
        serde_json::json!(["vuln_cve2021_44228", "software_log4j", "product_jenkins"])
    );
}

#[test]
fn propagate_text_on_sample() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(
        dir.path(),
        &["propagate", "vuln_cve2021_44228", "--depth", "1"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Propagation from vuln_cve2021_44228"));
    assert!(text.contains("software_log4j"));
}

#[test]
fn propagate_budget_reports_truncation() {
    let dir = TempDir::new().unwrap();
    let value = run_json(
        &dir,
        &["--json", "propagate", "vuln_cve2021_44228", "-d", "4", "-b", "2"],
    );
    assert_eq!(value["truncated"], true);
    assert_eq!(value["affected_count"], 2);
}

#[test]
fn propagate_unknown_source_succeeds() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "propagate", "nope"]);
    assert_eq!(value["affected_count"], 0);
    assert_eq!(value["impact_level"], "low");
}

#[test]
fn rank_respects_limit() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "rank", "--limit", "3"]);
    assert_eq!(value.as_array().map(Vec::len), Some(3));
}

#[test]
fn centrality_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "centrality", "--limit", "3"]);
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["org_micrologic", "org_techcorp", "software_openssl"]);
    assert_eq!(value[0]["score"], 4);
}

#[test]
fn filter_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(
        &dir,
        &["--json", "filter", "--type", "vulnerability", "--min-risk", "80"],
    );
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["edges"].as_array().map(Vec::len), Some(0));
}

#[test]
fn filter_rejects_out_of_range_risk() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["filter", "--min-risk", "101"]);
    assert!(!output.status.success());
}

#[test]
fn stats_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "stats"]);
    assert_eq!(value["total"], 24);
    assert_eq!(value["vulnerabilities"], 5);
    assert_eq!(value["avg_risk"], 59);
}

#[test]
fn insights_text_on_sample() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["insights"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Recommendations:"));
}

#[test]
fn cycles_on_sample() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["cycles"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No cycles found.\n");
}

#[test]
fn search_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "search", "cve-2024"]);
    assert_eq!(value.as_array().map(Vec::len), Some(3));
}

#[test]
fn show_unknown_node_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["show", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("node not found: nope"));
}

#[test]
fn show_known_node() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["show", "software_log4j"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Log4j"));
}

#[test]
fn tree_unknown_root_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_riskprop_in_dir(dir.path(), &["tree", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("node not found"));
}

#[test]
fn tree_json_on_sample() {
    let dir = TempDir::new().unwrap();
    let value = run_json(&dir, &["--json", "tree", "product_jenkins"]);
    assert_eq!(value["id"], "product_jenkins");
    assert!(value["children"].is_array());
}

// ============================================================================
// Graph files and configuration
// ============================================================================

fn chain_graph() -> GraphData {
    GraphData::new(
        vec![node("app", 20), node("lib", 60), node("cve", 100)],
        vec![
            edge("app", "lib", Relation::DependsOn),
            edge("lib", "cve", Relation::AffectedBy),
        ],
    )
}

#[test]
fn graph_flag_loads_file() {
    let dir = TempDir::new().unwrap();
    let path = write_graph(dir.path(), "chain.json", &chain_graph());
    let path = path.to_str().unwrap();

    let value = run_json(&dir, &["--json", "--graph", path, "propagate", "cve"]);
    assert_eq!(value["affected_nodes"], serde_json::json!(["cve", "lib", "app"]));
}

#[test]
fn config_file_is_discovered() {
    let dir = TempDir::new().unwrap();
    write_graph(dir.path(), "chain.json", &chain_graph());
    fs::write(
        dir.path().join("riskprop.yaml"),
        "graph-file: chain.json\npropagation:\n  max-depth: 1\n",
    )
    .unwrap();

    let value = run_json(&dir, &["--json", "propagate", "cve"]);
    assert_eq!(value["affected_nodes"], serde_json::json!(["cve", "lib"]));
    assert_eq!(value["max_depth"], 1);
}

#[test]
fn explicit_config_in_subdirectory_finds_its_graph() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("other");
    fs::create_dir(&nested).unwrap();
    write_graph(&nested, "graph.json", &chain_graph());
    fs::write(nested.join("riskprop.yaml"), "graph-file: graph.json\n").unwrap();

    let value = run_json(
        &dir,
        &["--json", "--config", "other/riskprop.yaml", "propagate", "cve"],
    );
    assert_eq!(value["affected_count"], 2);
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("riskprop.yaml"), "filter:\n  min-risk: 500\n").unwrap();

    let output = run_riskprop_in_dir(dir.path(), &["stats"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to load configuration"));
}

#[test]
fn malformed_graph_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let output = run_riskprop_in_dir(dir.path(), &["--graph", path.to_str().unwrap(), "stats"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to load graph"));
}
