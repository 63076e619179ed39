//! Dependency tree rendering for `riskprop tree` output.

use std::io::{self, Write};

use colored::Colorize;

use super::color::{colorize_id, colorize_risk, dimmed, type_icon};
use super::{OutputConfig, OutputMode, print_json};
use crate::analysis::TreeNode;

/// Print a dependency tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ product_veeam Veeam Cloud Connect [65]
/// ├── software_log4j Log4j (depends_on) [85]
/// │   └── vuln_cve2021_44228 CVE-2021-44228 (Log4Shell) (affected_by) [95]
/// └── software_openssl OpenSSL (depends_on) [62]
/// ```
pub fn print_tree(root: &TreeNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_tree_text(&mut handle, root, &config),
        OutputMode::Json => print_json(&mut handle, root),
    }
}

/// Render the tree with connector lines.
pub(crate) fn write_tree_text<W: Write>(
    w: &mut W,
    root: &TreeNode,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    writeln!(w, "{root_icon_str} {}", describe(root, config))?;
    write_children(w, &root.children, &[], config)
}

/// Recursively render children.
///
/// `prefix_segments` records, per ancestor level, whether siblings follow
/// below it, which decides between a continuation pipe and blank space.
fn write_children<W: Write>(
    w: &mut W,
    children: &[TreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();

        let prefix: String = prefix_segments
            .iter()
            .map(|&has_more| dimmed(if has_more { pipe } else { space }, config))
            .collect();
        let connector = dimmed(if is_last { corner } else { branch }, config);

        writeln!(w, "{prefix}{connector}{}", describe(child, config))?;

        if !child.children.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            write_children(w, &child.children, &next_segments, config)?;
        }
    }

    Ok(())
}

fn describe(tree: &TreeNode, config: &OutputConfig) -> String {
    let node = &tree.node;
    let relation = tree
        .relation
        .map(|r| format!(" {}", dimmed(&format!("({r})"), config)))
        .unwrap_or_default();
    let risk = colorize_risk(
        &format!("[{}]", node.risk_score),
        f64::from(node.risk_score),
        config,
    );
    format!(
        "{} {} {}{relation} {risk}",
        type_icon(node.node_type, config),
        colorize_id(&node.id, config),
        node.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_tree;
    use crate::sample::sample_graph;

    fn render(root: &str, ascii: bool) -> String {
        let graph = sample_graph();
        let tree = build_tree(&graph.nodes, &graph.edges, root).unwrap();
        let mut buf = Vec::new();
        write_tree_text(&mut buf, &tree, &OutputConfig::new(80, ascii, false)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_unicode_connectors() {
        let out = render("product_veeam", false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "◆ ◆ product_veeam Veeam Cloud Connect [65]");
        assert!(lines[1].starts_with("├── ● software_log4j Log4j (depends_on) [85]"));
        assert!(lines[2].starts_with("│   └── ▲ vuln_cve2021_44228"));
        assert!(lines[3].starts_with("└── ● software_openssl"));
        assert!(lines[4].starts_with("    └── ▲ vuln_cve2024_1234"));
    }

    #[test]
    fn renders_ascii_connectors() {
        let out = render("product_veeam", true);
        assert!(out.starts_with("* P product_veeam Veeam Cloud Connect [65]"));
        assert!(out.contains("|-- S software_log4j"));
        assert!(out.contains("`-- S software_openssl"));
    }

    #[test]
    fn leaf_root_has_single_line() {
        let out = render("vuln_cve2024_3333", false);
        assert_eq!(out.lines().count(), 1);
    }
}
