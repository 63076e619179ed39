//! Output formatting for CLI commands.
//!
//! Every report has a human-readable text rendering and a JSON rendering
//! for programmatic use. Text renderers write to any [`Write`] so they can
//! be tested against a buffer; the public `print_*` functions pick the mode
//! and write to stdout.
//!
//! Submodules:
//! - [`color`]: color and styling helpers (semantic colors, type icons)
//! - [`tree`]: dependency tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

pub use tree::print_tree;

use crate::analysis::{Connections, GraphStats, Insights};
use crate::domain::{GraphData, Node};
use crate::graph::{BlastRadius, Cycle, GraphView, PropagationResult};
use color::{
    bold, colorize_exposure, colorize_id, colorize_impact, colorize_risk, dimmed, type_icon,
    warning,
};
use serde::Serialize;
use std::env;
use std::fmt::Display;
use std::io::{self, Write};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons and connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from environment variables.
    ///
    /// Reads:
    /// - `RISKPROP_MAX_WIDTH`: maximum content width (default: 80)
    /// - `RISKPROP_ASCII`: "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: any value disables colors
    /// - `RISKPROP_COLOR`: "0" or "false" disables colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub(crate) fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("RISKPROP_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "RISKPROP_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("RISKPROP_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "RISKPROP_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("RISKPROP_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Get the current terminal width, falling back to default if detection fails.
fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| {
        usize::from(w.0)
    })
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Write any serializable value as pretty JSON.
pub fn print_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn dispatch<T, F>(value: &T, mode: OutputMode, text: F) -> io::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut io::StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
{
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => text(&mut handle, &OutputConfig::from_env()),
        OutputMode::Json => print_json(&mut handle, value),
    }
}

/// Print a propagation result.
pub fn print_propagation(
    result: &PropagationResult,
    graph: &GraphData,
    mode: OutputMode,
) -> io::Result<()> {
    dispatch(result, mode, |w, config| {
        write_propagation_text(w, result, graph, config)
    })
}

/// Print a blast-radius ranking.
pub fn print_ranking(ranking: &[BlastRadius], mode: OutputMode) -> io::Result<()> {
    dispatch(ranking, mode, |w, config| write_ranking_text(w, ranking, config))
}

/// Row of a centrality report.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow<'a, T> {
    /// Node id
    pub id: &'a str,
    /// Node name, when the id is a listed node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    /// Centrality score
    pub score: T,
}

/// Print a centrality report, already ordered.
pub fn print_scores<T: Serialize + Display>(
    title: &str,
    rows: &[ScoreRow<'_, T>],
    mode: OutputMode,
) -> io::Result<()> {
    dispatch(rows, mode, |w, config| write_scores_text(w, title, rows, config))
}

/// Print a list of nodes (search results).
pub fn print_nodes(nodes: &[&Node], mode: OutputMode) -> io::Result<()> {
    dispatch(nodes, mode, |w, config| write_nodes_text(w, nodes, config))
}

/// Print a filtered graph view.
pub fn print_view(view: &GraphView, mode: OutputMode) -> io::Result<()> {
    dispatch(view, mode, |w, config| write_view_text(w, view, config))
}

/// Print graph statistics.
pub fn print_stats(stats: &GraphStats, mode: OutputMode) -> io::Result<()> {
    dispatch(stats, mode, |w, config| write_stats_text(w, stats, config))
}

/// Print ecosystem insights.
pub fn print_insights(insights: &Insights, mode: OutputMode) -> io::Result<()> {
    dispatch(insights, mode, |w, config| {
        write_insights_text(w, insights, config)
    })
}

/// Print detected cycles.
pub fn print_cycles(cycles: &[Cycle], mode: OutputMode) -> io::Result<()> {
    dispatch(cycles, mode, |w, config| write_cycles_text(w, cycles, config))
}

/// Details of one node for `riskprop show`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails<'a> {
    /// The node
    pub node: &'a Node,
    /// Its direct connections
    pub connections: Connections<'a>,
}

/// Print node details with its connections.
pub fn print_node_details(
    details: &NodeDetails<'_>,
    graph: &GraphData,
    mode: OutputMode,
) -> io::Result<()> {
    dispatch(details, mode, |w, config| {
        write_node_details_text(w, details, graph, config)
    })
}

// ============================================================================
// Text Formatting
// ============================================================================

fn node_label(graph: &GraphData, id: &str) -> String {
    graph
        .node(id)
        .map_or_else(|| id.to_string(), |n| n.name.clone())
}

fn write_node_line<W: Write>(w: &mut W, node: &Node, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{} {}  {}  {}",
        type_icon(node.node_type, config),
        colorize_id(&node.id, config),
        colorize_risk(
            &format!("[{:>3}]", node.risk_score),
            f64::from(node.risk_score),
            config
        ),
        node.name
    )
}

pub(crate) fn write_propagation_text<W: Write>(
    w: &mut W,
    result: &PropagationResult,
    graph: &GraphData,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} ({})",
        bold("Propagation from", config),
        colorize_id(&result.source, config),
        node_label(graph, &result.source)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Impact:  ", config),
        colorize_impact(result.impact_level, config)
    )?;
    writeln!(
        w,
        "  {} {} (max depth {})",
        dimmed("Affected:", config),
        result.affected_count,
        result.max_depth
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Avg risk:", config),
        colorize_risk(
            &format!("{:.1}", result.average_risk),
            result.average_risk,
            config
        )
    )?;
    if result.truncated {
        writeln!(
            w,
            "  {}",
            warning("Visit budget reached; the affected set is partial", config)
        )?;
    }

    if result.affected_count == 0 {
        writeln!(w)?;
        writeln!(w, "No other nodes affected.")?;
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Affected nodes:", config))?;
    let arrow = if config.use_ascii { " -> " } else { " → " };
    for id in result.affected_nodes.iter().skip(1) {
        let hops = result.hop_count(id).unwrap_or_default();
        let hop_label = if hops == 1 {
            "1 hop".to_string()
        } else {
            format!("{hops} hops")
        };
        match graph.node(id) {
            Some(node) => {
                write!(w, "  {:<7} ", dimmed(&hop_label, config))?;
                write_node_line(w, node, config)?;
            }
            None => writeln!(
                w,
                "  {:<7} {}  {}",
                dimmed(&hop_label, config),
                colorize_id(id, config),
                dimmed("(unknown node)", config)
            )?,
        }
        if let Some(path) = result.path(id) {
            writeln!(w, "          {}", dimmed(&path.join(arrow), config))?;
        }
    }
    Ok(())
}

pub(crate) fn write_ranking_text<W: Write>(
    w: &mut W,
    ranking: &[BlastRadius],
    config: &OutputConfig,
) -> io::Result<()> {
    if ranking.is_empty() {
        writeln!(w, "No nodes to rank.")?;
        return Ok(());
    }
    writeln!(w, "{}", bold("Blast radius ranking:", config))?;
    writeln!(w)?;
    for (rank, entry) in ranking.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {}  {} affected  {}  avg {}  {}",
            rank + 1,
            colorize_id(&entry.source, config),
            entry.affected_count,
            colorize_impact(entry.impact_level, config),
            colorize_risk(
                &format!("{:.1}", entry.average_risk),
                entry.average_risk,
                config
            ),
            entry.name
        )?;
    }
    Ok(())
}

pub(crate) fn write_scores_text<W: Write, T: Display>(
    w: &mut W,
    title: &str,
    rows: &[ScoreRow<'_, T>],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold(title, config))?;
    writeln!(w)?;
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {}  {}  {}",
            rank + 1,
            colorize_id(row.id, config),
            row.score,
            row.name.unwrap_or_default()
        )?;
    }
    Ok(())
}

pub(crate) fn write_nodes_text<W: Write>(
    w: &mut W,
    nodes: &[&Node],
    config: &OutputConfig,
) -> io::Result<()> {
    if nodes.is_empty() {
        writeln!(w, "No nodes found.")?;
        return Ok(());
    }
    writeln!(w, "Found {} node(s):", nodes.len())?;
    writeln!(w)?;
    for node in nodes {
        write_node_line(w, node, config)?;
    }
    Ok(())
}

pub(crate) fn write_view_text<W: Write>(
    w: &mut W,
    view: &GraphView,
    config: &OutputConfig,
) -> io::Result<()> {
    let refs: Vec<&Node> = view.nodes.iter().collect();
    write_nodes_text(w, &refs, config)?;
    if view.edges.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Edges", config), view.edges.len())?;
    for edge in &view.edges {
        writeln!(
            w,
            "  {} {} {}",
            colorize_id(&edge.source, config),
            dimmed(&format!("-{}->", edge.relation), config),
            colorize_id(&edge.target, config)
        )?;
    }
    Ok(())
}

pub(crate) fn write_stats_text<W: Write>(
    w: &mut W,
    stats: &GraphStats,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Graph statistics:", config))?;
    let rows: [(&str, String); 8] = [
        ("Nodes", stats.total.to_string()),
        ("Organizations", stats.organizations.to_string()),
        ("Products", stats.products.to_string()),
        ("Software", stats.software.to_string()),
        ("Vulnerabilities", stats.vulnerabilities.to_string()),
        ("Critical", stats.critical.to_string()),
        ("High", stats.high.to_string()),
        (
            "Average risk",
            colorize_risk(
                &stats.avg_risk.to_string(),
                f64::from(stats.avg_risk),
                config,
            ),
        ),
    ];
    for (label, value) in rows {
        writeln!(w, "  {} {value}", dimmed(&format!("{label:<16}"), config))?;
    }
    Ok(())
}

pub(crate) fn write_insights_text<W: Write>(
    w: &mut W,
    insights: &Insights,
    config: &OutputConfig,
) -> io::Result<()> {
    let content_width = terminal_width().min(config.max_width);

    writeln!(
        w,
        "{} {}",
        bold("Exposure level:", config),
        colorize_exposure(insights.exposure_level, config)
    )?;
    writeln!(
        w,
        "  {} {}  {} {}  {} {}",
        dimmed("critical:", config),
        insights.critical_count,
        dimmed("high risk:", config),
        insights.high_risk_count,
        dimmed("vulnerabilities:", config),
        insights.vulnerability_count
    )?;
    writeln!(
        w,
        "  {} {}  {} {}  {} {}",
        dimmed("nodes:", config),
        insights.total_nodes,
        dimmed("edges:", config),
        insights.total_edges,
        dimmed("avg risk:", config),
        insights.avg_risk
    )?;
    if insights.has_cascade_risk {
        writeln!(
            w,
            "  {}",
            warning("A vulnerability cascades to several components", config)
        )?;
    }

    if !insights.critical_chains.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Dependency chains:", config))?;
        for chain in &insights.critical_chains {
            for (i, line) in wrap_text(chain, content_width.saturating_sub(4))
                .iter()
                .enumerate()
            {
                let bullet = if i == 0 { "- " } else { "  " };
                writeln!(w, "  {bullet}{line}")?;
            }
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Recommendations:", config))?;
    for recommendation in &insights.recommendations {
        writeln!(w, "  - {recommendation}")?;
    }
    Ok(())
}

pub(crate) fn write_cycles_text<W: Write>(
    w: &mut W,
    cycles: &[Cycle],
    config: &OutputConfig,
) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(w, "No cycles found.")?;
        return Ok(());
    }
    writeln!(w, "Found {} cycle(s):", cycles.len())?;
    for cycle in cycles {
        let ids: Vec<String> = cycle.nodes.iter().map(|id| colorize_id(id, config)).collect();
        writeln!(w, "  {}", ids.join(", "))?;
    }
    Ok(())
}

pub(crate) fn write_node_details_text<W: Write>(
    w: &mut W,
    details: &NodeDetails<'_>,
    graph: &GraphData,
    config: &OutputConfig,
) -> io::Result<()> {
    let node = details.node;
    let content_width = terminal_width().min(config.max_width);

    write_node_line(w, node, config)?;
    writeln!(w, "  {} {}", dimmed("Type:", config), node.node_type)?;
    let optional = [
        ("Severity:", node.severity.map(|s| s.to_string())),
        ("Vendor:", node.vendor.clone()),
        ("Version:", node.version.clone()),
        ("Affected systems:", node.affected_systems.map(|n| n.to_string())),
        ("Exposure:", node.exposure_level.clone()),
        ("Last updated:", node.last_updated.clone()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            writeln!(w, "  {} {value}", dimmed(label, config))?;
        }
    }

    if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Description", config))?;
        for line in wrap_text(description, content_width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }

    let connections = &details.connections;
    writeln!(w)?;
    writeln!(
        w,
        "{} ({}):",
        bold("Connections", config),
        connections.connection_count()
    )?;
    let (incoming_arrow, outgoing_arrow) = if config.use_ascii {
        ("<-", "->")
    } else {
        ("←", "→")
    };
    for edge in &connections.outgoing {
        writeln!(
            w,
            "  {} {} {} {}",
            dimmed(outgoing_arrow, config),
            colorize_id(&edge.target, config),
            dimmed(&format!("({})", edge.relation), config),
            node_label(graph, &edge.target)
        )?;
    }
    for edge in &connections.incoming {
        writeln!(
            w,
            "  {} {} {} {}",
            dimmed(incoming_arrow, config),
            colorize_id(&edge.source, config),
            dimmed(&format!("({})", edge.relation), config),
            node_label(graph, &edge.source)
        )?;
    }
    Ok(())
}
