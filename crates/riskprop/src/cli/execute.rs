//! Command execution logic.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::args::{
    CentralityArgs, FilterArgs, PropagateArgs, RankArgs, SearchArgs, ShowArgs, TreeArgs,
};
use crate::analysis::{GraphStats, Insights, build_tree, connections, search};
use crate::config::Config;
use crate::domain::GraphData;
use crate::error::Error;
use crate::graph::{
    ViewFilter, degree_centrality, detect_cycles, propagate_all, propagate_with_options,
    risk_weighted_centrality, top_ranked,
};
use crate::output::{self, NodeDetails, OutputMode, ScoreRow};
use crate::sample::sample_graph;

/// Everything a command needs: resolved configuration and the loaded graph.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) graph: GraphData,
}

impl Context {
    /// Load configuration, then the graph.
    ///
    /// The graph comes from `graph_arg`, else the configured `graph-file`
    /// (relative to the config file's directory), else the built-in sample.
    /// Relative paths that remain are taken from `cwd`.
    pub(crate) fn load(
        graph_arg: Option<&Path>,
        config_arg: Option<&Path>,
        cwd: &Path,
    ) -> Result<Self> {
        let config = Config::discover(config_arg, cwd).context("failed to load configuration")?;

        let graph_path: Option<PathBuf> = graph_arg
            .map(Path::to_path_buf)
            .or_else(|| config.graph_file.as_ref().map(|p| cwd.join(p)));

        let graph = match graph_path {
            Some(path) => GraphData::load(&path)
                .with_context(|| format!("failed to load graph from {}", path.display()))?,
            None => {
                tracing::info!("No graph file given, using the built-in sample graph");
                sample_graph()
            }
        };

        Ok(Self { config, graph })
    }
}

/// Execute the propagate command
pub(crate) fn execute_propagate(
    ctx: &Context,
    args: &PropagateArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let mut options = ctx.config.propagation_options();
    if let Some(depth) = args.depth {
        options.max_depth = depth;
    }
    if let Some(budget) = args.budget {
        options = options.with_budget(budget.get());
    }

    if ctx.graph.node(&args.source).is_none() {
        tracing::warn!(source = %args.source, "Source is not a node in the graph");
    }

    let result = propagate_with_options(&args.source, &ctx.graph.nodes, &ctx.graph.edges, options);
    output::print_propagation(&result, &ctx.graph, output_mode)?;
    Ok(())
}

/// Execute the rank command
pub(crate) fn execute_rank(ctx: &Context, args: &RankArgs, output_mode: OutputMode) -> Result<()> {
    let depth = args.depth.unwrap_or(ctx.config.propagation.max_depth);
    let mut ranking = propagate_all(&ctx.graph, depth);
    ranking.truncate(args.limit);
    output::print_ranking(&ranking, output_mode)?;
    Ok(())
}

/// Execute the centrality command
pub(crate) fn execute_centrality(
    ctx: &Context,
    args: &CentralityArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let name_of = |id: &str| ctx.graph.node(id).map(|n| n.name.as_str());

    if args.weighted {
        let scores = risk_weighted_centrality(&ctx.graph.nodes, &ctx.graph.edges);
        let rows: Vec<ScoreRow<'_, f64>> = top_ranked(&scores, args.limit)
            .into_iter()
            .map(|(id, score)| ScoreRow {
                id,
                name: name_of(id),
                score: (score * 100.0).round() / 100.0,
            })
            .collect();
        output::print_scores("Risk-weighted centrality:", &rows, output_mode)?;
    } else {
        let scores = degree_centrality(&ctx.graph.nodes, &ctx.graph.edges);
        let rows: Vec<ScoreRow<'_, usize>> = top_ranked(&scores, args.limit)
            .into_iter()
            .map(|(id, score)| ScoreRow {
                id,
                name: name_of(id),
                score,
            })
            .collect();
        output::print_scores("Degree centrality:", &rows, output_mode)?;
    }
    Ok(())
}

/// Execute the filter command
pub(crate) fn execute_filter(
    ctx: &Context,
    args: &FilterArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let configured = ctx.config.view_filter()?;
    let filter = ViewFilter::new(
        args.node_type.map_or(configured.node_type, Into::into),
        args.min_risk.unwrap_or(configured.min_risk),
    )?;
    let view = filter.project(&ctx.graph.nodes, &ctx.graph.edges);
    output::print_view(&view, output_mode)?;
    Ok(())
}

/// Execute the stats command
pub(crate) fn execute_stats(ctx: &Context, output_mode: OutputMode) -> Result<()> {
    let stats = GraphStats::compute(&ctx.graph.nodes);
    output::print_stats(&stats, output_mode)?;
    Ok(())
}

/// Execute the insights command
pub(crate) fn execute_insights(ctx: &Context, output_mode: OutputMode) -> Result<()> {
    let insights = Insights::compute(&ctx.graph.nodes, &ctx.graph.edges);
    output::print_insights(&insights, output_mode)?;
    Ok(())
}

/// Execute the cycles command
pub(crate) fn execute_cycles(ctx: &Context, output_mode: OutputMode) -> Result<()> {
    let cycles = detect_cycles(&ctx.graph.nodes, &ctx.graph.edges);
    output::print_cycles(&cycles, output_mode)?;
    Ok(())
}

/// Execute the search command
pub(crate) fn execute_search(
    ctx: &Context,
    args: &SearchArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let hits = search(&ctx.graph.nodes, &args.query, args.limit);
    output::print_nodes(&hits, output_mode)?;
    Ok(())
}

/// Execute the show command
pub(crate) fn execute_show(ctx: &Context, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let node = ctx.graph.require_node(&args.node)?;
    let details = NodeDetails {
        node,
        connections: connections(&node.id, &ctx.graph.edges),
    };
    output::print_node_details(&details, &ctx.graph, output_mode)?;
    Ok(())
}

/// Execute the tree command
pub(crate) fn execute_tree(ctx: &Context, args: &TreeArgs, output_mode: OutputMode) -> Result<()> {
    let tree = build_tree(&ctx.graph.nodes, &ctx.graph.edges, &args.root)
        .ok_or_else(|| Error::NodeNotFound(args.root.clone()))?;
    output::print_tree(&tree, output_mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::domain::{Node, NodeType};
    use std::fs;
    use tempfile::TempDir;

    fn write_graph(dir: &Path, name: &str, graph: &GraphData) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(graph).unwrap()).unwrap();
        path
    }

    fn single_node_graph(id: &str) -> GraphData {
        GraphData::new(vec![Node::new(id, NodeType::Product, id, 10)], vec![])
    }

    #[test]
    fn falls_back_to_sample_graph() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::load(None, None, dir.path()).unwrap();
        assert_eq!(ctx.graph, sample_graph());
        assert_eq!(ctx.config, Config::default());
    }

    #[test]
    fn uses_configured_graph_file() {
        let dir = TempDir::new().unwrap();
        write_graph(dir.path(), "configured.json", &single_node_graph("configured"));
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "graph-file: configured.json\n",
        )
        .unwrap();

        let ctx = Context::load(None, None, dir.path()).unwrap();
        assert!(ctx.graph.node("configured").is_some());
    }

    #[test]
    fn explicit_config_resolves_graph_next_to_it() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("other");
        fs::create_dir(&nested).unwrap();
        write_graph(&nested, "graph.json", &single_node_graph("nested"));
        fs::write(nested.join(CONFIG_FILE_NAME), "graph-file: graph.json\n").unwrap();

        let config_path = nested.join(CONFIG_FILE_NAME);
        let ctx = Context::load(None, Some(&config_path), dir.path()).unwrap();
        assert!(ctx.graph.node("nested").is_some());
    }

    #[test]
    fn explicit_graph_wins_over_config() {
        let dir = TempDir::new().unwrap();
        write_graph(dir.path(), "configured.json", &single_node_graph("configured"));
        let explicit = write_graph(dir.path(), "explicit.json", &single_node_graph("explicit"));
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "graph-file: configured.json\n",
        )
        .unwrap();

        let ctx = Context::load(Some(&explicit), None, dir.path()).unwrap();
        assert!(ctx.graph.node("explicit").is_some());
        assert!(ctx.graph.node("configured").is_none());
    }

    #[test]
    fn missing_graph_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err = Context::load(Some(&missing), None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to load graph"));
    }

    #[test]
    fn invalid_graph_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r#"{"nodes":[
                {"id":"a","type":"product","name":"A","risk_score":1},
                {"id":"a","type":"product","name":"A2","risk_score":2}
            ]}"#,
        )
        .unwrap();

        let err = Context::load(Some(&path), None, dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn show_and_tree_reject_unknown_nodes() {
        let ctx = Context {
            config: Config::default(),
            graph: sample_graph(),
        };
        let show = execute_show(
            &ctx,
            &ShowArgs {
                node: "nope".to_string(),
            },
            OutputMode::Json,
        );
        assert!(matches!(
            show.unwrap_err().downcast_ref::<Error>(),
            Some(Error::NodeNotFound(id)) if id == "nope"
        ));

        let tree = execute_tree(
            &ctx,
            &TreeArgs {
                root: "nope".to_string(),
            },
            OutputMode::Json,
        );
        assert!(tree.is_err());
    }
}
