//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `propagate`: spread risk from one node
//! - `rank`: propagate from every node and rank by blast radius
//! - `centrality`: degree or risk-weighted centrality
//! - `filter`: project the graph by type and minimum risk
//! - `stats`, `insights`, `cycles`: whole-graph reports
//! - `search`: find nodes by text
//! - `show`: details and connections of one node
//! - `tree`: dependency tree from a root node
//!
//! # Global Flags
//!
//! - `--graph FILE`: graph JSON file (otherwise the configured file, otherwise
//!   the built-in sample graph)
//! - `--config FILE`: configuration file (otherwise `riskprop.yaml` if present)
//! - `--json`: output in JSON format
//! - `-v`: verbosity, repeatable
//!
//! # Example
//!
//! ```bash
//! riskprop propagate software_log4j --depth 2
//! riskprop --graph graph.json rank --limit 5
//! riskprop filter --type vulnerability --min-risk 80 --json
//! ```

mod args;
mod execute;
mod types;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    CentralityArgs, FilterArgs, PropagateArgs, RankArgs, SearchArgs, ShowArgs, TreeArgs,
};
pub use types::NodeTypeArg;

/// Riskprop - supply-chain risk propagation
///
/// Loads a graph of organizations, products, software and vulnerabilities
/// and reports how far risk spreads from any node.
#[derive(Parser, Debug)]
#[command(name = "riskprop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Graph JSON file
    #[arg(short, long, global = true)]
    pub graph: Option<PathBuf>,

    /// Configuration file (defaults to riskprop.yaml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Spread risk from a node and list everything it reaches
    Propagate(PropagateArgs),

    /// Propagate from every node and rank sources by affected count
    Rank(RankArgs),

    /// Rank nodes by centrality
    Centrality(CentralityArgs),

    /// Keep nodes of one type and above a risk floor
    Filter(FilterArgs),

    /// Count nodes by type and severity
    Stats,

    /// Assess ecosystem exposure and list dependency chains
    Insights,

    /// Detect circular dependencies
    Cycles,

    /// Search nodes by name, description or vendor
    Search(SearchArgs),

    /// Show a node with its incoming and outgoing connections
    Show(ShowArgs),

    /// Print the dependency tree below a node
    Tree(TreeArgs),
}

impl Cli {
    /// Parse arguments from the process command line.
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse arguments from an iterator, for tests.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Tracing filter directive for the requested verbosity.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Run the selected command.
    pub fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let cwd = std::env::current_dir()?;
        let ctx = execute::Context::load(self.graph.as_deref(), self.config.as_deref(), &cwd)?;

        match &self.command {
            Commands::Propagate(args) => execute::execute_propagate(&ctx, args, output_mode),
            Commands::Rank(args) => execute::execute_rank(&ctx, args, output_mode),
            Commands::Centrality(args) => execute::execute_centrality(&ctx, args, output_mode),
            Commands::Filter(args) => execute::execute_filter(&ctx, args, output_mode),
            Commands::Stats => execute::execute_stats(&ctx, output_mode),
            Commands::Insights => execute::execute_insights(&ctx, output_mode),
            Commands::Cycles => execute::execute_cycles(&ctx, output_mode),
            Commands::Search(args) => execute::execute_search(&ctx, args, output_mode),
            Commands::Show(args) => execute::execute_show(&ctx, args, output_mode),
            Commands::Tree(args) => execute::execute_tree(&ctx, args, output_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TypeFilter;
    use rstest::rstest;

    #[test]
    fn parse_requires_command() {
        assert!(Cli::try_parse_from(["riskprop"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_command() {
        let cli =
            Cli::try_parse_from(["riskprop", "stats", "--json", "--graph", "g.json", "-vv"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.graph, Some(PathBuf::from("g.json")));
        assert_eq!(cli.log_level(), "debug");
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn parse_propagate() {
        let cli = Cli::try_parse_from([
            "riskprop",
            "propagate",
            "software_log4j",
            "--depth",
            "2",
            "--budget",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Propagate(args) => {
                assert_eq!(args.source, "software_log4j");
                assert_eq!(args.depth, Some(2));
                assert_eq!(args.budget.map(std::num::NonZeroUsize::get), Some(5));
            }
            other => panic!("Expected Propagate, got {other:?}"),
        }
    }

    #[rstest]
    #[case::zero_budget(&["riskprop", "propagate", "x", "--budget", "0"])]
    #[case::negative_depth(&["riskprop", "propagate", "x", "--depth", "-1"])]
    #[case::risk_too_high(&["riskprop", "filter", "--min-risk", "101"])]
    #[case::unknown_type(&["riskprop", "filter", "--type", "vendor"])]
    #[case::missing_query(&["riskprop", "search"])]
    fn parse_rejects(#[case] argv: &[&str]) {
        assert!(Cli::try_parse_from(argv.iter().copied()).is_err());
    }

    #[test]
    fn parse_filter() {
        let cli = Cli::try_parse_from([
            "riskprop",
            "filter",
            "--type",
            "vulnerability",
            "--min-risk",
            "80",
        ])
        .unwrap();
        match cli.command {
            Commands::Filter(args) => {
                assert_eq!(
                    args.node_type.map(TypeFilter::from),
                    Some(TypeFilter::Only(crate::domain::NodeType::Vulnerability))
                );
                assert_eq!(args.min_risk, Some(80));
            }
            other => panic!("Expected Filter, got {other:?}"),
        }
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["riskprop", "search", "log"]).unwrap();
        match cli.command {
            Commands::Search(args) => assert_eq!(args.limit, 8),
            other => panic!("Expected Search, got {other:?}"),
        }
        let cli = Cli::try_parse_from(["riskprop", "centrality", "--weighted"]).unwrap();
        match cli.command {
            Commands::Centrality(args) => {
                assert!(args.weighted);
                assert_eq!(args.limit, 10);
            }
            other => panic!("Expected Centrality, got {other:?}"),
        }
        assert_eq!(
            Cli::try_parse_from(["riskprop", "cycles"]).unwrap().log_level(),
            "warn"
        );
    }
}
