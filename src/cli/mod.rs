//! CLI argument parsing for trailheat
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{
    ContractArgs, ContractMode, EdgeWeightsArgs, ReachabilityArgs, ShortestPathsArgs, StatsArgs,
    WalkwaysArgs,
};
pub use output::OutputFormat;

/// Trailheat - foot-traffic estimation over forest road networks
#[derive(Parser, Debug)]
#[command(name = "trailheat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Analysis configuration file (TOML)
    #[arg(long, global = true, env = "TRAILHEAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a graph file: nodes, arcs and components
    Stats(StatsArgs),

    /// Shortest path costs from one node
    ShortestPaths(ShortestPathsArgs),

    /// Simplify a graph by contracting nodes
    Contract(ContractArgs),

    /// Population reachable from each source within a travel budget
    Reachability(ReachabilityArgs),

    /// Expected traffic per arc from round trips between entry points
    EdgeWeights(EdgeWeightsArgs),

    /// Enumerate bounded walkways from a start node
    Walkways(WalkwaysArgs),
}
