//! Command argument structures

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::cli::parse::parse_cost;
use trailheat_core::NodeId;

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Components with fewer nodes count as small (overrides config)
    #[arg(long)]
    pub min_size: Option<usize>,
}

/// Arguments for the shortest-paths command.
#[derive(Args, Debug)]
pub struct ShortestPathsArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Start node index
    #[arg(long)]
    pub from: NodeId,

    /// Stop the search beyond this cost
    #[arg(long, value_parser = parse_cost)]
    pub limit: Option<f64>,
}

/// How the contract command simplifies the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContractMode {
    /// Remove pass-through nodes; reversible via the record
    #[default]
    Binary,
    /// Contract nodes whose outgoing arcs are all cheap
    Threshold,
    /// Collapse clusters of nearby nodes joined by cheap arcs
    Cluster,
}

/// Arguments for the contract command.
#[derive(Args, Debug)]
pub struct ContractArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Where to write the contracted graph
    #[arg(long, short)]
    pub output: PathBuf,

    /// Where to write the contraction record (JSON)
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Node list of nodes that must survive
    #[arg(long)]
    pub exclude: Option<PathBuf>,

    /// Contraction strategy
    #[arg(long, value_enum, default_value_t = ContractMode::Binary)]
    pub mode: ContractMode,
}

/// Arguments for the reachability command.
#[derive(Args, Debug)]
pub struct ReachabilityArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Node list of sources
    #[arg(long)]
    pub sources: PathBuf,

    /// Node list of targets; the second column is the population
    #[arg(long)]
    pub targets: PathBuf,

    /// Maximum travel cost (overrides config)
    #[arg(long, value_parser = parse_cost)]
    pub limit: Option<f64>,
}

/// Arguments for the edge-weights command.
#[derive(Args, Debug)]
pub struct EdgeWeightsArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Node list of entry points; the second column is the entry weight
    #[arg(long)]
    pub entries: PathBuf,

    /// Maximum round-trip cost (overrides config)
    #[arg(long, value_parser = parse_cost)]
    pub limit: Option<f64>,

    /// Run binary contraction first and map weights back onto the original arcs
    #[arg(long)]
    pub contract: bool,

    /// Write `<from> <to> <weight>` lines to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the walkways command.
#[derive(Args, Debug)]
pub struct WalkwaysArgs {
    /// Graph file in the interchange format
    pub graph: PathBuf,

    /// Start node index
    #[arg(long)]
    pub start: NodeId,

    /// Maximum walkway cost (overrides config)
    #[arg(long, value_parser = parse_cost)]
    pub limit: Option<f64>,

    /// Local cycle depth (overrides config)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Node list of targets; only walkways ending there are reported
    #[arg(long)]
    pub targets: Option<PathBuf>,
}
