//! `trailheat walkways` command - bounded walkways from a start node

use crate::cli::WalkwaysArgs;
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::{join_nodes, print_json, read_node_set};
use trailheat_core::error::Result;
use trailheat_core::graph::Cost;
use trailheat_core::walkway::enumerate_walkways;

/// Execute the walkways command
pub fn execute(ctx: &CommandContext, args: &WalkwaysArgs) -> Result<()> {
    let file = ctx.read_graph(&args.graph)?;
    let targets = args.targets.as_deref().map(read_node_set).transpose()?;

    let mut options = ctx.config.walkway_options();
    if let Some(limit) = args.limit {
        options.cost_limit = Cost::new(limit);
    }
    if let Some(depth) = args.depth {
        options.local_cycle_depth = depth;
    }

    let ways = enumerate_walkways(&file.graph, args.start, targets.as_ref(), &options)?;
    tracing::debug!(walkways = ways.len(), "walkways enumerated");

    crate::output_by_format!(ctx.cli,
        json => { print_json(&ways) },
        human => {
            for way in &ways {
                println!("{}", join_nodes(way));
            }
        }
    )
}
