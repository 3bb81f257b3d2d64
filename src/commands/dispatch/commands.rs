//! Command implementations for all trailheat commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use trailheat_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::commands::{contract, edge_weights, reachability, shortest_paths, stats, walkways};

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        let result = match cmd {
            Commands::Stats(args) => stats::execute(ctx, args),
            Commands::ShortestPaths(args) => shortest_paths::execute(ctx, args),
            Commands::Contract(args) => contract::execute(ctx, args),
            Commands::Reachability(args) => reachability::execute(ctx, args),
            Commands::EdgeWeights(args) => edge_weights::execute(ctx, args),
            Commands::Walkways(args) => walkways::execute(ctx, args),
        };
        tracing::debug!(elapsed = ?ctx.start.elapsed(), "command finished");
        result
    }
}
