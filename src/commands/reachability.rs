//! `trailheat reachability` command - population reachable per source

use serde_json::json;

use crate::cli::ReachabilityArgs;
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::{print_json, read_node_set, resolve_limit};
use trailheat_core::analysis::reachability_analysis;
use trailheat_core::error::Result;
use trailheat_core::graph::io::read_node_list_file;

/// Execute the reachability command
pub fn execute(ctx: &CommandContext, args: &ReachabilityArgs) -> Result<()> {
    let file = ctx.read_graph(&args.graph)?;
    let sources = read_node_set(&args.sources)?;
    if sources.is_empty() {
        trailheat_core::bail_usage!(format!("no sources in {}", args.sources.display()));
    }
    let population = read_node_list_file(&args.targets)?;
    let targets = population.keys().copied().collect();
    let limit = resolve_limit(args.limit, ctx.config.reachability.cost_limit);

    let result = reachability_analysis(&file.graph, &sources, &targets, Some(limit))?;
    let per_source = result.distribute(|target| population.get(&target).copied().unwrap_or(0.0));

    crate::output_by_format!(ctx.cli,
        json => {
            print_json(&json!({
                "cost_limit": limit,
                "population": per_source,
                "sources_without_targets": result.sources_without_targets,
                "average_settled": result.average_settled,
            }))
        },
        human => {
            for (source, people) in &per_source {
                println!("{}\t{}", source, people);
            }
            if !result.sources_without_targets.is_empty() {
                println!(
                    "{} source(s) reach no target within {}",
                    result.sources_without_targets.len(),
                    limit
                );
            }
        }
    )
}
