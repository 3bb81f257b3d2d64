//! `trailheat shortest-paths` command - settled costs from one node

use serde_json::json;

use crate::cli::ShortestPathsArgs;
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::print_json;
use trailheat_core::error::Result;
use trailheat_core::graph::{Cost, Dijkstra};

/// Execute the shortest-paths command
pub fn execute(ctx: &CommandContext, args: &ShortestPathsArgs) -> Result<()> {
    let file = ctx.read_graph(&args.graph)?;
    let mut dijkstra = Dijkstra::new(&file.graph);
    dijkstra.set_cost_limit(args.limit.map(Cost::new));
    let paths = dijkstra.run(args.from)?;

    crate::output_by_format!(ctx.cli,
        json => {
            let settled: Vec<_> = paths
                .settled_nodes()
                .iter()
                .map(|&node| json!({ "node": node, "cost": paths.cost(node) }))
                .collect();
            print_json(&json!({ "from": args.from, "settled": settled }))
        },
        human => {
            for &node in paths.settled_nodes() {
                println!("{}\t{}", node, paths.cost(node));
            }
        }
    )
}
