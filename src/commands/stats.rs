//! `trailheat stats` command - summarize a graph file

use serde::Serialize;

use crate::cli::StatsArgs;
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::print_json;
use trailheat_core::error::Result;

#[derive(Debug, Serialize)]
struct GraphStats {
    nodes: usize,
    arcs: usize,
    positioned_nodes: usize,
    components: usize,
    small_components: usize,
    largest_component: usize,
}

/// Execute the stats command
pub fn execute(ctx: &CommandContext, args: &StatsArgs) -> Result<()> {
    let file = ctx.read_graph(&args.graph)?;
    let graph = &file.graph;
    let min_size = args.min_size.unwrap_or(ctx.config.components.min_size);

    let components = graph.components();
    let stats = GraphStats {
        nodes: graph.node_count(),
        arcs: graph.arc_count(),
        positioned_nodes: graph
            .nodes()
            .filter(|&n| file.nodes.position(n).is_some())
            .count(),
        components: components.len(),
        small_components: components.iter().filter(|c| c.len() < min_size).count(),
        largest_component: graph.largest_connected_component().node_count(),
    };

    crate::output_by_format!(ctx.cli,
        json => { print_json(&stats) },
        human => {
            println!("nodes:             {}", stats.nodes);
            println!("arcs:              {}", stats.arcs);
            println!("positioned nodes:  {}", stats.positioned_nodes);
            println!("components:        {}", stats.components);
            println!("  below {:<3}       {}", min_size, stats.small_components);
            println!("largest component: {}", stats.largest_component);
        }
    )
}
