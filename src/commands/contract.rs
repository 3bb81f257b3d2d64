//! `trailheat contract` command - simplify a graph and write it back

use std::collections::BTreeSet;
use std::fs;

use serde::Serialize;

use crate::cli::{ContractArgs, ContractMode};
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::{print_json, read_node_set};
use trailheat_core::contraction::ContractionRecord;
use trailheat_core::error::Result;
use trailheat_core::graph::io::write_graph_file;
use trailheat_core::graph::{Graph, NodeTable};
use trailheat_core::NodeId;

#[derive(Debug, Serialize)]
struct ContractionSummary {
    mode: String,
    nodes_before: usize,
    nodes_after: usize,
    arcs_before: usize,
    arcs_after: usize,
    contracted: usize,
    events: usize,
}

fn contract_graph(
    ctx: &CommandContext,
    mode: ContractMode,
    graph: &mut Graph,
    table: &NodeTable,
    exclude: &BTreeSet<NodeId>,
) -> Result<ContractionRecord> {
    match mode {
        ContractMode::Binary => Ok(graph.contract_binary_nodes(exclude)),
        ContractMode::Threshold => ctx.config.threshold_contraction().contract(graph, exclude),
        ContractMode::Cluster => ctx
            .config
            .cluster_contraction()
            .contract(graph, table, exclude),
    }
}

/// Execute the contract command
pub fn execute(ctx: &CommandContext, args: &ContractArgs) -> Result<()> {
    let mut file = ctx.read_graph(&args.graph)?;
    let exclude = match &args.exclude {
        Some(path) => read_node_set(path)?,
        None => BTreeSet::new(),
    };
    let (nodes_before, arcs_before) = (file.graph.node_count(), file.graph.arc_count());

    let record = contract_graph(ctx, args.mode, &mut file.graph, &file.nodes, &exclude)?;
    write_graph_file(&args.output, &file.graph, &file.nodes)?;
    if let Some(path) = &args.record {
        fs::write(path, serde_json::to_string_pretty(&record)?)?;
    }

    let summary = ContractionSummary {
        mode: format!("{:?}", args.mode).to_lowercase(),
        nodes_before,
        nodes_after: file.graph.node_count(),
        arcs_before,
        arcs_after: file.graph.arc_count(),
        contracted: record.contracted_nodes().len(),
        events: record.len(),
    };
    tracing::info!(
        mode = %summary.mode,
        contracted = summary.contracted,
        output = %args.output.display(),
        "graph contracted"
    );

    crate::output_by_format!(ctx.cli,
        json => { print_json(&summary) },
        human => {
            println!(
                "{} contraction: {} -> {} nodes, {} -> {} arcs ({} contracted)",
                summary.mode,
                summary.nodes_before,
                summary.nodes_after,
                summary.arcs_before,
                summary.arcs_after,
                summary.contracted
            );
        }
    )
}
