//! `trailheat edge-weights` command - expected traffic per arc

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde_json::json;

use crate::cli::EdgeWeightsArgs;
use crate::commands::dispatch::command::CommandContext;
use crate::commands::helpers::{print_json, resolve_limit};
use trailheat_core::analysis::{compute_edge_weights, redistribute_weights};
use trailheat_core::error::Result;
use trailheat_core::graph::io::{read_node_list_file, write_arc_weights};
use trailheat_core::NodeId;

/// Execute the edge-weights command
pub fn execute(ctx: &CommandContext, args: &EdgeWeightsArgs) -> Result<()> {
    let mut file = ctx.read_graph(&args.graph)?;
    let entries = read_node_list_file(&args.entries)?;
    if entries.is_empty() {
        trailheat_core::bail_usage!(format!("no entries in {}", args.entries.display()));
    }
    let limit = resolve_limit(args.limit, ctx.config.edge_weights.cost_limit);

    let record = if args.contract {
        let keep: BTreeSet<NodeId> = entries.keys().copied().collect();
        let record = file.graph.contract_binary_nodes(&keep);
        tracing::debug!(elapsed = ?ctx.start.elapsed(), contracted = record.contracted_nodes().len(), "contract");
        Some(record)
    } else {
        None
    };

    let result = compute_edge_weights(&file.graph, &entries, limit)?;
    let weights = match &record {
        Some(record) => redistribute_weights(&file.graph, &result.weights, record)?,
        None => result.weights,
    };

    if let Some(path) = &args.output {
        let mut writer = BufWriter::new(File::create(path)?);
        write_arc_weights(&mut writer, &weights)?;
        writer.flush()?;
    }

    crate::output_by_format!(ctx.cli,
        json => {
            let arcs: Vec<_> = weights
                .iter()
                .map(|(&(from, to), weight)| json!({ "from": from, "to": to, "weight": weight }))
                .collect();
            print_json(&json!({
                "cost_limit": limit,
                "arcs": arcs,
                "entries_without_trips": result.entries_without_trips,
            }))
        },
        human => {
            if args.output.is_none() {
                let stdout = io::stdout();
                write_arc_weights(&mut stdout.lock(), &weights)?;
            }
            if !result.entries_without_trips.is_empty() {
                eprintln!(
                    "entries without a feasible round trip within {}: {}",
                    limit,
                    result.entries_without_trips.len()
                );
            }
        }
    )
}
