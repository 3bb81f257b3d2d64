//! Helper functions shared across commands

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use trailheat_core::error::Result;
use trailheat_core::graph::io::read_node_list_file;
use trailheat_core::{Cost, NodeId};

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The flag value if given, otherwise the configured one
pub fn resolve_limit(flag: Option<f64>, configured: f64) -> Cost {
    Cost::new(flag.unwrap_or(configured))
}

/// Node indices of a node-list file, weights dropped
pub fn read_node_set(path: &Path) -> Result<BTreeSet<NodeId>> {
    Ok(read_node_list_file(path)?.into_keys().collect())
}

/// Space-separated node indices
pub fn join_nodes(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
