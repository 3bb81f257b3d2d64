//! Bounded walkway enumeration
//!
//! A walkway is a node sequence starting at an entry whose total cost
//! stays within a budget. Enumeration grows a search tree breadth-first,
//! suppresses short back-and-forth revisits while growing it, and prunes
//! every branch that reuses an arc of its own root path.

pub mod enumerator;
pub mod tree;

pub use enumerator::{WalkwayEnumerator, WalkwayOptions};
pub use tree::{SearchTree, SearchTreeNode, TreeIndex};

use std::collections::BTreeSet;

use crate::error::Result;
use crate::graph::{Graph, NodeId};

/// Enumerates the walkways from `start`, globally pruned.
///
/// With `targets`, walkways end at any target node; otherwise at leaves of
/// the search tree.
#[tracing::instrument(skip(graph, targets, options))]
pub fn enumerate_walkways(
    graph: &Graph,
    start: NodeId,
    targets: Option<&BTreeSet<NodeId>>,
    options: &WalkwayOptions,
) -> Result<Vec<Vec<NodeId>>> {
    let mut enumerator = WalkwayEnumerator::new(graph, start)?;
    enumerator.run(options)?;
    enumerator.tree_mut().prune_cycle_subgraphs(0);
    let walkways = enumerator.trace(targets);
    tracing::debug!(walkways = walkways.len(), "walkways enumerated");
    Ok(walkways)
}
