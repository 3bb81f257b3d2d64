use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrailheatError};
use crate::graph::{Cost, Graph, NodeId};
use crate::walkway::tree::{SearchTree, TreeIndex};

/// Limits for one enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkwayOptions {
    /// Tree nodes at or above this cost are not expanded
    pub cost_limit: Cost,
    /// Number of most recent path nodes a step may not revisit (0 disables)
    pub local_cycle_depth: usize,
    /// Run a global pruning pass every this many expansions
    pub prune_after: Option<usize>,
}

impl Default for WalkwayOptions {
    fn default() -> Self {
        Self {
            cost_limit: Cost::from(9),
            local_cycle_depth: 2,
            prune_after: Some(500),
        }
    }
}

/// Breadth-first generator of bounded walkways from one start node
#[derive(Debug)]
pub struct WalkwayEnumerator<'g> {
    graph: &'g Graph,
    tree: SearchTree,
}

impl<'g> WalkwayEnumerator<'g> {
    pub fn new(graph: &'g Graph, start: NodeId) -> Result<Self> {
        if !graph.contains_node(start) {
            return Err(TrailheatError::unknown_node(start));
        }
        Ok(Self {
            graph,
            tree: SearchTree::new(start),
        })
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SearchTree {
        &mut self.tree
    }

    /// Grows the search tree until every open branch reaches the cost
    /// limit. Returns the number of expanded tree nodes.
    ///
    /// Each run starts over from a fresh tree.
    #[tracing::instrument(skip(self), fields(start = self.tree.root_node()))]
    pub fn run(&mut self, options: &WalkwayOptions) -> Result<usize> {
        let graph = self.graph;
        self.tree = SearchTree::new(self.tree.root_node());
        let mut queue = VecDeque::from([SearchTree::ROOT]);
        let mut expanded = 0usize;
        while let Some(index) = queue.pop_front() {
            if self.is_pruned(index) {
                continue;
            }
            expanded += 1;
            if let Some(every) = options.prune_after.filter(|&n| n > 0) {
                if expanded % every == 0 {
                    self.tree.prune_cycle_subgraphs(0);
                    tracing::trace!(tree_nodes = self.tree.len(), "periodic pruning");
                    if self.is_pruned(index) {
                        continue;
                    }
                }
            }
            let Some((node, cost)) = self.tree.get(index).map(|n| (n.node, n.cost)) else {
                continue;
            };
            if cost >= options.cost_limit {
                continue;
            }
            let successors = graph.successors(node)?;
            queue.extend(self.tree.expand(index, successors, options.local_cycle_depth));
        }
        tracing::debug!(expanded, tree_nodes = self.tree.len(), "enumeration finished");
        Ok(expanded)
    }

    fn is_pruned(&self, index: TreeIndex) -> bool {
        self.tree.get(index).map_or(true, |n| n.pruned)
    }

    /// Root paths of the unpruned tree.
    ///
    /// Without `targets` every leaf ends a path; with `targets` every tree
    /// node standing for a target does. The bare root is never a path.
    pub fn trace(&self, targets: Option<&BTreeSet<NodeId>>) -> Vec<Vec<NodeId>> {
        self.tree
            .nodes()
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, n)| !n.pruned)
            .filter(|(_, n)| match targets {
                Some(targets) => targets.contains(&n.node),
                None => n.children.is_empty(),
            })
            .map(|(index, _)| self.tree.path_to(index))
            .collect()
    }
}
