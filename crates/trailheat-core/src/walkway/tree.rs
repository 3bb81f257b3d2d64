//! Arena-backed search tree of partial walkways.
//!
//! Several tree nodes may stand for the same graph node; that is how
//! revisits are represented before they are pruned.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::{Arc, Cost, NodeId};

/// Index into [`SearchTree`]'s arena
pub type TreeIndex = usize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTreeNode {
    pub node: NodeId,
    pub parent: Option<TreeIndex>,
    /// Accumulated cost from the root
    pub cost: Cost,
    pub children: Vec<TreeIndex>,
    pub pruned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTree {
    nodes: Vec<SearchTreeNode>,
    /// Unpruned leaves reached by the last pruning pass
    #[serde(skip)]
    frontier: Option<Vec<TreeIndex>>,
}

impl SearchTree {
    pub const ROOT: TreeIndex = 0;

    pub fn new(root: NodeId) -> Self {
        Self {
            nodes: vec![SearchTreeNode {
                node: root,
                parent: None,
                cost: Cost::ZERO,
                children: Vec::new(),
                pruned: false,
            }],
            frontier: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: TreeIndex) -> Option<&SearchTreeNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[SearchTreeNode] {
        &self.nodes
    }

    pub fn root_node(&self) -> NodeId {
        self.nodes[Self::ROOT].node
    }

    /// Iterates from `index` up to the root
    fn ancestors(&self, index: TreeIndex) -> impl Iterator<Item = &SearchTreeNode> + '_ {
        std::iter::successors(self.nodes.get(index), move |current| {
            current.parent.and_then(|p| self.nodes.get(p))
        })
    }

    /// True if `node` is among the last `depth` graph nodes of the path
    /// ending at `index` (`index` itself included)
    pub fn detect_cycle(&self, index: TreeIndex, node: NodeId, depth: usize) -> bool {
        self.ancestors(index).take(depth).any(|n| n.node == node)
    }

    /// Appends one child of `index` per successor that does not close a
    /// local cycle of length `depth`. Returns the new child indices.
    pub fn expand(
        &mut self,
        index: TreeIndex,
        successors: &BTreeMap<NodeId, Cost>,
        depth: usize,
    ) -> Vec<TreeIndex> {
        let Some(base_cost) = self.nodes.get(index).map(|n| n.cost) else {
            return Vec::new();
        };
        let mut added = Vec::new();
        for (&next, &arc_cost) in successors {
            if self.detect_cycle(index, next, depth) {
                continue;
            }
            self.nodes.push(SearchTreeNode {
                node: next,
                parent: Some(index),
                cost: base_cost + arc_cost,
                children: Vec::new(),
                pruned: false,
            });
            added.push(self.nodes.len() - 1);
        }
        self.nodes[index].children.extend_from_slice(&added);
        added
    }

    /// Marks `index` and its whole subtree pruned
    pub fn prune_subtree(&mut self, index: TreeIndex) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.pruned = true;
                stack.extend_from_slice(&node.children);
            }
        }
    }

    /// Number of times `arc` occurs on the root path ending at `index`
    fn arc_repeats(&self, index: TreeIndex, arc: Arc) -> usize {
        let mut count = 0;
        let mut current = self.nodes.get(index);
        while let Some(node) = current {
            let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) else {
                break;
            };
            if (parent.node, node.node) == arc {
                count += 1;
            }
            current = Some(parent);
        }
        count
    }

    /// Prunes every tree node whose next arc would occur on its root path
    /// more than `max_arc_repeat` times, together with its subtree.
    ///
    /// The first pass walks the whole tree; later passes resume from the
    /// leaves the previous pass ended at. Returns the new frontier.
    pub fn prune_cycle_subgraphs(&mut self, max_arc_repeat: usize) -> &[TreeIndex] {
        let mut stack: Vec<TreeIndex> = match self.frontier.take() {
            Some(frontier) => frontier,
            None => vec![Self::ROOT],
        };
        let mut frontier = Vec::new();
        while let Some(index) = stack.pop() {
            if self.nodes[index].pruned {
                continue;
            }
            let node = self.nodes[index].node;
            let children: Vec<TreeIndex> = self.nodes[index]
                .children
                .iter()
                .copied()
                .filter(|&c| !self.nodes[c].pruned)
                .collect();
            if self.nodes[index].children.is_empty() {
                frontier.push(index);
                continue;
            }
            let repeats = children
                .iter()
                .any(|&c| self.arc_repeats(index, (node, self.nodes[c].node)) > max_arc_repeat);
            if repeats {
                self.prune_subtree(index);
            } else {
                // reversed so children are visited in insertion order
                stack.extend(children.into_iter().rev());
            }
        }
        let frontier = self.frontier.insert(frontier);
        frontier.as_slice()
    }

    /// Graph nodes from the root to `index`
    pub fn path_to(&self, index: TreeIndex) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(index).map(|n| n.node).collect();
        path.reverse();
        path
    }
}
