//! Connected components over the road graph.
//!
//! Components are weak: an arc joins its endpoints regardless of direction,
//! which matches the symmetric road graphs the tooling builds and keeps the
//! partition independent of the order nodes are visited in.

use std::collections::{BTreeSet, VecDeque};

use crate::graph::adjacency::Graph;
use crate::graph::types::NodeId;

impl Graph {
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let out = self.successors(node).into_iter().flat_map(|m| m.keys().copied());
        let inc = self.predecessors(node).into_iter().flat_map(|s| s.iter().copied());
        out.chain(inc)
    }

    /// Nodes connected to `start` through nodes of `allowed`.
    ///
    /// `start` itself is always part of the component when present, even if
    /// it is not in `allowed`. An absent `start` yields an empty set.
    pub fn connected_component(
        &self,
        start: NodeId,
        allowed: &BTreeSet<NodeId>,
    ) -> BTreeSet<NodeId> {
        let mut component = BTreeSet::new();
        if !self.contains_node(start) {
            return component;
        }
        let mut queue = VecDeque::from([start]);
        component.insert(start);
        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(node) {
                if allowed.contains(&neighbor) && component.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        component
    }

    /// Splits `nodes` into the members of components with at least
    /// `threshold` nodes and the members of smaller components.
    ///
    /// Components are computed on the subgraph induced by `nodes`. Absent
    /// indices form singleton components.
    pub fn filter_components<I>(
        &self,
        nodes: I,
        threshold: usize,
    ) -> (BTreeSet<NodeId>, BTreeSet<NodeId>)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut unassigned: BTreeSet<NodeId> = nodes.into_iter().collect();
        let mut remaining = BTreeSet::new();
        let mut removed = BTreeSet::new();
        while let Some(node) = unassigned.pop_first() {
            let component = if self.contains_node(node) {
                self.connected_component(node, &unassigned)
            } else {
                BTreeSet::from([node])
            };
            for member in &component {
                unassigned.remove(member);
            }
            if component.len() >= threshold {
                remaining.extend(component);
            } else {
                removed.extend(component);
            }
        }
        (remaining, removed)
    }

    /// All components of the graph, in order of their smallest node
    pub fn components(&self) -> Vec<BTreeSet<NodeId>> {
        let mut unassigned: BTreeSet<NodeId> = self.nodes().collect();
        let mut components = Vec::new();
        while let Some(node) = unassigned.pop_first() {
            let component = self.connected_component(node, &unassigned);
            for member in &component {
                unassigned.remove(member);
            }
            components.push(component);
        }
        components
    }

    /// Returns a copy restricted to the largest connected component.
    ///
    /// Ties go to the component discovered last. Node indices are kept.
    pub fn largest_connected_component(&self) -> Graph {
        let largest = self
            .components()
            .into_iter()
            .fold(BTreeSet::new(), |best, component| {
                if component.len() >= best.len() {
                    component
                } else {
                    best
                }
            });
        let mut lcc = Graph::with_size(self.size());
        for &node in &largest {
            lcc.add_node(node);
        }
        for (s, t, cost) in self.arcs() {
            if largest.contains(&s) && largest.contains(&t) {
                lcc.add_edge(s, t, cost);
            }
        }
        lcc
    }
}
