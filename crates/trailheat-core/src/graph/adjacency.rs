//! Index-based directed graph with at most one arc per ordered node pair.
//!
//! Arcs are owned by their source node's adjacency map. A predecessor set per
//! node mirrors the arcs pointing into it, so incident-arc removal touches
//! only the affected neighbours. Bidirectional roads are two arcs, inserted
//! by the caller (see [`Graph::add_biedge`]).

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, TrailheatError};
use crate::graph::types::{Cost, NodeId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    present: Vec<bool>,
    successors: Vec<BTreeMap<NodeId, Cost>>,
    predecessors: Vec<BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with `size` reserved (absent) node indices
    pub fn with_size(size: usize) -> Self {
        let mut graph = Self::new();
        if size > 0 {
            graph.reserve_index(size - 1);
        }
        graph
    }

    /// Upper bound on node indices (absent indices included)
    pub fn size(&self) -> usize {
        self.present.len()
    }

    fn reserve_index(&mut self, node: NodeId) {
        if node >= self.present.len() {
            self.present.resize(node + 1, false);
            self.successors.resize_with(node + 1, BTreeMap::new);
            self.predecessors.resize_with(node + 1, BTreeSet::new);
        }
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.present.get(node).copied().unwrap_or(false)
    }

    /// Marks `node` present without adding arcs
    pub fn add_node(&mut self, node: NodeId) {
        self.reserve_index(node);
        self.present[node] = true;
    }

    /// Iterates over present node indices in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(node, &present)| present.then_some(node))
    }

    pub fn node_count(&self) -> usize {
        self.present.iter().filter(|&&present| present).count()
    }

    pub fn arc_count(&self) -> usize {
        self.successors.iter().map(BTreeMap::len).sum()
    }

    /// Iterates over all arcs as `(from, to, cost)` in ascending `(from, to)` order
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId, Cost)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, out)| out.iter().map(move |(&to, &cost)| (from, to, cost)))
    }

    /// Adds an arc from `s` to `t`, keeping the cheaper cost if one exists.
    ///
    /// Returns true if the arc was inserted or its cost lowered.
    pub fn add_edge(&mut self, s: NodeId, t: NodeId, cost: Cost) -> bool {
        self.add_node(s);
        self.add_node(t);
        let out = &mut self.successors[s];
        match out.get(&t) {
            Some(existing) if *existing <= cost => false,
            _ => {
                out.insert(t, cost);
                self.predecessors[t].insert(s);
                true
            }
        }
    }

    /// Adds arcs in both directions with the same cost
    pub fn add_biedge(&mut self, s: NodeId, t: NodeId, cost: Cost) {
        self.add_edge(s, t, cost);
        self.add_edge(t, s, cost);
    }

    pub fn arc_cost(&self, s: NodeId, t: NodeId) -> Option<Cost> {
        self.successors.get(s).and_then(|out| out.get(&t)).copied()
    }

    pub fn has_arc(&self, s: NodeId, t: NodeId) -> bool {
        self.arc_cost(s, t).is_some()
    }

    /// Outgoing arcs of `node`, keyed by target
    pub fn successors(&self, node: NodeId) -> Result<&BTreeMap<NodeId, Cost>> {
        if !self.contains_node(node) {
            return Err(TrailheatError::unknown_node(node));
        }
        Ok(&self.successors[node])
    }

    /// Nodes with an arc into `node`
    pub fn predecessors(&self, node: NodeId) -> Result<&BTreeSet<NodeId>> {
        if !self.contains_node(node) {
            return Err(TrailheatError::unknown_node(node));
        }
        Ok(&self.predecessors[node])
    }

    pub fn out_degree(&self, node: NodeId) -> Result<usize> {
        self.successors(node).map(BTreeMap::len)
    }

    /// Removes the arc `(s, t)` and returns its cost
    pub fn remove_arc(&mut self, s: NodeId, t: NodeId) -> Option<Cost> {
        let cost = self.successors.get_mut(s)?.remove(&t)?;
        self.predecessors[t].remove(&s);
        Some(cost)
    }

    /// Removes every arc incident to `node` but leaves it marked present
    pub(crate) fn detach_node(&mut self, node: NodeId) {
        if node >= self.size() {
            return;
        }
        for target in std::mem::take(&mut self.successors[node]).into_keys() {
            self.predecessors[target].remove(&node);
        }
        for source in std::mem::take(&mut self.predecessors[node]) {
            self.successors[source].remove(&node);
        }
    }

    pub(crate) fn set_present(&mut self, node: NodeId, present: bool) {
        self.reserve_index(node);
        self.present[node] = present;
    }

    /// Removes `node` and its incident arcs. The index is not reused.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        if !self.contains_node(node) {
            return false;
        }
        self.detach_node(node);
        self.present[node] = false;
        true
    }

    /// Removes all nodes in `nodes` and every arc incident to them.
    ///
    /// Absent indices are ignored.
    pub fn remove_partition<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for node in nodes {
            self.remove_node(node);
        }
    }

    /// Removes every node that is not in `keep`
    pub fn restrict_to(&mut self, keep: &BTreeSet<NodeId>) {
        let outside: Vec<NodeId> = self.nodes().filter(|n| !keep.contains(n)).collect();
        self.remove_partition(outside);
    }

    /// Builds a graph with the same nodes and arcs but costs from `cost_of`
    pub fn map_costs<F>(&self, mut cost_of: F) -> Graph
    where
        F: FnMut(NodeId, NodeId, Cost) -> Cost,
    {
        let mut mapped = Graph::with_size(self.size());
        for node in self.nodes() {
            mapped.add_node(node);
        }
        for (s, t, cost) in self.arcs() {
            mapped.add_edge(s, t, cost_of(s, t, cost));
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: NodeId = 0;
    const B: NodeId = 1;
    const C: NodeId = 2;
    const D: NodeId = 3;
    const E: NodeId = 4;

    fn base_graph() -> Graph {
        let mut g = Graph::new();
        g.add_edge(A, B, Cost::from(4));
        g.add_edge(A, C, Cost::from(2));
        g.add_edge(C, D, Cost::from(1));
        g.add_edge(D, B, Cost::from(1));
        g.add_edge(B, E, Cost::from(1));
        g
    }

    #[test]
    fn test_base() {
        let g = base_graph();
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![A, B, C, D, E]);
        assert_eq!(
            g.arcs().collect::<Vec<_>>(),
            vec![
                (A, B, Cost::from(4)),
                (A, C, Cost::from(2)),
                (B, E, Cost::from(1)),
                (C, D, Cost::from(1)),
                (D, B, Cost::from(1)),
            ]
        );
        assert_eq!(g.size(), 5);
        assert_eq!(g.arc_count(), 5);
    }

    #[test]
    fn test_remove_partition() {
        let mut g = base_graph();
        g.remove_partition([B]);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![A, C, D, E]);
        assert_eq!(
            g.arcs().collect::<Vec<_>>(),
            vec![(A, C, Cost::from(2)), (C, D, Cost::from(1))]
        );
        assert!(g.predecessors(E).unwrap().is_empty());
        assert_eq!(g.size(), 5);
    }

    #[test]
    fn test_remove_partition_ignores_absent_nodes() {
        let mut g = base_graph();
        g.remove_partition([42, 7]);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.arc_count(), 5);
    }

    #[test]
    fn test_add_edge_keeps_minimum() {
        let mut g = Graph::new();
        assert!(g.add_edge(A, B, Cost::from(5)));
        assert!(!g.add_edge(A, B, Cost::from(7)));
        assert!(!g.add_edge(A, B, Cost::from(5)));
        assert_eq!(g.arc_cost(A, B), Some(Cost::from(5)));
        assert!(g.add_edge(A, B, Cost::from(3)));
        assert_eq!(g.arc_cost(A, B), Some(Cost::from(3)));
        assert_eq!(g.arc_count(), 1);
    }

    #[test]
    fn test_directed_arcs_are_not_symmetric() {
        let g = base_graph();
        assert!(g.has_arc(A, B));
        assert!(!g.has_arc(B, A));
        assert_eq!(
            g.predecessors(B).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![A, D]
        );
    }

    #[test]
    fn test_absent_node_is_an_error_not_empty_adjacency() {
        let mut g = base_graph();
        assert!(matches!(
            g.successors(99),
            Err(TrailheatError::UnknownNode { node: 99 })
        ));
        // E is present but has no outgoing arcs
        assert!(g.successors(E).unwrap().is_empty());
        g.remove_node(E);
        assert!(matches!(
            g.out_degree(E),
            Err(TrailheatError::UnknownNode { node: E })
        ));
    }

    #[test]
    fn test_restrict_to() {
        let mut g = base_graph();
        g.restrict_to(&BTreeSet::from([A, C, D]));
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![A, C, D]);
        assert_eq!(g.arc_count(), 2);
    }

    #[test]
    fn test_map_costs_preserves_structure() {
        let g = base_graph();
        let doubled = g.map_costs(|_, _, c| c + c);
        assert_eq!(doubled.arc_cost(A, B), Some(Cost::from(8)));
        assert_eq!(doubled.node_count(), g.node_count());
        assert_eq!(doubled.arc_count(), g.arc_count());
    }

    #[test]
    fn test_with_size_reserves_absent_indices() {
        let g = Graph::with_size(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.node_count(), 0);
        assert!(!g.contains_node(3));
    }
}
