use crate::error::{Result, TrailheatError};
use crate::graph::adjacency::Graph;
use crate::graph::types::{Arc, Cost, NodeId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Wrapper for BinaryHeap to use as min-heap (ordered by accumulated cost)
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub node: NodeId,
    pub accumulated_cost: Cost,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.accumulated_cost
            .total_cmp(&other.accumulated_cost)
            .then(self.node.cmp(&other.node))
    }
}

/// Settled costs of one search.
///
/// Indexed by node; nodes that were not settled (unreachable, absent, or
/// beyond the cost limit) report [`Cost::INFINITE`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    costs: Vec<Cost>,
    settle_order: Vec<NodeId>,
}

impl ShortestPaths {
    pub fn cost(&self, node: NodeId) -> Cost {
        self.costs.get(node).copied().unwrap_or(Cost::INFINITE)
    }

    pub fn is_reached(&self, node: NodeId) -> bool {
        self.cost(node).is_finite()
    }

    /// Cost per node index, `Cost::INFINITE` for unreached nodes
    pub fn costs(&self) -> &[Cost] {
        &self.costs
    }

    /// Settled nodes in the order they were settled (non-decreasing cost)
    pub fn settled_nodes(&self) -> &[NodeId] {
        &self.settle_order
    }

    pub fn settled_count(&self) -> usize {
        self.settle_order.len()
    }
}

/// Single-source (or multi-source) shortest path search over a [`Graph`].
///
/// The search stops as soon as the cheapest queued cost exceeds the cost
/// limit. Forbidden arcs are ordered pairs: forbidding `(s, t)` leaves
/// `(t, s)` usable.
#[derive(Debug, Clone)]
pub struct Dijkstra<'g> {
    graph: &'g Graph,
    cost_limit: Option<Cost>,
    forbidden: HashSet<Arc>,
}

/// State tracked during one run
struct DijkstraState {
    tentative: Vec<Cost>,
    settled: Vec<bool>,
    settle_order: Vec<NodeId>,
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl DijkstraState {
    fn new(size: usize) -> Self {
        Self {
            tentative: vec![Cost::INFINITE; size],
            settled: vec![false; size],
            settle_order: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, node: NodeId, cost: Cost) {
        self.tentative[node] = cost;
        self.heap.push(Reverse(HeapEntry {
            node,
            accumulated_cost: cost,
        }));
    }

    fn into_paths(self) -> ShortestPaths {
        let costs = self
            .tentative
            .into_iter()
            .zip(&self.settled)
            .map(|(cost, &settled)| if settled { cost } else { Cost::INFINITE })
            .collect();
        ShortestPaths {
            costs,
            settle_order: self.settle_order,
        }
    }
}

impl<'g> Dijkstra<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            cost_limit: None,
            forbidden: HashSet::new(),
        }
    }

    pub fn with_cost_limit(mut self, limit: Cost) -> Self {
        self.cost_limit = Some(limit);
        self
    }

    pub fn with_forbidden_arcs<I>(mut self, arcs: I) -> Self
    where
        I: IntoIterator<Item = Arc>,
    {
        self.forbidden.extend(arcs);
        self
    }

    pub fn set_cost_limit(&mut self, limit: Option<Cost>) {
        self.cost_limit = limit;
    }

    pub fn forbid_arc(&mut self, from: NodeId, to: NodeId) {
        self.forbidden.insert((from, to));
    }

    pub fn clear_forbidden(&mut self) {
        self.forbidden.clear();
    }

    /// Shortest path costs from `start`
    pub fn run(&self, start: NodeId) -> Result<ShortestPaths> {
        self.run_from([start])
    }

    /// Shortest path costs from the nearest of several starts.
    ///
    /// Every start is seeded at cost zero. Fails with `UnknownNode` if any
    /// start is absent.
    pub fn run_from<I>(&self, starts: I) -> Result<ShortestPaths>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut state = DijkstraState::new(self.graph.size());
        for start in starts {
            if !self.graph.contains_node(start) {
                return Err(TrailheatError::unknown_node(start));
            }
            state.push(start, Cost::ZERO);
        }

        while let Some(Reverse(entry)) = state.heap.pop() {
            let HeapEntry {
                node,
                accumulated_cost,
            } = entry;
            if self.cost_limit.is_some_and(|limit| accumulated_cost > limit) {
                break;
            }
            if state.settled[node] || accumulated_cost > state.tentative[node] {
                continue;
            }
            state.settled[node] = true;
            state.settle_order.push(node);

            for (&neighbor, &arc_cost) in self.graph.successors(node)? {
                if self.forbidden.contains(&(node, neighbor)) || state.settled[neighbor] {
                    continue;
                }
                let candidate = accumulated_cost + arc_cost;
                if candidate < state.tentative[neighbor] {
                    state.push(neighbor, candidate);
                }
            }
        }

        let paths = state.into_paths();
        tracing::trace!(settled = paths.settled_count(), "dijkstra finished");
        Ok(paths)
    }
}
