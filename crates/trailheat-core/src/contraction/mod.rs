//! Graph simplification by node contraction
//!
//! - binary contraction removes degree-2 pass-through nodes and can be
//!   undone exactly from its [`ContractionRecord`]
//! - threshold and cluster contraction remove dense local structure and
//!   are one-way

pub mod cluster;
pub mod threshold;

pub use cluster::{Cluster, ClusterContraction};
pub use threshold::ThresholdContraction;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrailheatError};
use crate::graph::{Cost, Graph, NodeId};

/// Node `via` was removed and the shortcut `from -> to` stands for
/// `from -> via -> to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionEvent {
    pub from: NodeId,
    pub via: NodeId,
    pub to: NodeId,
}

impl ContractionEvent {
    pub fn new(from: NodeId, via: NodeId, to: NodeId) -> Self {
        Self { from, via, to }
    }
}

/// Ordered log of contraction events, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionRecord {
    pub events: Vec<ContractionEvent>,
}

impl ContractionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct contracted nodes in order of first contraction
    pub fn contracted_nodes(&self) -> Vec<NodeId> {
        let mut seen = BTreeSet::new();
        self.events
            .iter()
            .filter(|event| seen.insert(event.via))
            .map(|event| event.via)
            .collect()
    }

    pub fn extend(&mut self, other: ContractionRecord) {
        self.events.extend(other.events);
    }
}

impl Graph {
    /// Contracts `node`, connecting every predecessor to every successor.
    ///
    /// A shortcut `a -> b` is inserted (or tightened) when no cheaper arc
    /// exists; every inserted shortcut is logged. The node loses all its
    /// arcs and, with `remove`, is also marked absent.
    pub fn contract_node(&mut self, node: NodeId, remove: bool) -> Result<ContractionRecord> {
        let incoming: Vec<(NodeId, Cost)> = self
            .predecessors(node)?
            .iter()
            .filter(|&&a| a != node)
            .filter_map(|&a| self.arc_cost(a, node).map(|cost| (a, cost)))
            .collect();
        let outgoing: Vec<(NodeId, Cost)> = self
            .successors(node)?
            .iter()
            .filter(|(&b, _)| b != node)
            .map(|(&b, &cost)| (b, cost))
            .collect();

        let mut record = ContractionRecord::new();
        let mut shortcuts = Vec::new();
        for &(a, cost_a) in &incoming {
            for &(b, cost_b) in &outgoing {
                if a == b {
                    continue;
                }
                let cost = cost_a + cost_b;
                if !matches!(self.arc_cost(a, b), Some(existing) if existing <= cost) {
                    shortcuts.push((a, b, cost));
                    record.events.push(ContractionEvent::new(a, node, b));
                }
            }
        }
        for (a, b, cost) in shortcuts {
            self.add_edge(a, b, cost);
        }
        self.detach_node(node);
        if remove {
            self.set_present(node, false);
        }
        tracing::trace!(node, shortcuts = record.len(), "contracted node");
        Ok(record)
    }

    /// True if `node` passes straight through between two distinct
    /// neighbours that are not connected to each other
    fn is_binary_candidate(&self, node: NodeId) -> Result<bool> {
        let successors = self.successors(node)?;
        if successors.len() != 2 || successors.contains_key(&node) {
            return Ok(false);
        }
        let predecessors = self.predecessors(node)?;
        if !predecessors.iter().eq(successors.keys()) {
            return Ok(false);
        }
        let mut neighbors = successors.keys().copied();
        let (Some(a), Some(b)) = (neighbors.next(), neighbors.next()) else {
            return Ok(false);
        };
        // contracting would hide a genuinely distinct route
        Ok(!self.has_arc(a, b) && !self.has_arc(b, a))
    }

    /// Contracts every pass-through node outside `exclude`.
    ///
    /// A node qualifies if it has exactly two neighbours, reached and
    /// reachable in both directions, and those neighbours are not already
    /// connected. Chains collapse into a single shortcut. The returned record
    /// restores the graph via [`Graph::undo_contraction`].
    #[tracing::instrument(skip(self, exclude), fields(nodes = self.node_count(), excluded = exclude.len()))]
    pub fn contract_binary_nodes(&mut self, exclude: &BTreeSet<NodeId>) -> ContractionRecord {
        let mut record = ContractionRecord::new();
        let mut contracted = Vec::new();
        let candidates: Vec<NodeId> = self.nodes().filter(|n| !exclude.contains(n)).collect();
        for node in candidates {
            if !matches!(self.is_binary_candidate(node), Ok(true)) {
                continue;
            }
            match self.contract_node(node, false) {
                Ok(events) => {
                    record.extend(events);
                    contracted.push(node);
                }
                Err(e) => tracing::warn!(node, error = %e, "skipping contraction"),
            }
        }
        for node in &contracted {
            self.set_present(*node, false);
        }
        tracing::debug!(
            contracted = contracted.len(),
            events = record.len(),
            "binary contraction finished"
        );
        record
    }

    /// Replays `record` in reverse, restoring contracted nodes.
    ///
    /// For each event the current cost of the shortcut `from -> to` is
    /// assigned to both restored arcs and the shortcut is removed. Fails
    /// with `MalformedContraction` if a shortcut is missing, in which case
    /// the graph is left unchanged.
    pub fn undo_contraction(&mut self, record: &ContractionRecord) -> Result<()> {
        let mut restored = self.clone();
        for event in record.events.iter().rev() {
            let ContractionEvent { from, via, to } = *event;
            let cost = restored.remove_arc(from, to).ok_or_else(|| {
                TrailheatError::malformed_contraction(format!(
                    "shortcut {from} -> {to} for node {via} is missing"
                ))
            })?;
            restored.set_present(via, true);
            restored.add_edge(from, via, cost);
            restored.add_edge(via, to, cost);
        }
        *self = restored;
        Ok(())
    }
}
