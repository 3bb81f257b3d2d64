use std::collections::BTreeSet;

use crate::contraction::ContractionRecord;
use crate::error::Result;
use crate::graph::{Cost, Graph, NodeId};

/// Contracts every node whose outgoing arcs are all short.
///
/// Candidacy is rechecked right before each contraction, so a node that
/// gained a long shortcut from an earlier contraction is kept.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdContraction {
    cost_threshold: Cost,
}

impl ThresholdContraction {
    pub fn new(cost_threshold: Cost) -> Self {
        Self { cost_threshold }
    }

    fn is_candidate(&self, graph: &Graph, node: NodeId) -> bool {
        graph
            .successors(node)
            .map(|out| out.values().all(|&cost| cost <= self.cost_threshold))
            .unwrap_or(false)
    }

    /// Present nodes outside `exclude` with only arcs at or below the threshold
    pub fn candidates(&self, graph: &Graph, exclude: &BTreeSet<NodeId>) -> BTreeSet<NodeId> {
        graph
            .nodes()
            .filter(|node| !exclude.contains(node) && self.is_candidate(graph, *node))
            .collect()
    }

    #[tracing::instrument(skip(self, graph, exclude), fields(threshold = %self.cost_threshold))]
    pub fn contract(
        &self,
        graph: &mut Graph,
        exclude: &BTreeSet<NodeId>,
    ) -> Result<ContractionRecord> {
        let mut candidates = self.candidates(graph, exclude);
        tracing::debug!(candidates = candidates.len(), "threshold contraction candidates");
        let mut record = ContractionRecord::new();
        let mut contracted = 0usize;
        while let Some(node) = candidates.pop_first() {
            if !self.is_candidate(graph, node) {
                continue;
            }
            record.extend(graph.contract_node(node, true)?);
            contracted += 1;
        }
        tracing::debug!(contracted, events = record.len(), "threshold contraction finished");
        Ok(record)
    }
}
