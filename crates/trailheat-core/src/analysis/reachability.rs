use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, TrailheatError};
use crate::graph::{Cost, Dijkstra, Graph, NodeId};
use crate::trace_time;

/// Result of [`reachability_analysis`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reachability {
    /// Per reached target, the sources reaching it and their distance
    pub reachable: BTreeMap<NodeId, Vec<(NodeId, Cost)>>,
    /// Sources that reached no target within the budget
    pub sources_without_targets: Vec<NodeId>,
    /// Mean number of settled nodes per source search
    pub average_settled: f64,
}

impl Reachability {
    /// Splits each reached target's demand evenly over its sources.
    ///
    /// Distance does not influence the split. Sources without any reached
    /// target do not appear in the result.
    pub fn distribute<F>(&self, demand: F) -> BTreeMap<NodeId, f64>
    where
        F: Fn(NodeId) -> f64,
    {
        let mut per_source: BTreeMap<NodeId, f64> = BTreeMap::new();
        for (&target, sources) in &self.reachable {
            if sources.is_empty() {
                continue;
            }
            let share = demand(target) / sources.len() as f64;
            for &(source, _) in sources {
                *per_source.entry(source).or_default() += share;
            }
        }
        per_source
    }

    /// Targets reached by at least one source
    pub fn reached_targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.reachable.keys().copied()
    }
}

/// Runs one bounded search per source and records which targets it reaches.
///
/// Fails with `UnknownNode` if a source is absent. Absent targets are
/// simply never reached.
#[tracing::instrument(skip(graph, sources, targets), fields(sources = sources.len(), targets = targets.len(), cost_limit = ?cost_limit))]
pub fn reachability_analysis(
    graph: &Graph,
    sources: &BTreeSet<NodeId>,
    targets: &BTreeSet<NodeId>,
    cost_limit: Option<Cost>,
) -> Result<Reachability> {
    if let Some(&absent) = sources.iter().find(|&&s| !graph.contains_node(s)) {
        return Err(TrailheatError::unknown_node(absent));
    }
    let start = std::time::Instant::now();
    let mut dijkstra = Dijkstra::new(graph);
    dijkstra.set_cost_limit(cost_limit);

    let mut result = Reachability::default();
    let mut settled_total = 0usize;
    for &source in sources {
        let paths = dijkstra.run(source)?;
        settled_total += paths.settled_count();
        let mut reached_any = false;
        for &target in targets {
            let cost = paths.cost(target);
            if cost.is_finite() {
                result.reachable.entry(target).or_default().push((source, cost));
                reached_any = true;
            }
        }
        if !reached_any {
            tracing::trace!(source, "source reaches no target");
            result.sources_without_targets.push(source);
        }
    }

    if !sources.is_empty() {
        result.average_settled = settled_total as f64 / sources.len() as f64;
    }
    tracing::debug!(
        average_settled = result.average_settled,
        nodes = graph.node_count(),
        reached_targets = result.reachable.len(),
        sources_without_targets = result.sources_without_targets.len(),
        "reachability analysis finished"
    );
    trace_time!(start, "reachability_analysis");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: NodeId = 0;
    const B: NodeId = 1;
    const C: NodeId = 2;
    const D: NodeId = 3;
    const E: NodeId = 4;

    /// Two sources A and E on a path, targets B, C, D in between
    fn path_graph() -> Graph {
        let mut g = Graph::new();
        g.add_biedge(A, B, Cost::from(1));
        g.add_biedge(B, C, Cost::from(2));
        g.add_biedge(C, D, Cost::from(2));
        g.add_biedge(D, E, Cost::from(1));
        g
    }

    #[test]
    fn test_reachability_within_limit() {
        let g = path_graph();
        let r = reachability_analysis(
            &g,
            &BTreeSet::from([A, E]),
            &BTreeSet::from([B, C, D]),
            Some(Cost::from(3)),
        )
        .unwrap();
        assert_eq!(r.reachable[&B], vec![(A, Cost::from(1))]);
        assert_eq!(r.reachable[&C], vec![(A, Cost::from(3)), (E, Cost::from(3))]);
        assert_eq!(r.reachable[&D], vec![(E, Cost::from(1))]);
        assert!(r.sources_without_targets.is_empty());
        // A and E each settle three nodes
        assert_eq!(r.average_settled, 3.0);
    }

    #[test]
    fn test_distribute_splits_evenly() {
        let g = path_graph();
        let r = reachability_analysis(
            &g,
            &BTreeSet::from([A, E]),
            &BTreeSet::from([B, C, D]),
            Some(Cost::from(3)),
        )
        .unwrap();
        let weights = r.distribute(|target| if target == C { 500.0 } else { 100.0 });
        assert_eq!(weights, BTreeMap::from([(A, 350.0), (E, 350.0)]));
    }

    #[test]
    fn test_source_without_targets_is_diagnostic() {
        let mut g = path_graph();
        g.add_biedge(5, 6, Cost::from(1));
        let r = reachability_analysis(
            &g,
            &BTreeSet::from([A, 5]),
            &BTreeSet::from([B]),
            None,
        )
        .unwrap();
        assert_eq!(r.sources_without_targets, vec![5]);
        assert_eq!(r.reachable[&B], vec![(A, Cost::from(1))]);
        assert!(!r.distribute(|_| 1.0).contains_key(&5));
    }

    #[test]
    fn test_unreached_target_is_excluded() {
        let g = path_graph();
        let r = reachability_analysis(
            &g,
            &BTreeSet::from([A]),
            &BTreeSet::from([E, 42]),
            Some(Cost::from(5)),
        )
        .unwrap();
        assert!(r.reachable.is_empty());
        assert!(r.distribute(|_| 1.0).is_empty());
        assert_eq!(r.sources_without_targets, vec![A]);
    }

    #[test]
    fn test_absent_source_is_error() {
        let g = path_graph();
        let err = reachability_analysis(&g, &BTreeSet::from([9]), &BTreeSet::new(), None)
            .unwrap_err();
        assert!(matches!(err, TrailheatError::UnknownNode { node: 9 }));
    }
}
