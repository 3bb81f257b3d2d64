//! Round-trip feasibility and traffic weight per arc.
//!
//! An arc `(s, t)` lies on a feasible round trip for the entry/exit pair
//! `(entry, exit)` if `d(entry, s) + c(s, t) + d(t, exit)` stays within the
//! budget, where neither distance may use the arc in either direction. Road
//! graphs are symmetric, so `d(entry, s)` is measured as `d(s, entry)`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, TrailheatError};
use crate::graph::{Arc, Cost, Dijkstra, Graph, NodeId, ShortestPaths};
use crate::trace_time;

/// entry -> exit -> arc -> round trip cost
pub type FeasibleTrips = BTreeMap<NodeId, BTreeMap<NodeId, BTreeMap<Arc, Cost>>>;

/// Expected traffic per arc
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EdgeWeights {
    pub weights: BTreeMap<Arc, f64>,
    /// Entries for which no feasible round trip exists
    pub entries_without_trips: Vec<NodeId>,
}

fn reached_entries(paths: &ShortestPaths, entries: &BTreeSet<NodeId>) -> Vec<(NodeId, Cost)> {
    entries
        .iter()
        .map(|&entry| (entry, paths.cost(entry)))
        .filter(|(_, cost)| cost.is_finite())
        .collect()
}

/// Finds, per arc, every entry/exit pair with a round trip through it
/// within `cost_limit`.
///
/// Arcs costing more than the limit are skipped. Fails with `NotFound` for
/// an arc that is not in `graph`.
#[tracing::instrument(skip(graph, arcs, entries), fields(entries = entries.len(), cost_limit = %cost_limit))]
pub fn find_feasible_round_trips<I>(
    graph: &Graph,
    arcs: I,
    entries: &BTreeSet<NodeId>,
    cost_limit: Cost,
) -> Result<FeasibleTrips>
where
    I: IntoIterator<Item = Arc>,
{
    let start = std::time::Instant::now();
    let mut trips = FeasibleTrips::new();
    let mut searched = 0usize;
    for (s, t) in arcs {
        let arc_cost = graph
            .arc_cost(s, t)
            .ok_or_else(|| TrailheatError::not_found("arc", format!("{s} -> {t}")))?;
        let to_entry_budget = cost_limit.value() - arc_cost.value();
        if to_entry_budget < 0.0 {
            continue;
        }
        searched += 1;

        let mut dijkstra = Dijkstra::new(graph)
            .with_cost_limit(Cost::new(to_entry_budget))
            .with_forbidden_arcs([(s, t), (t, s)]);
        let from_s = dijkstra.run(s)?;
        let entry_side = reached_entries(&from_s, entries);
        let Some(nearest) = entry_side
            .iter()
            .map(|(_, cost)| *cost)
            .min_by(|a, b| a.total_cmp(b))
        else {
            continue;
        };

        dijkstra.set_cost_limit(Some(Cost::new(to_entry_budget).saturating_sub(nearest)));
        let from_t = dijkstra.run(t)?;
        let exit_side = reached_entries(&from_t, entries);

        for &(entry, to_entry) in &entry_side {
            for &(exit, to_exit) in &exit_side {
                let round_trip = to_entry + arc_cost + to_exit;
                if round_trip <= cost_limit {
                    trips
                        .entry(entry)
                        .or_default()
                        .entry(exit)
                        .or_default()
                        .insert((s, t), round_trip);
                }
            }
        }
    }
    tracing::debug!(
        searched_arcs = searched,
        entries_with_trips = trips.len(),
        "round trip search finished"
    );
    trace_time!(start, "find_feasible_round_trips");
    Ok(trips)
}

/// Spreads each entry's weight evenly over its feasible `(exit, arc)`
/// combinations.
///
/// An arc feasible for several exits of the same entry receives one share
/// per exit.
pub fn distribute_entry_weight(
    entry_weights: &BTreeMap<NodeId, f64>,
    trips: &FeasibleTrips,
) -> EdgeWeights {
    let mut result = EdgeWeights::default();
    for (&entry, &weight) in entry_weights {
        let per_exit = trips.get(&entry);
        let paths: usize = per_exit.map_or(0, |exits| exits.values().map(BTreeMap::len).sum());
        if paths == 0 {
            result.entries_without_trips.push(entry);
            continue;
        }
        let share = weight / paths as f64;
        for arcs in per_exit.into_iter().flat_map(BTreeMap::values) {
            for arc in arcs.keys() {
                *result.weights.entry(*arc).or_default() += share;
            }
        }
    }
    if !result.entries_without_trips.is_empty() {
        tracing::info!(
            count = result.entries_without_trips.len(),
            "entries without feasible round trips"
        );
    }
    result
}

/// Expected traffic on every arc of `graph` for the given entry weights
pub fn compute_edge_weights(
    graph: &Graph,
    entry_weights: &BTreeMap<NodeId, f64>,
    cost_limit: Cost,
) -> Result<EdgeWeights> {
    let entries: BTreeSet<NodeId> = entry_weights.keys().copied().collect();
    let arcs: Vec<Arc> = graph.arcs().map(|(s, t, _)| (s, t)).collect();
    let trips = find_feasible_round_trips(graph, arcs, &entries, cost_limit)?;
    Ok(distribute_entry_weight(entry_weights, &trips))
}
