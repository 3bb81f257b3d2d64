//! Batch analyses over a road graph
//!
//! - `reachability`: which targets each source reaches within a budget,
//!   and the even split of target demand over reaching sources
//! - `edge_weights`: round-trip feasibility per arc and the resulting
//!   expected traffic per arc
//! - `redistribute`: pushing weights computed on a contracted graph back
//!   onto the original arcs
//!
//! Every analysis keeps going after a source or entry without results and
//! reports it as a diagnostic instead.

pub mod edge_weights;
pub mod reachability;
pub mod redistribute;

pub use edge_weights::{
    compute_edge_weights, distribute_entry_weight, find_feasible_round_trips, EdgeWeights,
    FeasibleTrips,
};
pub use reachability::{reachability_analysis, Reachability};
pub use redistribute::redistribute_weights;

use crate::error::Result;
use crate::graph::{Cost, Dijkstra, Graph, NodeId, ShortestPaths};

/// Distance of every node to the nearest of `border` nodes.
///
/// Nodes farther than `max_distance` (if given) are reported unreached.
pub fn border_distances<I>(
    graph: &Graph,
    border: I,
    max_distance: Option<Cost>,
) -> Result<ShortestPaths>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut dijkstra = Dijkstra::new(graph);
    dijkstra.set_cost_limit(max_distance);
    dijkstra.run_from(border)
}
