use std::collections::BTreeMap;

use crate::contraction::ContractionRecord;
use crate::error::Result;
use crate::graph::{Arc, Cost, Graph};

/// Moves per-arc weights of a contracted graph back onto the original arcs.
///
/// Each shortcut's weight is assigned to every arc it replaced. Arcs of
/// `contracted` without a weight count as zero. Fails with
/// `MalformedContraction` if `record` does not match `contracted`.
pub fn redistribute_weights(
    contracted: &Graph,
    weights: &BTreeMap<Arc, f64>,
    record: &ContractionRecord,
) -> Result<BTreeMap<Arc, f64>> {
    let mut weighted = contracted.map_costs(|s, t, _| {
        Cost::new(weights.get(&(s, t)).copied().unwrap_or_default())
    });
    weighted.undo_contraction(record)?;
    tracing::debug!(
        arcs = weighted.arc_count(),
        events = record.len(),
        "weights redistributed"
    );
    Ok(weighted
        .arcs()
        .map(|(s, t, weight)| ((s, t), weight.value()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_redistribute_onto_chain() {
        // 0 - 1 - 2 - 3, with 0 and 3 kept
        let mut g = Graph::new();
        g.add_biedge(0, 1, Cost::from(1));
        g.add_biedge(1, 2, Cost::from(1));
        g.add_biedge(2, 3, Cost::from(1));
        let original_arcs: Vec<Arc> = g.arcs().map(|(s, t, _)| (s, t)).collect();
        let record = g.contract_binary_nodes(&BTreeSet::from([0, 3]));
        assert_eq!(g.arc_count(), 2);

        let weights = BTreeMap::from([((0, 3), 12.5)]);
        let restored = redistribute_weights(&g, &weights, &record).unwrap();
        assert_eq!(restored.keys().copied().collect::<Vec<_>>(), original_arcs);
        assert_eq!(restored[&(0, 1)], 12.5);
        assert_eq!(restored[&(1, 2)], 12.5);
        assert_eq!(restored[&(2, 3)], 12.5);
        assert_eq!(restored[&(3, 2)], 0.0);
    }

    #[test]
    fn test_redistribute_with_mismatched_record_fails() {
        let mut g = Graph::new();
        g.add_biedge(0, 1, Cost::from(1));
        g.add_biedge(1, 2, Cost::from(1));
        let record = g.contract_binary_nodes(&BTreeSet::new());
        let unrelated = Graph::new();
        assert!(redistribute_weights(&unrelated, &BTreeMap::new(), &record).is_err());
    }
}
